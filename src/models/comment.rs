//! Comment data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Fields, ID_KEY, strip_reserved};

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(flatten)]
    pub data: NewComment,
}

/// Request body for `POST /comments`.
///
/// # JSON Example
///
/// ```json
/// {
///   "blog_id": "550e8400-e29b-41d4-a716-446655440000",
///   "comment": "Great read!",
///   "userName": "Jane"
/// }
/// ```
///
/// `blog_id` is a loose reference: it is never checked against the blogs collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub blog_id: String,

    pub comment: String,

    #[serde(flatten)]
    pub fields: Fields,
}

impl NewComment {
    pub fn sanitized(mut self) -> Self {
        strip_reserved(&mut self.fields, &[ID_KEY]);
        self
    }
}

/// Represents a row of the `comments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub blog_id: String,
    pub comment: String,
    pub fields: sqlx::types::Json<Fields>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            data: NewComment {
                blog_id: record.blog_id,
                comment: record.comment,
                fields: record.fields.0,
            },
        }
    }
}
