//! Wishlist data models.
//!
//! A wishlist entry ties an owner email to a blog post. Owners can only list
//! their own entries; see `handlers::wishlist`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Fields, ID_KEY, strip_reserved};

/// A stored wishlist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(flatten)]
    pub data: NewWishlistEntry,
}

/// Request body for `POST /wishlist`.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "blog_id": "550e8400-e29b-41d4-a716-446655440000",
///   "title": "Async Rust in practice"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWishlistEntry {
    /// Owner of the entry
    pub email: String,

    pub blog_id: String,

    #[serde(flatten)]
    pub fields: Fields,
}

impl NewWishlistEntry {
    pub fn sanitized(mut self) -> Self {
        strip_reserved(&mut self.fields, &[ID_KEY]);
        self
    }
}

/// Query string of `GET /wishlist`.
///
/// `email` is optional at the extractor level so that a missing value is
/// reported as forbidden rather than as a malformed request.
#[derive(Debug, Deserialize)]
pub struct WishlistQuery {
    pub email: Option<String>,
}

/// Represents a row of the `wishlist` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WishlistRecord {
    pub id: Uuid,
    pub email: String,
    pub blog_id: String,
    pub fields: sqlx::types::Json<Fields>,
}

impl From<WishlistRecord> for WishlistEntry {
    fn from(record: WishlistRecord) -> Self {
        Self {
            id: record.id,
            data: NewWishlistEntry {
                email: record.email,
                blog_id: record.blog_id,
                fields: record.fields.0,
            },
        }
    }
}
