//! Blog post data models and API request/response types.
//!
//! This module defines:
//! - `Blog`: a stored blog post with its store-assigned identifier
//! - `NewBlog`: request body for creating blog posts
//! - `BlogPatch`: request body for merging fields into a blog post
//! - `BlogFilter`: category selection for listings
//! - `BlogRecord`: database row representation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Fields, ID_KEY, strip_reserved};
use crate::error::AppError;

/// Category value that selects every blog post.
pub const ALL_CATEGORIES: &str = "all";

/// Number of posts returned by the "latest blogs" listing.
pub const LATEST_LIMIT: usize = 6;

/// A blog post as stored and returned to clients.
///
/// # JSON Example
///
/// ```json
/// {
///   "_id": "550e8400-e29b-41d4-a716-446655440000",
///   "title": "Async Rust in practice",
///   "category": "tech",
///   "createdAt": "2025-12-20T10:00:00Z",
///   "image": "https://example.com/cover.png"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(flatten)]
    pub data: NewBlog,
}

/// Request body for creating a blog post.
///
/// # Validation
///
/// - `title`, `category`: required strings
/// - `createdAt`: required RFC 3339 timestamp
/// - any other field is stored verbatim
///
/// `createdAt` is kept as an instant, not as text: it is read back in UTC
/// with seconds precision or finer, so `2025-01-01T16:00:00.000+06:00`
/// comes back as `2025-01-01T10:00:00Z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBlog {
    pub title: String,

    /// Opaque category, only ever compared for equality
    pub category: String,

    /// Creation time; every listing sorts on it, newest first
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub fields: Fields,
}

impl NewBlog {
    /// Remove client-supplied keys that collide with store-managed ones.
    pub fn sanitized(mut self) -> Self {
        strip_reserved(&mut self.fields, &[ID_KEY]);
        self
    }
}

/// Request body for `PUT /updatedblogs/:id`.
///
/// Every field is optional; supplied fields replace the stored values and
/// free-form keys are merged into the stored document one key at a time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlogPatch {
    pub title: Option<String>,

    pub category: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub fields: Fields,
}

impl BlogPatch {
    pub fn sanitized(mut self) -> Self {
        strip_reserved(&mut self.fields, &[ID_KEY]);
        self
    }

    /// Turn the patch into a complete blog post for the upsert-insert path.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` naming the first required field that is missing.
    pub fn into_new_blog(self) -> Result<NewBlog, AppError> {
        let missing = |name: &str| AppError::InvalidRequest(format!("missing field `{name}`"));

        Ok(NewBlog {
            title: self.title.ok_or_else(|| missing("title"))?,
            category: self.category.ok_or_else(|| missing("category"))?,
            created_at: self.created_at.ok_or_else(|| missing("createdAt"))?,
            fields: self.fields,
        })
    }
}

impl Blog {
    /// Merge a patch into this post, returning whether anything changed.
    pub fn apply(&mut self, patch: BlogPatch) -> bool {
        let before = self.clone();

        if let Some(title) = patch.title {
            self.data.title = title;
        }
        if let Some(category) = patch.category {
            self.data.category = category;
        }
        if let Some(created_at) = patch.created_at {
            self.data.created_at = created_at;
        }
        self.data.fields.extend(patch.fields);

        *self != before
    }
}

/// Request body for `POST /allblogs`.
///
/// ```json
/// { "selectedCategory": "tech" }
/// ```
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(rename = "selectedCategory")]
    pub selected_category: String,
}

/// Which blog posts a listing selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogFilter {
    All,
    Category(String),
}

impl From<CategoryRequest> for BlogFilter {
    fn from(request: CategoryRequest) -> Self {
        if request.selected_category == ALL_CATEGORIES {
            BlogFilter::All
        } else {
            BlogFilter::Category(request.selected_category)
        }
    }
}

impl BlogFilter {
    pub fn matches(&self, blog: &Blog) -> bool {
        match self {
            BlogFilter::All => true,
            BlogFilter::Category(category) => blog.data.category == *category,
        }
    }
}

/// How a blog listing is filtered, ordered and truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    pub filter: BlogFilter,

    /// Sort by `createdAt`, newest first; otherwise store order
    pub newest_first: bool,

    pub limit: Option<usize>,
}

impl BlogQuery {
    /// Every post in store order.
    pub fn all() -> Self {
        Self {
            filter: BlogFilter::All,
            newest_first: false,
            limit: None,
        }
    }

    /// Posts matching `filter`, newest first.
    pub fn newest(filter: BlogFilter) -> Self {
        Self {
            filter,
            newest_first: true,
            limit: None,
        }
    }

    /// The `LATEST_LIMIT` most recently created posts.
    pub fn latest() -> Self {
        Self {
            limit: Some(LATEST_LIMIT),
            ..Self::newest(BlogFilter::All)
        }
    }
}

/// Represents a row of the `blogs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRecord {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub fields: sqlx::types::Json<Fields>,
}

impl From<BlogRecord> for Blog {
    fn from(record: BlogRecord) -> Self {
        Self {
            id: record.id,
            data: NewBlog {
                title: record.title,
                category: record.category,
                created_at: record.created_at,
                fields: record.fields.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_blog_keeps_free_form_fields() {
        let blog: NewBlog = serde_json::from_value(json!({
            "_id": "client-chosen",
            "title": "A",
            "category": "tech",
            "createdAt": "2025-01-01T00:00:00Z",
            "image": "cover.png"
        }))
        .unwrap();
        let blog = blog.sanitized();

        assert_eq!(blog.title, "A");
        assert_eq!(blog.fields.get("image"), Some(&json!("cover.png")));
        assert!(!blog.fields.contains_key("_id"));
    }

    #[test]
    fn blog_serializes_with_store_id() {
        let id = Uuid::new_v4();
        let blog = Blog {
            id,
            data: serde_json::from_value(json!({
                "title": "A",
                "category": "tech",
                "createdAt": "2025-01-01T00:00:00Z",
                "body": "text"
            }))
            .unwrap(),
        };

        let value = serde_json::to_value(&blog).unwrap();
        assert_eq!(value["_id"], json!(id.to_string()));
        assert_eq!(value["createdAt"], json!("2025-01-01T00:00:00Z"));
        assert_eq!(value["body"], json!("text"));
    }

    #[test]
    fn created_at_is_normalized_to_utc() {
        let blog: NewBlog = serde_json::from_value(json!({
            "title": "A",
            "category": "tech",
            "createdAt": "2025-01-01T16:00:00.000+06:00"
        }))
        .unwrap();

        let value = serde_json::to_value(&blog).unwrap();
        assert_eq!(value["createdAt"], json!("2025-01-01T10:00:00Z"));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result = serde_json::from_value::<NewBlog>(json!({
            "title": "A",
            "createdAt": "2025-01-01T00:00:00Z"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn patch_merges_supplied_fields_only() {
        let mut blog = Blog {
            id: Uuid::new_v4(),
            data: serde_json::from_value(json!({
                "title": "A",
                "category": "tech",
                "createdAt": "2025-01-01T00:00:00Z",
                "body": "old",
                "image": "a.png"
            }))
            .unwrap(),
        };
        let patch: BlogPatch = serde_json::from_value(json!({
            "title": "A2",
            "body": "new"
        }))
        .unwrap();

        assert!(blog.apply(patch));
        assert_eq!(blog.data.title, "A2");
        assert_eq!(blog.data.category, "tech");
        assert_eq!(blog.data.fields.get("body"), Some(&json!("new")));
        assert_eq!(blog.data.fields.get("image"), Some(&json!("a.png")));
    }

    #[test]
    fn incomplete_patch_cannot_create_a_blog() {
        let patch: BlogPatch = serde_json::from_value(json!({ "title": "A" })).unwrap();

        match patch.into_new_blog() {
            Err(AppError::InvalidRequest(msg)) => assert!(msg.contains("category")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn all_selects_every_category() {
        let filter = BlogFilter::from(CategoryRequest {
            selected_category: "all".to_string(),
        });
        assert_eq!(filter, BlogFilter::All);

        let filter = BlogFilter::from(CategoryRequest {
            selected_category: "travel".to_string(),
        });
        assert_eq!(filter, BlogFilter::Category("travel".to_string()));
    }
}
