//! In-process document store.
//!
//! Keeps every collection in insertion order behind a tokio `RwLock`. It
//! follows the same filtering, ordering and merge rules as [`PgStore`], which
//! makes it a drop-in store for exercising the HTTP layer without a database.
//!
//! [`PgStore`]: super::postgres::PgStore

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::AppError;
use crate::models::{
    blog::{Blog, BlogPatch, BlogQuery, NewBlog},
    comment::{Comment, NewComment},
    result::{DeleteResult, InsertResult, UpdateResult},
    wishlist::{NewWishlistEntry, WishlistEntry},
};

#[derive(Debug, Default)]
struct Collections {
    blogs: Vec<Blog>,
    comments: Vec<Comment>,
    wishlist: Vec<WishlistEntry>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_blogs(&self, query: &BlogQuery) -> Result<Vec<Blog>, AppError> {
        let collections = self.collections.read().await;

        let mut blogs: Vec<Blog> = collections
            .blogs
            .iter()
            .filter(|blog| query.filter.matches(blog))
            .cloned()
            .collect();

        if query.newest_first {
            blogs.sort_by(|a, b| b.data.created_at.cmp(&a.data.created_at));
        }
        if let Some(limit) = query.limit {
            blogs.truncate(limit);
        }

        Ok(blogs)
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections.blogs.iter().find(|blog| blog.id == id).cloned())
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<InsertResult, AppError> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .await
            .blogs
            .push(Blog { id, data: blog });

        Ok(InsertResult::new(id))
    }

    async fn upsert_blog(&self, id: Uuid, patch: BlogPatch) -> Result<UpdateResult, AppError> {
        let mut collections = self.collections.write().await;

        if let Some(blog) = collections.blogs.iter_mut().find(|blog| blog.id == id) {
            let modified = blog.apply(patch);
            return Ok(UpdateResult::matched(modified));
        }

        let data = patch.into_new_blog()?;
        collections.blogs.push(Blog { id, data });

        Ok(UpdateResult::upserted(id))
    }

    async fn find_comments(&self, blog_id: &str) -> Result<Vec<Comment>, AppError> {
        let collections = self.collections.read().await;

        Ok(collections
            .comments
            .iter()
            .filter(|comment| comment.data.blog_id == blog_id)
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<InsertResult, AppError> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .await
            .comments
            .push(Comment { id, data: comment });

        Ok(InsertResult::new(id))
    }

    async fn find_wishlist(&self, email: &str) -> Result<Vec<WishlistEntry>, AppError> {
        let collections = self.collections.read().await;

        Ok(collections
            .wishlist
            .iter()
            .filter(|entry| entry.data.email == email)
            .cloned()
            .collect())
    }

    async fn insert_wishlist_entry(
        &self,
        entry: NewWishlistEntry,
    ) -> Result<InsertResult, AppError> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .await
            .wishlist
            .push(WishlistEntry { id, data: entry });

        Ok(InsertResult::new(id))
    }

    async fn delete_wishlist_entry(&self, id: Uuid) -> Result<DeleteResult, AppError> {
        let mut collections = self.collections.write().await;

        let before = collections.wishlist.len();
        collections.wishlist.retain(|entry| entry.id != id);
        let deleted = (before - collections.wishlist.len()) as u64;

        Ok(DeleteResult::new(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blog::BlogFilter;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::Map;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    fn blog(title: &str, category: &str, seconds: i64) -> NewBlog {
        NewBlog {
            title: title.to_string(),
            category: category.to_string(),
            created_at: at(seconds),
            fields: Map::new(),
        }
    }

    fn titles(blogs: &[Blog]) -> Vec<&str> {
        blogs.iter().map(|blog| blog.data.title.as_str()).collect()
    }

    #[tokio::test]
    async fn newest_first_orders_by_creation_time() {
        let store = MemoryStore::new();
        store.insert_blog(blog("old", "tech", 1)).await.unwrap();
        store.insert_blog(blog("new", "tech", 3)).await.unwrap();
        store.insert_blog(blog("mid", "food", 2)).await.unwrap();

        let all = store
            .find_blogs(&BlogQuery::newest(BlogFilter::All))
            .await
            .unwrap();
        assert_eq!(titles(&all), ["new", "mid", "old"]);

        let unsorted = store.find_blogs(&BlogQuery::all()).await.unwrap();
        assert_eq!(titles(&unsorted), ["old", "new", "mid"]);

        let tech = store
            .find_blogs(&BlogQuery::newest(BlogFilter::Category("tech".into())))
            .await
            .unwrap();
        assert_eq!(titles(&tech), ["new", "old"]);
    }

    #[tokio::test]
    async fn latest_is_capped_to_the_newest_posts() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store
                .insert_blog(blog(&format!("post-{i}"), "tech", i))
                .await
                .unwrap();
        }

        let latest = store.find_blogs(&BlogQuery::latest()).await.unwrap();
        assert_eq!(
            titles(&latest),
            ["post-9", "post-8", "post-7", "post-6", "post-5", "post-4"]
        );
    }

    #[tokio::test]
    async fn upsert_creates_then_merges() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        let created = store
            .upsert_blog(
                id,
                BlogPatch {
                    title: Some("A".into()),
                    category: Some("tech".into()),
                    created_at: Some(at(0)),
                    ..BlogPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created, UpdateResult::upserted(id));

        let merged = store
            .upsert_blog(
                id,
                BlogPatch {
                    category: Some("travel".into()),
                    ..BlogPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(merged, UpdateResult::matched(true));

        let unchanged = store
            .upsert_blog(
                id,
                BlogPatch {
                    category: Some("travel".into()),
                    ..BlogPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(unchanged, UpdateResult::matched(false));

        let blog = store.find_blog(id).await.unwrap().unwrap();
        assert_eq!(blog.data.title, "A");
        assert_eq!(blog.data.category, "travel");
    }

    #[tokio::test]
    async fn delete_reports_how_many_entries_went() {
        let store = MemoryStore::new();
        let inserted = store
            .insert_wishlist_entry(NewWishlistEntry {
                email: "a@example.com".into(),
                blog_id: "b1".into(),
                fields: Map::new(),
            })
            .await
            .unwrap();

        let first = store
            .delete_wishlist_entry(inserted.inserted_id)
            .await
            .unwrap();
        let second = store
            .delete_wishlist_entry(inserted.inserted_id)
            .await
            .unwrap();

        assert_eq!(first.deleted_count, 1);
        assert_eq!(second.deleted_count, 0);
        assert!(store.find_wishlist("a@example.com").await.unwrap().is_empty());
    }
}
