//! Document store client.
//!
//! Handlers never talk to the database directly; they go through the
//! [`Store`] trait, which exposes the find/insert/update/delete primitives
//! over the three collections (blogs, comments, wishlist).
//!
//! - [`postgres::PgStore`]: PostgreSQL-backed store used by the server
//! - [`memory::MemoryStore`]: in-process store with the same semantics

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    blog::{Blog, BlogPatch, BlogQuery, NewBlog},
    comment::{Comment, NewComment},
    result::{DeleteResult, InsertResult, UpdateResult},
    wishlist::{NewWishlistEntry, WishlistEntry},
};

pub mod memory;
pub mod postgres;

/// Store handle shared by all request handlers.
pub type SharedStore = Arc<dyn Store>;

/// CRUD primitives over the blog, comment and wishlist collections.
///
/// Identifiers are assigned by the store on insert. Each method is a single
/// logical store operation; no guarantees span more than one call.
#[async_trait]
pub trait Store: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// List blog posts matching `query`.
    ///
    /// When `query.newest_first` is set the result is ordered by `createdAt`
    /// descending; the order among equal timestamps is unspecified.
    async fn find_blogs(&self, query: &BlogQuery) -> Result<Vec<Blog>, AppError>;

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, AppError>;

    async fn insert_blog(&self, blog: NewBlog) -> Result<InsertResult, AppError>;

    /// Merge `patch` into the post with `id`, creating it when absent.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the post does not exist and `patch` lacks a
    /// required field.
    async fn upsert_blog(&self, id: Uuid, patch: BlogPatch) -> Result<UpdateResult, AppError>;

    /// Comments whose `blog_id` equals `blog_id`, in insertion order.
    async fn find_comments(&self, blog_id: &str) -> Result<Vec<Comment>, AppError>;

    async fn insert_comment(&self, comment: NewComment) -> Result<InsertResult, AppError>;

    /// Wishlist entries owned by `email`, in insertion order.
    async fn find_wishlist(&self, email: &str) -> Result<Vec<WishlistEntry>, AppError>;

    async fn insert_wishlist_entry(
        &self,
        entry: NewWishlistEntry,
    ) -> Result<InsertResult, AppError>;

    async fn delete_wishlist_entry(&self, id: Uuid) -> Result<DeleteResult, AppError>;
}
