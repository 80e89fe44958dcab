//! Blog post HTTP handlers.
//!
//! This module implements the blog-related API endpoints:
//! - POST /allblogs - List posts of a category (or all), newest first
//! - GET /featuredblogs - List every post in store order
//! - GET /blogs - List the latest posts
//! - GET /allblogs/{id} - Get a post by ID
//! - PUT /updatedblogs/{id} - Merge fields into a post, creating it if absent
//! - POST /blogs - Create a post

use axum::{Json, extract::State};

use crate::{
    app::AppState,
    error::AppError,
    extract::{ApiJson, DocumentId},
    models::{
        blog::{Blog, BlogFilter, BlogPatch, BlogQuery, CategoryRequest, NewBlog},
        result::{InsertResult, UpdateResult},
    },
};

/// List posts of the selected category, newest first.
///
/// # Request Body
///
/// ```json
/// { "selectedCategory": "tech" }
/// ```
///
/// `"all"` selects every category.
pub async fn blogs_by_category(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CategoryRequest>,
) -> Result<Json<Vec<Blog>>, AppError> {
    let query = BlogQuery::newest(BlogFilter::from(request));
    let blogs = state.store.find_blogs(&query).await?;

    Ok(Json(blogs))
}

/// List every post, unsorted.
pub async fn featured_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, AppError> {
    let blogs = state.store.find_blogs(&BlogQuery::all()).await?;

    Ok(Json(blogs))
}

/// List the most recently created posts (at most `LATEST_LIMIT`).
pub async fn latest_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, AppError> {
    let blogs = state.store.find_blogs(&BlogQuery::latest()).await?;

    Ok(Json(blogs))
}

/// Get a specific post by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the post
/// - **Error (400)**: ID is not a valid identifier
/// - **Error (404)**: No post with that ID
pub async fn get_blog(
    State(state): State<AppState>,
    DocumentId(id): DocumentId,
) -> Result<Json<Blog>, AppError> {
    let blog = state
        .store
        .find_blog(id)
        .await?
        .ok_or(AppError::NotFound("blog"))?;

    Ok(Json(blog))
}

/// Merge the posted fields into a post.
///
/// # Endpoint
///
/// `PUT /updatedblogs/{id}`
///
/// Only supplied fields change. When no post has this ID a new one is created
/// under it, which requires `title`, `category` and `createdAt`.
///
/// # Response
///
/// ```json
/// {
///   "acknowledged": true,
///   "matchedCount": 1,
///   "modifiedCount": 1,
///   "upsertedCount": 0,
///   "upsertedId": null
/// }
/// ```
pub async fn update_blog(
    State(state): State<AppState>,
    DocumentId(id): DocumentId,
    ApiJson(patch): ApiJson<BlogPatch>,
) -> Result<Json<UpdateResult>, AppError> {
    let result = state.store.upsert_blog(id, patch.sanitized()).await?;

    if let Some(upserted) = result.upserted_id {
        tracing::info!(id = %upserted, "created blog through update");
    }

    Ok(Json(result))
}

/// Create a new post.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Async Rust in practice",
///   "category": "tech",
///   "createdAt": "2025-12-20T10:00:00Z",
///   "image": "https://example.com/cover.png"
/// }
/// ```
///
/// # Response
///
/// `{"acknowledged": true, "insertedId": "<id>"}`
pub async fn create_blog(
    State(state): State<AppState>,
    ApiJson(blog): ApiJson<NewBlog>,
) -> Result<Json<InsertResult>, AppError> {
    let result = state.store.insert_blog(blog.sanitized()).await?;
    tracing::info!(id = %result.inserted_id, "created blog");

    Ok(Json(result))
}
