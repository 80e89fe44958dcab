//! Comment HTTP handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    app::AppState,
    error::AppError,
    extract::ApiJson,
    models::{
        comment::{Comment, NewComment},
        result::InsertResult,
    },
};

/// List the comments of a blog post.
///
/// # Endpoint
///
/// `GET /comments/{id}` where `id` is the post's ID. The reference is matched
/// as a plain string; an unknown post simply has no comments.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state.store.find_comments(&blog_id).await?;

    Ok(Json(comments))
}

/// Add a comment.
///
/// # Request Body
///
/// ```json
/// { "blog_id": "550e8400-e29b-41d4-a716-446655440000", "comment": "Great read!" }
/// ```
pub async fn create_comment(
    State(state): State<AppState>,
    ApiJson(comment): ApiJson<NewComment>,
) -> Result<Json<InsertResult>, AppError> {
    let result = state.store.insert_comment(comment.sanitized()).await?;

    Ok(Json(result))
}
