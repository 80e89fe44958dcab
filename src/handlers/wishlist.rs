//! HTTP handlers for the per-user wishlist.

use axum::{Extension, Json, extract::State};

use crate::{
    app::AppState,
    error::AppError,
    extract::{ApiJson, ApiQuery, DocumentId},
    middleware::auth::AuthUser,
    models::{
        result::{DeleteResult, InsertResult},
        wishlist::{NewWishlistEntry, WishlistEntry, WishlistQuery},
    },
};

/// List the wishlist of the authenticated user.
///
/// # Endpoint
///
/// `GET /wishlist?email=<owner>`
///
/// # Security
///
/// - Requires a valid session cookie (401 otherwise)
/// - `email` must equal the email in the session token (403 otherwise);
///   the store is not queried when it doesn't
pub async fn list_wishlist(
    State(state): State<AppState>,
    Extension(AuthUser(identity)): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<WishlistQuery>,
) -> Result<Json<Vec<WishlistEntry>>, AppError> {
    let email = query
        .email
        .filter(|email| *email == identity.email)
        .ok_or_else(|| {
            tracing::warn!(owner = %identity.email, "wishlist requested for another user");
            AppError::Forbidden
        })?;

    let entries = state.store.find_wishlist(&email).await?;

    Ok(Json(entries))
}

/// Add a post to a wishlist.
///
/// # Request Body
///
/// ```json
/// { "email": "jane@example.com", "blog_id": "550e8400-e29b-41d4-a716-446655440000" }
/// ```
pub async fn create_entry(
    State(state): State<AppState>,
    ApiJson(entry): ApiJson<NewWishlistEntry>,
) -> Result<Json<InsertResult>, AppError> {
    let result = state.store.insert_wishlist_entry(entry.sanitized()).await?;

    Ok(Json(result))
}

/// Remove a wishlist entry.
///
/// # Response
///
/// `{"acknowledged": true, "deletedCount": 1}`; `deletedCount` is 0 when the
/// entry did not exist.
pub async fn delete_entry(
    State(state): State<AppState>,
    DocumentId(id): DocumentId,
) -> Result<Json<DeleteResult>, AppError> {
    let result = state.store.delete_wishlist_entry(id).await?;

    Ok(Json(result))
}
