//! Session endpoints: issue a token cookie on login, clear it on logout.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::{
    app::AppState,
    auth::Identity,
    error::AppError,
    extract::ApiJson,
    middleware::auth::{removal_cookie, session_cookie},
};

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    fn success() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Issue a session token for the posted identity.
///
/// # Endpoint
///
/// `POST /jwt`
///
/// # Request Body
///
/// ```json
/// { "email": "jane@example.com" }
/// ```
///
/// The identity is signed as sent; nothing checks it against a user store.
///
/// # Response
///
/// `{"success": true}` with a `Set-Cookie: token=...; HttpOnly; Secure; SameSite=None` header.
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(identity): ApiJson<Identity>,
) -> Result<(CookieJar, Json<Ack>), AppError> {
    let identity = identity.sanitized();
    let token = state.tokens.issue(&identity)?;
    tracing::info!(email = %identity.email, "issued session token");

    Ok((jar.add(session_cookie(token)), Ack::success()))
}

/// Clear the session cookie.
///
/// # Endpoint
///
/// `POST /logout`
///
/// The token itself stays valid until it expires; only the cookie goes away.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Ack>) {
    tracing::info!("clearing session cookie");
    (jar.add(removal_cookie()), Ack::success())
}
