//! Session cookie authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Read the session token from the `token` cookie
//! 2. Verify its signature and expiry
//! 3. Inject the token's identity into the request
//! 4. Reject unauthenticated requests with HTTP 401

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

use crate::{app::AppState, auth::Identity, error::AppError};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Authentication context attached to authenticated requests.
///
/// Route handlers extract it with `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

/// Cookie carrying `value` with the attributes a cross-site client needs:
/// HTTP-only, `Secure`, `SameSite=None`, scoped to the whole site.
pub fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build()
}

/// Cookie that makes the browser drop the session cookie.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();
    cookie
}

/// Session authentication middleware function.
///
/// # Returns
///
/// - `Ok(Response)` if the cookie holds a valid token (calls next handler)
/// - `Err(AppError::Unauthorized)` if the cookie is missing, invalid or expired
pub async fn require_token(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let identity = state.tokens.verify(token)?;
    tracing::debug!(email = %identity.email, "authenticated request");

    // Route handlers can now extract this using Extension<AuthUser>
    request.extensions_mut().insert(AuthUser(identity));

    Ok(next.run(request).await)
}
