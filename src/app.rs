//! Application state and HTTP router.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    auth::TokenService,
    handlers,
    middleware,
    store::{SharedStore, Store},
};

/// State shared by every handler.
///
/// Built once at startup and cloned (cheaply) into each request.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: impl Store + 'static, tokens: TokenService) -> Self {
        Self {
            store: Arc::new(store),
            tokens,
        }
    }
}

/// Build the router with all routes and middleware.
///
/// `client_origin` is the only origin allowed to make credentialed
/// cross-origin requests; other origins get no `Access-Control-Allow-Origin`.
pub fn build_app(state: AppState, client_origin: HeaderValue) -> Router {
    // Routes that need a valid session cookie
    let authenticated_routes = Router::new()
        .route("/wishlist", get(handlers::wishlist::list_wishlist))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_token,
        ));

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([client_origin]))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::health::liveness))
        .route("/health", get(handlers::health::health_check))
        // Session routes
        .route("/jwt", post(handlers::session::issue_token))
        .route("/logout", post(handlers::session::logout))
        // Blog routes
        .route(
            "/blogs",
            get(handlers::blogs::latest_blogs).post(handlers::blogs::create_blog),
        )
        .route("/allblogs", post(handlers::blogs::blogs_by_category))
        .route("/allblogs/{id}", get(handlers::blogs::get_blog))
        .route("/featuredblogs", get(handlers::blogs::featured_blogs))
        .route("/updatedblogs/{id}", put(handlers::blogs::update_blog))
        // Comment routes
        .route("/comments", post(handlers::comments::create_comment))
        .route("/comments/{id}", get(handlers::comments::list_comments))
        // Wishlist routes (listing is merged in with authentication)
        .route("/wishlist", post(handlers::wishlist::create_entry))
        .route("/wishlist/{id}", delete(handlers::wishlist::delete_entry))
        .merge(authenticated_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
