//! Blog backend: REST API over blog posts, comments and per-user wishlists,
//! with cookie-based session tokens guarding the wishlist listing.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Store**: document collections behind the [`store::Store`] trait,
//!   backed by PostgreSQL with sqlx
//! - **Authentication**: HS256 JWT in an HTTP-only cookie
//! - **Format**: JSON requests/responses

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;
