//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Runs one or two store operations
//! 3. Returns HTTP response (JSON, status code)

/// Blog post endpoints
pub mod blogs;
/// Comment endpoints
pub mod comments;
/// Liveness and store connectivity
pub mod health;
/// Session token issue and logout
pub mod session;
/// Wishlist endpoints
pub mod wishlist;
