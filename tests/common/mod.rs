#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{Router, http::HeaderValue};
use blog_server::{
    app::{AppState, build_app},
    auth::TokenService,
    error::AppError,
    models::{
        blog::{Blog, BlogPatch, BlogQuery, NewBlog},
        comment::{Comment, NewComment},
        result::{DeleteResult, InsertResult, UpdateResult},
        wishlist::{NewWishlistEntry, WishlistEntry},
    },
    store::{Store, memory::MemoryStore},
};
use serde_json::{Value, json};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";
pub const CLIENT_ORIGIN: &str = "http://localhost:5173";

/// Router backed by `store`, configured the way the binary configures it.
pub fn router_with(store: impl Store + 'static) -> Router {
    let state = AppState::new(store, TokenService::new(TEST_SECRET));
    build_app(state, HeaderValue::from_static(CLIENT_ORIGIN))
}

pub fn router() -> Router {
    router_with(MemoryStore::new())
}

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        Self::spawn_with(MemoryStore::new()).await
    }

    /// Serve the production router on an ephemeral port.
    pub async fn spawn_with(store: impl Store + 'static) -> Self {
        let app = router_with(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The `token=<value>` pair from a response's `Set-Cookie` header.
pub fn token_cookie(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("token="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Log in as `email` and return the cookie to send back.
pub async fn login(client: &reqwest::Client, server: &TestServer, email: &str) -> String {
    let res = client
        .post(server.url("/jwt"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), reqwest::StatusCode::OK);
    token_cookie(&res).expect("login did not set the token cookie")
}

pub fn blog(title: &str, category: &str, created_at: &str) -> Value {
    json!({
        "title": title,
        "category": category,
        "createdAt": created_at,
        "description": format!("{title} in depth")
    })
}

/// Insert a document through `path` and return its store-assigned id.
pub async fn insert(
    client: &reqwest::Client,
    server: &TestServer,
    path: &str,
    body: &Value,
) -> String {
    let res = client.post(server.url(path)).json(body).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["acknowledged"], true);
    body["insertedId"].as_str().unwrap().to_string()
}

pub fn titles(blogs: &Value) -> Vec<&str> {
    blogs
        .as_array()
        .unwrap()
        .iter()
        .map(|blog| blog["title"].as_str().unwrap())
        .collect()
}

/// Memory store that counts wishlist queries.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    pub wishlist_queries: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn queries(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.wishlist_queries)
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }

    async fn find_blogs(&self, query: &BlogQuery) -> Result<Vec<Blog>, AppError> {
        self.inner.find_blogs(query).await
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        self.inner.find_blog(id).await
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<InsertResult, AppError> {
        self.inner.insert_blog(blog).await
    }

    async fn upsert_blog(&self, id: Uuid, patch: BlogPatch) -> Result<UpdateResult, AppError> {
        self.inner.upsert_blog(id, patch).await
    }

    async fn find_comments(&self, blog_id: &str) -> Result<Vec<Comment>, AppError> {
        self.inner.find_comments(blog_id).await
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<InsertResult, AppError> {
        self.inner.insert_comment(comment).await
    }

    async fn find_wishlist(&self, email: &str) -> Result<Vec<WishlistEntry>, AppError> {
        self.wishlist_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.find_wishlist(email).await
    }

    async fn insert_wishlist_entry(
        &self,
        entry: NewWishlistEntry,
    ) -> Result<InsertResult, AppError> {
        self.inner.insert_wishlist_entry(entry).await
    }

    async fn delete_wishlist_entry(&self, id: Uuid) -> Result<DeleteResult, AppError> {
        self.inner.delete_wishlist_entry(id).await
    }
}
