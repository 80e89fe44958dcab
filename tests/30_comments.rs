mod common;

use anyhow::Result;
use common::{TestServer, insert};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn comments_are_listed_per_blog() -> Result<()> {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = insert(
        &client,
        &server,
        "/comments",
        &json!({ "blog_id": "blog-1", "comment": "first!", "userName": "Jane" }),
    )
    .await;
    insert(
        &client,
        &server,
        "/comments",
        &json!({ "blog_id": "blog-2", "comment": "elsewhere" }),
    )
    .await;
    insert(
        &client,
        &server,
        "/comments",
        &json!({ "blog_id": "blog-1", "comment": "second" }),
    )
    .await;

    let comments: Value = client
        .get(server.url("/comments/blog-1"))
        .send()
        .await?
        .json()
        .await?;

    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["_id"], json!(first));
    assert_eq!(comments[0]["comment"], "first!");
    assert_eq!(comments[0]["userName"], "Jane");
    assert_eq!(comments[1]["comment"], "second");
    Ok(())
}

#[tokio::test]
async fn blog_without_comments_has_an_empty_list() -> Result<()> {
    let server = TestServer::spawn().await;

    let res = reqwest::get(server.url("/comments/nobody-commented")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn comment_requires_a_blog_reference() -> Result<()> {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/comments"))
        .json(&json!({ "comment": "orphan" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
