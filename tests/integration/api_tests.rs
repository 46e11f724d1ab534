//! Integration tests against a running server
//!
//! Start the server with a migrated database, then run:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header")
        .to_string()
}

/// Create an author and return its detail path
async fn create_author(client: &Client, first: &str, family: &str) -> String {
    let response = client
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", first), ("family_name", family)])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    location(&response)
}

fn id_of(path: &str) -> String {
    path.rsplit('/').next().expect("No id in path").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let response = client()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_catalog_home() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.expect("Failed to read body");
    assert!(html.contains("Copies available:"));
}

#[tokio::test]
#[ignore]
async fn test_create_author_and_view_detail() {
    let client = client();
    let path = create_author(&client, "Jane", "Austen").await;
    assert!(path.starts_with("/catalog/author/"));

    let html = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(html.contains("Austen , Jane"));
}

#[tokio::test]
#[ignore]
async fn test_invalid_author_is_shown_again() {
    let response = client()
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", "Jane"), ("family_name", "   ")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.expect("Failed to read body");
    assert!(html.contains("Family name must be specified."));
    assert!(html.contains(r#"value="Jane""#));
}

#[tokio::test]
#[ignore]
async fn test_author_with_book_cannot_be_deleted() {
    let client = client();
    let author_path = create_author(&client, "Charlotte", "Bronte").await;
    let author_id = id_of(&author_path);

    let response = client
        .post(format!("{}/catalog/book/create", BASE_URL))
        .form(&[
            ("title", "Jane Eyre"),
            ("author", author_id.as_str()),
            ("summary", "An orphan becomes a governess."),
            ("isbn", "9780141441146"),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let book_path = location(&response);

    let response = client
        .post(format!("{}{}/delete", BASE_URL, author_path))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .text()
        .await
        .expect("Failed to read body")
        .contains("Delete the following books"));

    // Remove the book, then the author goes too
    let response = client
        .post(format!("{}{}/delete", BASE_URL, book_path))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .post(format!("{}{}/delete", BASE_URL, author_path))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .get(format!("{}{}", BASE_URL, author_path))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_genre_redirects_to_existing() {
    let client = client();
    let create = |name: &'static str| {
        client
            .post(format!("{}/catalog/genre/create", BASE_URL))
            .form(&[("name", name)])
            .send()
    };

    let first = create("Integration Poetry").await.expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    let second = create("integration poetry").await.expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::SEE_OTHER);

    assert_eq!(location(&first), location(&second));
}

#[tokio::test]
#[ignore]
async fn test_unknown_book_is_not_found() {
    let response = client()
        .get(format!("{}/catalog/book/2147483647", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
