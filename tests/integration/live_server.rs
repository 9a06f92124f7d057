//! Tests against a running server backed by PostgreSQL.
//! Run with: cargo test -- --ignored

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore]
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
async fn test_register_login_borrow() {
    let client = client();
    let email = format!("live-{}@example.com", uuid::Uuid::new_v4());

    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("fname", "Live"),
            ("lname", "Tester"),
            ("email", email.as_str()),
            ("password", "pw123"),
            ("repassword", "pw123"),
            ("mobile", "5550000"),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("email", email.as_str()), ("password", "pw123")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    client
        .post(format!("{}/add_book", BASE_URL))
        .form(&[("title", "Dune"), ("author", "Herbert"), ("quantity", "3")])
        .send()
        .await
        .expect("Failed to send request");

    let catalog: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = catalog["books"]
        .as_array()
        .and_then(|books| books.last())
        .and_then(|book| book["id"].as_i64())
        .expect("No book in catalog");

    let response = client
        .post(format!("{}/borrow_book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let borrowed: Value = client
        .get(format!("{}/borrowed_books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(borrowed["borrowed_books"]
        .as_array()
        .expect("No borrowed_books")
        .iter()
        .any(|record| record["book_id"].as_i64() == Some(book_id)));
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let response = client()
        .post(format!("{}/login", BASE_URL))
        .form(&[("email", "nobody@example.com"), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_dashboard_redirects() {
    let response = client()
        .get(format!("{}/dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
