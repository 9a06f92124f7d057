//! Full request flows through the router, cookie included

use axum::http::{header::SET_COOKIE, StatusCode};
use library_server::{config::AppConfig, session::MemorySessionStore};
use tower_sessions::ExpiredDeletion;

use crate::common::{
    app, app_with_config, json, location, notices, Browser, InMemoryLibrary, ALICE, BOB,
};

fn browser(library: &InMemoryLibrary) -> Browser {
    Browser::new(app(library, &MemorySessionStore::new()))
}

#[tokio::test]
async fn test_member_journey() {
    let library = InMemoryLibrary::default();
    let mut browser = browser(&library);

    let response = browser.post_form("/register", ALICE).await;
    assert_eq!(location(&response), "/login");

    let page = json(browser.get("/login").await).await;
    assert_eq!(page["page"], "login");
    assert_eq!(notices(&page), vec!["Registration successful! Please log in."]);

    let response = browser
        .post_form("/login", "email=alice@example.com&password=pw123")
        .await;
    assert_eq!(location(&response), "/dashboard");

    let dashboard = json(browser.get("/dashboard").await).await;
    assert_eq!(dashboard["full_name"], "Alice Lastname");
    assert_eq!(dashboard["user"]["fname"], "Alice");
    assert_eq!(notices(&dashboard), vec!["Login successful!"]);

    let response = browser
        .post_form("/add_book", "title=Dune&author=Herbert&quantity=3")
        .await;
    assert_eq!(location(&response), "/dashboard");

    let catalog = json(browser.get("/books").await).await;
    let book = &catalog["books"][0];
    assert_eq!(book["title"], "Dune");
    assert_eq!(book["quantity"], 3);
    let book_id = book["id"].as_i64().unwrap();

    let response = browser
        .post_form(&format!("/borrow_book/{}", book_id), "")
        .await;
    assert_eq!(location(&response), "/borrowed_books");

    let borrowed = json(browser.get("/borrowed_books").await).await;
    let records = borrowed["borrowed_books"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["book_id"].as_i64(), Some(book_id));
    assert_eq!(records[0]["title"], "Dune");
    assert!(records[0]["borrowed_date"].is_string());
    assert_eq!(notices(&borrowed), vec!["Book borrowed successfully!"]);

    let response = browser.get("/logout").await;
    assert_eq!(location(&response), "/login");

    let response = browser.get("/dashboard").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_anonymous_borrow_is_sent_to_login() {
    let library = InMemoryLibrary::default();
    let mut browser = browser(&library);

    let response = browser.post_form("/borrow_book/1", "").await;
    assert_eq!(location(&response), "/login");
    assert_eq!(library.borrow_count().await, 0);

    let page = json(browser.get("/login").await).await;
    assert_eq!(notices(&page), vec!["Please log in to borrow books."]);
}

#[tokio::test]
async fn test_borrowing_unknown_book_redirects_to_catalog() {
    let library = InMemoryLibrary::default();
    let mut browser = browser(&library);
    browser.post_form("/register", ALICE).await;
    browser
        .post_form("/login", "email=alice@example.com&password=pw123")
        .await;

    let response = browser.post_form("/borrow_book/999", "").await;
    assert_eq!(location(&response), "/books");
    assert_eq!(library.borrow_count().await, 0);

    let catalog = json(browser.get("/books").await).await;
    assert!(notices(&catalog).contains(&"Book not found.".to_string()));
}

#[tokio::test]
async fn test_failed_login_sets_no_session() {
    let library = InMemoryLibrary::default();
    let sessions = MemorySessionStore::new();
    Browser::new(app(&library, &sessions))
        .post_form("/register", ALICE)
        .await;

    let mut browser = Browser::new(app(&library, &sessions));
    let response = browser
        .post_form("/login", "email=alice@example.com&password=wrong")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body = json(response).await;
    assert_eq!(body["error"], "InvalidCredentials");

    let response = browser.get("/dashboard").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_anonymous_browsing_stores_no_session() {
    let library = InMemoryLibrary::default();
    let sessions = MemorySessionStore::new();
    let mut browser = Browser::new(app(&library, &sessions));

    for uri in ["/", "/books", "/login", "/register"] {
        let response = browser.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none(), "{}", uri);
    }
    assert!(sessions.is_empty().await);
}

#[tokio::test]
async fn test_expired_login_notices_are_swept() {
    let library = InMemoryLibrary::default();
    let sessions = MemorySessionStore::new();
    let mut config = AppConfig::default();
    config.session.ttl_minutes = 0;
    let app = app_with_config(&library, &sessions, config);

    for _ in 0..50 {
        let response = Browser::new(app.clone()).get("/dashboard").await;
        assert_eq!(location(&response), "/login");
    }
    assert_eq!(sessions.len().await, 50);

    sessions.delete_expired().await.unwrap();
    assert!(sessions.is_empty().await);
}

#[tokio::test]
async fn test_borrow_without_date_is_listed_with_null_date() {
    let library = InMemoryLibrary::default();
    let mut browser = browser(&library);
    browser.post_form("/register", ALICE).await;
    browser
        .post_form("/login", "email=alice@example.com&password=pw123")
        .await;
    browser
        .post_form("/add_book", "title=Dune&author=Herbert&quantity=2")
        .await;

    library.insert_borrow(1, 1, None).await;
    browser.post_form("/borrow_book/1", "").await;

    let borrowed = json(browser.get("/borrowed_books").await).await;
    let records = borrowed["borrowed_books"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0]["borrowed_date"].is_string());
    assert!(records[1]
        .as_object()
        .unwrap()
        .contains_key("borrowed_date"));
    assert!(records[1]["borrowed_date"].is_null());
    assert_eq!(records[1]["title"], "Dune");
}

#[tokio::test]
async fn test_registration_errors() {
    let library = InMemoryLibrary::default();
    let mut browser = browser(&library);

    let response = browser
        .post_form(
            "/register",
            "fname=Alice&lname=Lastname&email=alice@example.com&password=pw123&repassword=nope&mobile=5551234",
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "PasswordMismatch");
    assert_eq!(library.user_count().await, 0);

    let response = browser.post_form("/register", "fname=Alice").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "BadValue");

    browser.post_form("/register", ALICE).await;
    let response = browser.post_form("/register", ALICE).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(library.user_count().await, 1);
}

#[tokio::test]
async fn test_add_book_requires_session_and_valid_quantity() {
    let library = InMemoryLibrary::default();
    let mut browser = browser(&library);

    let response = browser
        .post_form("/add_book", "title=Dune&author=Herbert&quantity=3")
        .await;
    assert_eq!(location(&response), "/login");

    browser.post_form("/register", ALICE).await;
    browser
        .post_form("/login", "email=alice@example.com&password=pw123")
        .await;

    let response = browser
        .post_form("/add_book", "title=Dune&author=Herbert&quantity=-1")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let catalog = json(browser.get("/books").await).await;
    assert!(catalog["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_each_member_sees_only_own_borrows() {
    let library = InMemoryLibrary::default();
    let sessions = MemorySessionStore::new();
    let mut alice = Browser::new(app(&library, &sessions));
    let mut bob = Browser::new(app(&library, &sessions));

    alice.post_form("/register", ALICE).await;
    bob.post_form("/register", BOB).await;
    alice
        .post_form("/login", "email=alice@example.com&password=pw123")
        .await;
    bob.post_form("/login", "email=bob@example.com&password=hunter2")
        .await;
    assert_ne!(alice.cookie(), bob.cookie());

    alice
        .post_form("/add_book", "title=Dune&author=Herbert&quantity=1")
        .await;
    alice.post_form("/borrow_book/1", "").await;

    let bobs = json(bob.get("/borrowed_books").await).await;
    assert!(bobs["borrowed_books"].as_array().unwrap().is_empty());

    let alices = json(alice.get("/borrowed_books").await).await;
    assert_eq!(alices["borrowed_books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_probes() {
    let library = InMemoryLibrary::default();
    let mut browser = browser(&library);

    let health = json(browser.get("/health").await).await;
    assert_eq!(health["status"], "healthy");

    let ready = json(browser.get("/ready").await).await;
    assert_eq!(ready["status"], "ready");
}
