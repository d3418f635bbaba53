//! API integration tests
//!
//! These run against a live server with an empty-ish database.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Unique ISBN so reruns against the same database do not collide on the
/// unique key. Kept short: the column is VARCHAR(20).
fn unique_isbn() -> String {
    format!("978-{}", nanos() % 10_000_000_000)
}

/// Unique email, same reasoning
fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.org", prefix, nanos())
}

/// Helper to create a book and return its ID
async fn create_book(client: &Client, title: &str, isbn: &str, copies: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "isbn": isbn,
            "publication_year": 2020,
            "copies_available": copies
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book response");
    body["book_id"].as_i64().expect("No book ID")
}

/// Helper to register a patron and return their ID
async fn create_patron(client: &Client, email: &str) -> i64 {
    let response = client
        .post(format!("{}/patrons", BASE_URL))
        .json(&json!({
            "first_name": "Test",
            "last_name": "Patron",
            "email": email,
            "phone": "555-0100"
        }))
        .send()
        .await
        .expect("Failed to send create patron request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse patron response");
    body["patron_id"].as_i64().expect("No patron ID")
}

/// Helper to fetch a book's copies_available
async fn copies_available(client: &Client, book_id: i64) -> i64 {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send get book request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse book response");
    body["copies_available"].as_i64().expect("No copies count")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
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
async fn test_book_crud() {
    let client = Client::new();
    let book_id = create_book(&client, "CRUD Test Book", &unique_isbn(), 2).await;

    // Find by title substring
    let response = client
        .get(format!("{}/books?title=CRUD Test", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["book_id"].as_i64() == Some(book_id)));

    // Patch update: only the author changes
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "author": "Renamed Author" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"], "Renamed Author");
    assert_eq!(body["title"], "CRUD Test Book");

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Now absent
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_rejected() {
    let client = Client::new();
    let dup_isbn = unique_isbn();
    let book_id = create_book(&client, "First Edition", &dup_isbn, 1).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Second Edition",
            "author": "Test Author",
            "isbn": &dup_isbn
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_patron_crud() {
    let client = Client::new();
    let patron_id = create_patron(&client, &unique_email("crud.patron")).await;

    // Search by name substring matches first or last name
    let response = client
        .get(format!("{}/patrons?name=Patro", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["patron_id"].as_i64() == Some(patron_id)));

    // Update phone only; registration date must be untouched
    let before: Value = client
        .get(format!("{}/patrons/{}", BASE_URL, patron_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = client
        .put(format!("{}/patrons/{}", BASE_URL, patron_id))
        .json(&json!({ "phone": "555-0199" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let after: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(after["phone"], "555-0199");
    assert_eq!(after["registration_date"], before["registration_date"]);

    // Delete
    let response = client
        .delete(format!("{}/patrons/{}", BASE_URL, patron_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_borrow_return_round_trip() {
    let client = Client::new();
    let book_id = create_book(&client, "Round Trip", &unique_isbn(), 1).await;
    let patron_id = create_patron(&client, &unique_email("roundtrip")).await;

    // Borrow: copies drop to 0
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": patron_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let record_id = body["record_id"].as_i64().expect("No record ID");
    assert!(body["due_date"].is_string());
    assert_eq!(copies_available(&client, book_id).await, 0);

    // Second borrow on the same book: no copies left
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": patron_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
    assert_eq!(copies_available(&client, book_id).await, 0);

    // The open record shows up in the active list
    let response = client
        .get(format!("{}/loans/active", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["record"]["record_id"].as_i64() == Some(record_id)));

    // Return: copies restored
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, record_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    assert_eq!(copies_available(&client, book_id).await, 1);

    // Returning twice fails and does not double-increment
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, record_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
    assert_eq!(copies_available(&client, book_id).await, 1);

    // A third borrow now succeeds again
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": patron_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_borrow_unknown_ids() {
    let client = Client::new();
    let book_id = create_book(&client, "Unknown Ids", &unique_isbn(), 1).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": 999999, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Failed borrow must not touch the inventory
    assert_eq!(copies_available(&client, book_id).await, 1);

    let patron_id = create_patron(&client, &unique_email("unknownids")).await;
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": patron_id, "book_id": 999999 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_referenced_book_cannot_be_deleted() {
    let client = Client::new();
    let book_id = create_book(&client, "Referenced Book", &unique_isbn(), 1).await;
    let patron_id = create_patron(&client, &unique_email("referenced")).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": patron_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let record_id = body["record_id"].as_i64().expect("No record ID");

    // Delete blocked while a record references the book
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The book is still there
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Even a closed record keeps the patron undeletable
    let _ = client
        .post(format!("{}/loans/{}/return", BASE_URL, record_id))
        .send()
        .await;

    let response = client
        .delete(format!("{}/patrons/{}", BASE_URL, patron_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_patron_history() {
    let client = Client::new();
    let book_id = create_book(&client, "History Book", &unique_isbn(), 2).await;
    let patron_id = create_patron(&client, &unique_email("history")).await;

    // One closed loan, one open
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": patron_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let first_record = body["record_id"].as_i64().expect("No record ID");

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, first_record))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "patron_id": patron_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/patrons/{}/loans", BASE_URL, patron_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);

    let returned = records
        .iter()
        .find(|r| r["record"]["record_id"].as_i64() == Some(first_record))
        .expect("Closed record missing from history");
    assert_eq!(returned["status"], "RETURNED");
    assert!(returned["status_label"]
        .as_str()
        .unwrap()
        .starts_with("RETURNED on "));

    let open = records
        .iter()
        .find(|r| r["record"]["record_id"].as_i64() != Some(first_record))
        .expect("Open record missing from history");
    assert_eq!(open["status"], "ACTIVE");
    assert!(open["days_remaining"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_history_for_unknown_patron() {
    let client = Client::new();

    let response = client
        .get(format!("{}/patrons/999999/loans", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_book_validation() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "author": "Someone"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Negative Copies",
            "author": "Someone",
            "copies_available": -1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}
