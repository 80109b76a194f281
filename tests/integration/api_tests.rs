//! API integration tests against a running server and database

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a fresh account and return (user id, bearer token)
async fn register_and_login(client: &Client) -> (String, String) {
    let email = format!("reader-{}@example.com", Uuid::new_v4());
    let password = "correct horse battery";

    let response = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);
    let user: Value = response.json().await.expect("Failed to parse user");
    assert!(user.get("password").is_none());

    let response = client
        .post(format!("{}/users/token", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send token request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse token");
    assert_eq!(body["token_type"], "Bearer");

    (
        user["id"].as_str().expect("No user ID").to_string(),
        body["user_token"].as_str().expect("No token").to_string(),
    )
}

async fn post(client: &Client, token: &str, path: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

/// Create an author, a category and a book with the given stock; returns the book
async fn create_book(client: &Client, token: &str, copies: i32) -> Value {
    let author: Value = post(
        client,
        token,
        "/authors",
        json!({ "first_name": "Ursula", "last_name": "Le Guin" }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse author");

    let category: Value = post(
        client,
        token,
        "/categories",
        json!({ "name": format!("Category {}", Uuid::new_v4()) }),
    )
    .await
    .json()
    .await
    .expect("Failed to parse category");

    let response = post(
        client,
        token,
        "/books",
        json!({
            "title": format!("A Wizard of Earthsea {}", Uuid::new_v4()),
            "author_id": author["id"],
            "category_id": category["id"],
            "published_year": 1968,
            "copies_available": copies
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book")
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
async fn test_duplicate_registration() {
    let client = Client::new();
    let email = format!("dup-{}@example.com", Uuid::new_v4());
    let payload = json!({ "email": email, "password": "long enough" });

    let first = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/users/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 400);
    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User with this email already exists.");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users/token", BASE_URL))
        .json(&json!({ "email": "nobody@example.com", "password": "wrong password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let (user_id, token) = register_and_login(&client).await;

    let response = client
        .get(format!("{}/users/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], user_id.as_str());
}

#[tokio::test]
#[ignore]
async fn test_book_search_and_listing() {
    let client = Client::new();
    let (_, token) = register_and_login(&client).await;
    let book = create_book(&client, &token, 1).await;

    let response = client
        .get(format!("{}/books/search/title/wizard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let found: Value = response.json().await.expect("Failed to parse response");
    assert!(found
        .as_array()
        .expect("array")
        .iter()
        .any(|b| b["id"] == book["id"]));

    let response = client
        .get(format!("{}/books/search/title/{}", BASE_URL, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("{}/books?page=1&per_page=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let page: Value = response.json().await.expect("Failed to parse response");
    assert!(page["items"].is_array());
    assert!(page["total"].is_number());
    assert_eq!(page["per_page"], 5);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_late() {
    let client = Client::new();
    let (user_id, token) = register_and_login(&client).await;
    let book = create_book(&client, &token, 1).await;

    let response = post(
        &client,
        &token,
        "/borrowings",
        json!({
            "user_id": user_id,
            "book_id": book["id"],
            "borrowed_date": "2024-03-01",
            "due_date": "2024-03-15"
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let borrowing: Value = response.json().await.expect("Failed to parse borrowing");
    let borrowing_id = borrowing["id"].as_str().expect("No borrowing ID").to_string();

    // The only copy is out
    let response = post(
        &client,
        &token,
        "/borrowings",
        json!({ "user_id": user_id, "book_id": book["id"] }),
    )
    .await;
    assert_eq!(response.status(), 422);

    // Three days late
    let response = client
        .patch(format!("{}/borrowings/{}/return?return_date=2024-03-18", BASE_URL, borrowing_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let outcome: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(outcome["message"], "Borrowing marked as returned successfully.");
    assert_eq!(outcome["fine"]["amount"], "15.00");

    let response = client
        .patch(format!("{}/borrowings/{}/return", BASE_URL, borrowing_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .get(format!("{}/fines/unpaid/total/{}", BASE_URL, user_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let total: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(total["total"], "15.00");

    let fine_id = outcome["fine"]["id"].as_str().expect("No fine ID");
    let response = client
        .patch(format!("{}/fines/{}/pay", BASE_URL, fine_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Fine marked as paid");
}

#[tokio::test]
#[ignore]
async fn test_reservation_lifecycle() {
    let client = Client::new();
    let (user_id, token) = register_and_login(&client).await;
    let book = create_book(&client, &token, 0).await;

    let payload = json!({ "user_id": user_id, "book_id": book["id"] });
    let response = post(&client, &token, "/reservations", payload.clone()).await;
    assert_eq!(response.status(), 201);
    let reservation: Value = response.json().await.expect("Failed to parse reservation");
    assert_eq!(reservation["status"], "active");

    let response = post(&client, &token, "/reservations", payload).await;
    assert_eq!(response.status(), 409);

    let url = format!("{}/reservations/{}", BASE_URL, reservation["id"].as_str().expect("No ID"));
    let response = client.delete(&url).bearer_auth(&token).send().await.expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client.delete(&url).bearer_auth(&token).send().await.expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_recommendations_without_history() {
    let client = Client::new();
    let (user_id, token) = register_and_login(&client).await;

    let response = client
        .get(format!("{}/recommendations/by-category/{}", BASE_URL, user_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["reason"], "No borrowing history available.");
    assert_eq!(body["recommended_books"], json!([]));
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/borrowings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
