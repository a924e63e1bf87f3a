//! HTTP contract of the catalog API, exercised over a real socket.

use reqwest::StatusCode;
use serde_json::{json, Value};

use farmfresh_integration::TestServer;

async fn get(server: &TestServer, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(server.url(path)).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

async fn post(server: &TestServer, path: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(server.url(path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn lists_all_seed_products_with_string_prices() {
    let server = TestServer::start().await;
    let (status, body) = get(&server, "/api/products").await;
    assert_eq!(status, StatusCode::OK);

    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 6);
    assert_eq!(products[0]["name"], "Ethiopian Highland Coffee");
    assert_eq!(products[0]["price"], "24.99");
    assert!(products[0]["imageUrl"].as_str().unwrap().starts_with("https://"));
    assert_eq!(products[0]["farmerId"], 1);
    assert_eq!(products[0]["inStock"], true);
}

#[tokio::test]
async fn category_filter_is_case_insensitive() {
    let server = TestServer::start().await;

    let (_, body) = get(&server, "/api/products?category=coffee").await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Ethiopian Highland Coffee", "Colombian Single Origin"]);

    let (status, body) = get(&server, "/api/products?category=Nuts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn product_by_slug_and_not_found() {
    let server = TestServer::start().await;

    let (status, body) = get(&server, "/api/products/himalayan-spice-mix").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Himalayan Spice Mix");
    assert_eq!(body["price"], "18.50");

    let (status, body) = get(&server, "/api/products/no-such-thing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Product not found" }));
}

#[tokio::test]
async fn farmers_carry_product_counts() {
    let server = TestServer::start().await;

    let (_, body) = get(&server, "/api/farmers").await;
    let counts: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["productCount"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![2, 2, 1, 1]);

    let (status, body) = get(&server, "/api/farmers/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Chen Wei");
    assert_eq!(body["yearsExperience"], 20);

    let (status, _) = get(&server, "/api/farmers/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&server, "/api/farmers/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_lifecycle() {
    let server = TestServer::start().await;

    let (status, body) = get(&server, "/api/products/2/reviews").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = post(
        &server,
        "/api/products/2/reviews",
        json!({ "customerName": "Priya", "rating": 5, "comment": "Smells amazing" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["productId"], 2);
    assert_eq!(body["id"], 1);

    let (_, body) = get(&server, "/api/products/2/reviews").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["customerName"], "Priya");
}

#[tokio::test]
async fn invalid_reviews_are_rejected() {
    let server = TestServer::start().await;

    let (status, body) = post(
        &server,
        "/api/products/1/reviews",
        json!({ "customerName": "Priya", "rating": 6, "comment": "Too good" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("rating"));

    let (status, body) = post(&server, "/api/products/1/reviews", json!({ "rating": 4 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid review data");

    let (status, _) = post(
        &server,
        "/api/products/42/reviews",
        json!({ "customerName": "Priya", "rating": 4, "comment": "Fine" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_validation() {
    let server = TestServer::start().await;

    let (status, body) = post(
        &server,
        "/api/contact",
        json!({
            "name": "Avery",
            "email": "avery@example.com",
            "category": "wholesale",
            "message": "Do you ship to restaurants?"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"], "wholesale");
    assert!(body["createdAt"].is_string());

    let (status, body) = post(
        &server,
        "/api/contact",
        json!({
            "name": "Avery",
            "email": "avery@example.com",
            "category": "wholesale",
            "message": "Hi"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("10"));

    let (status, body) = post(
        &server,
        "/api/contact",
        json!({
            "name": "Avery",
            "email": "avery@example.com",
            "category": "gossip",
            "message": "Heard any good rumours?"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown category 'gossip'");
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let server = TestServer::start().await;
    let (status, body) = get(&server, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["products"], 6);
    assert_eq!(body["farmers"], 4);
}
