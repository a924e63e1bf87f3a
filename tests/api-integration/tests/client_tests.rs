//! `CatalogClient` and `ProductBrowser` against a live server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use rust_decimal::Decimal;

use farmfresh_client::api::{CatalogClient, FetchError, SubmitError};
use farmfresh_client::browser::{FetchOutcome, ProductBrowser};
use farmfresh_common::catalog::{ProductQuery, SortKey};
use farmfresh_common::contact::NewContact;
use farmfresh_common::farmer::FarmerId;
use farmfresh_common::product::ProductId;
use farmfresh_common::review::NewReview;
use farmfresh_integration::{unreachable_base_url, TestServer};
use farmfresh_server::MemStore;

#[tokio::test]
async fn client_reads_typed_catalog() {
    let server = TestServer::start().await;
    let client = server.client();

    let products = client.products(None).await.unwrap();
    assert_eq!(products.len(), 6);
    assert_eq!(products[0].price, Decimal::new(2499, 2));

    let coffee = client.products(Some("COFFEE")).await.unwrap();
    assert_eq!(coffee.len(), 2);

    let product = client
        .product_by_slug("ethiopian-highland-coffee")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.name, "Ethiopian Highland Coffee");
    assert!(client.product_by_slug("missing").await.unwrap().is_none());

    let farmer = client.farmer(FarmerId(2)).await.unwrap().unwrap();
    assert_eq!(farmer.name, "Rajesh Kumar");
    assert_eq!(farmer.product_count, 2);
    assert!(client.farmer(FarmerId(7)).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_catalog_is_not_an_error() {
    let server = TestServer::with_store(MemStore::new()).await;
    let products = server.client().products(None).await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn unreachable_server_is_a_fetch_error() {
    let client = CatalogClient::new(&unreachable_base_url().await, Duration::from_secs(2)).unwrap();
    let err = client.products(None).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "{err:?}");
    assert!(err.is_retryable());
}

/// Every route fails with 500 and counts how often it was hit.
fn failing_router(hits: Arc<AtomicUsize>) -> Router {
    async fn fail(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
        hits.fetch_add(1, Ordering::SeqCst);
        StatusCode::INTERNAL_SERVER_ERROR
    }
    Router::new()
        .route("/api/products", get(fail))
        .route("/api/contact", post(fail))
        .with_state(hits)
}

#[tokio::test]
async fn reads_retry_once_on_server_error() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = TestServer::with_router(failing_router(hits.clone())).await;

    let err = server.client().products(None).await.unwrap_err();
    assert!(
        matches!(err, FetchError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR),
        "{err:?}"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn writes_are_never_retried() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = TestServer::with_router(failing_router(hits.clone())).await;

    let err = server
        .client()
        .submit_contact(&NewContact {
            name: "Lena".into(),
            email: "lena@example.com".into(),
            category: "support".into(),
            message: "Where is my order?".into(),
        })
        .await
        .unwrap_err();
    assert!(
        matches!(err, SubmitError::Fetch(FetchError::Status { .. })),
        "{err:?}"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_reads_time_out_after_one_retry() {
    let hits = Arc::new(AtomicUsize::new(0));
    async fn stall(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
        hits.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(5)).await;
        StatusCode::OK
    }
    let app = Router::new()
        .route("/api/products", get(stall))
        .with_state(hits.clone());
    let server = TestServer::with_router(app).await;

    let client = CatalogClient::new(&server.base_url(), Duration::from_millis(200)).unwrap();
    let err = client.products(None).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "{err:?}");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn submissions_round_trip_and_report_rejections() {
    let server = TestServer::start().await;
    let client = server.client();

    let review = client
        .submit_review(
            ProductId(5),
            &NewReview {
                customer_name: "Lena".into(),
                rating: 4,
                comment: "Bright and fruity".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(review.rating, 4);
    assert_eq!(
        client.reviews(ProductId(5)).await.unwrap().unwrap(),
        vec![review]
    );

    let err = client
        .submit_review(
            ProductId(5),
            &NewReview {
                customer_name: " ".into(),
                rating: 4,
                comment: "Bright".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Rejected(m) if m.contains("customerName")));

    let err = client
        .submit_review(
            ProductId(99),
            &NewReview {
                customer_name: "Lena".into(),
                rating: 4,
                comment: "Bright".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::NotFound));

    let err = client
        .submit_contact(&NewContact {
            name: "Lena".into(),
            email: "lena-at-example".into(),
            category: "support".into(),
            message: "Where is my order?".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Rejected(m) if m == "Invalid email address"));
}

#[tokio::test]
async fn browser_over_live_client() {
    let server = TestServer::start().await;
    let browser = ProductBrowser::new(server.client());

    assert_eq!(
        browser.select_category(Some("spices")).await.unwrap(),
        FetchOutcome::Applied(2)
    );
    let names: Vec<_> = browser
        .visible(&ProductQuery::new("", SortKey::PriceLow))
        .await
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Organic Turmeric Powder", "Himalayan Spice Mix"]);

    assert_eq!(
        browser.select_category(None).await.unwrap(),
        FetchOutcome::Applied(6)
    );
    let top = browser.visible(&ProductQuery::new("", SortKey::Rating)).await;
    // Stable: the two 5.0 products keep catalog order.
    assert_eq!(top[0].name, "Ethiopian Highland Coffee");
    assert_eq!(top[1].name, "Ancient Grain Blend");
}
