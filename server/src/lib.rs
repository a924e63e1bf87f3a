//! Farm Fresh catalog API.
//!
//! Serves products, farmers, reviews and contact submissions as JSON under
//! `/api`, backed by an in-memory [`MemStore`].

pub mod error;
pub mod seed;
pub mod store;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use farmfresh_common::contact::{Contact, NewContact};
use farmfresh_common::farmer::{Farmer, FarmerId};
use farmfresh_common::product::{Product, ProductId};
use farmfresh_common::review::{NewReview, Review};

pub use error::{ApiError, ErrorResponse};
pub use store::{MemStore, StoreError};

pub struct AppState {
    pub store: RwLock<MemStore>,
}

impl AppState {
    pub fn new(store: MemStore) -> Arc<Self> {
        Arc::new(Self {
            store: RwLock::new(store),
        })
    }
}

// ─── API types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    products: usize,
    farmers: usize,
}

/// Path ids that fail to parse are treated like ids that don't exist.
fn parse_id(raw: &str) -> Option<u32> {
    raw.parse().ok()
}

// ─── Products ───────────────────────────────────────────────────────────────

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProductFilter>,
) -> Json<Vec<Product>> {
    let store = state.store.read().await;
    let category = filter.category.as_deref().filter(|c| !c.is_empty());
    let products = store.list_products(category);
    debug!(?category, count = products.len(), "Listed products");
    Json(products)
}

async fn product_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let store = state.store.read().await;
    store
        .product_by_slug(&slug)
        .map(Json)
        .ok_or_else(ApiError::product_not_found)
}

// ─── Reviews ────────────────────────────────────────────────────────────────

async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(product): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let id = parse_id(&product)
        .map(ProductId)
        .ok_or_else(ApiError::product_not_found)?;
    let store = state.store.read().await;
    if store.product_by_id(id).is_none() {
        return Err(ApiError::product_not_found());
    }
    Ok(Json(store.reviews_for_product(id)))
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(product): Path<String>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let id = parse_id(&product)
        .map(ProductId)
        .ok_or_else(ApiError::product_not_found)?;
    let Json(new) = payload.map_err(|rejection| {
        debug!(%rejection, "Rejected review payload");
        ApiError::BadRequest("Invalid review data".into())
    })?;
    let review = state.store.write().await.create_review(id, new)?;
    Ok((StatusCode::CREATED, Json(review)))
}

// ─── Farmers ────────────────────────────────────────────────────────────────

async fn list_farmers(State(state): State<Arc<AppState>>) -> Json<Vec<Farmer>> {
    Json(state.store.read().await.list_farmers())
}

async fn farmer_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Farmer>, ApiError> {
    let id = parse_id(&id)
        .map(FarmerId)
        .ok_or_else(ApiError::farmer_not_found)?;
    state
        .store
        .read()
        .await
        .farmer_by_id(id)
        .map(Json)
        .ok_or_else(ApiError::farmer_not_found)
}

// ─── Contact ────────────────────────────────────────────────────────────────

async fn create_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewContact>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(new) = payload.map_err(|rejection| {
        debug!(%rejection, "Rejected contact payload");
        ApiError::BadRequest("Invalid contact data".into())
    })?;
    let contact = state.store.write().await.create_contact(new)?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.store.read().await;
    Json(HealthResponse {
        status: "ok",
        products: store.list_products(None).len(),
        farmers: store.list_farmers().len(),
    })
}

/// Build the application router. `/api/products/{product}` takes a slug,
/// while the nested reviews route takes a numeric product id.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api = Router::new()
        .route("/products", get(list_products))
        .route("/products/{product}", get(product_by_slug))
        .route(
            "/products/{product}/reviews",
            get(list_reviews).post(create_review),
        )
        .route("/farmers", get(list_farmers))
        .route("/farmers/{id}", get(farmer_by_id))
        .route("/contact", post(create_contact));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
