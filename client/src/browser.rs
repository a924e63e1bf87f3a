//! Product listing state for a storefront page.
//!
//! Selecting a category starts a fetch; if the user picks another category
//! before it returns, the older response is dropped so the list always
//! reflects the latest selection.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use farmfresh_common::catalog::ProductQuery;
use farmfresh_common::product::Product;

use crate::api::{CatalogClient, FetchError};

/// Anything that can list products by category.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn fetch_products(&self, category: Option<&str>) -> Result<Vec<Product>, FetchError>;
}

impl CatalogSource for CatalogClient {
    async fn fetch_products(&self, category: Option<&str>) -> Result<Vec<Product>, FetchError> {
        self.products(category).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was current and replaced the listing (product count).
    Applied(usize),
    /// A newer selection started while this one was in flight.
    Superseded,
}

/// The currently displayed listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub category: Option<String>,
    pub products: Vec<Product>,
}

pub struct ProductBrowser<C: CatalogSource> {
    source: C,
    generation: AtomicU64,
    listing: Mutex<Listing>,
}

impl<C: CatalogSource> ProductBrowser<C> {
    pub fn new(source: C) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
            listing: Mutex::new(Listing::default()),
        }
    }

    /// Fetch the products for `category` (all when `None`) and show them,
    /// unless a later call has begun in the meantime. On failure the previous
    /// listing stays in place.
    pub async fn select_category(
        &self,
        category: Option<&str>,
    ) -> Result<FetchOutcome, FetchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.source.fetch_products(category).await;

        let mut listing = self.listing.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(?category, generation, "Discarding superseded product list");
            return Ok(FetchOutcome::Superseded);
        }
        let products = result.inspect_err(|err| {
            warn!(?category, error = %err, "Failed to load products");
        })?;
        let count = products.len();
        *listing = Listing {
            category: category.map(str::to_string),
            products,
        };
        Ok(FetchOutcome::Applied(count))
    }

    /// Current listing with `query`'s search and sort applied.
    pub async fn visible(&self, query: &ProductQuery) -> Vec<Product> {
        query.apply(&self.listing.lock().await.products)
    }

    pub async fn listing(&self) -> Listing {
        self.listing.lock().await.clone()
    }
}
