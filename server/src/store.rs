//! In-memory catalog store.
//!
//! Maps keyed by auto-incrementing ids, filled from seed data at startup and
//! lost on restart. Farmer product counts are computed on every read.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use farmfresh_common::catalog::filter_by_category;
use farmfresh_common::contact::{Contact, ContactId, NewContact};
use farmfresh_common::farmer::{Farmer, FarmerId, NewFarmer};
use farmfresh_common::product::{
    is_valid_price, is_valid_slug, NewProduct, Product, ProductId, MAX_PRICE_UNITS,
};
use farmfresh_common::review::{NewReview, Review, ReviewId};
use farmfresh_common::validation::ValidationError;

const MAX_PRODUCT_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A product with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Product not found")]
    ProductNotFound(ProductId),
}

#[derive(Debug)]
pub struct MemStore {
    products: BTreeMap<ProductId, Product>,
    farmers: BTreeMap<FarmerId, Farmer>,
    reviews: BTreeMap<ReviewId, Review>,
    contacts: BTreeMap<ContactId, Contact>,
    next_product_id: u32,
    next_farmer_id: u32,
    next_review_id: u32,
    next_contact_id: u32,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    /// An empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            products: BTreeMap::new(),
            farmers: BTreeMap::new(),
            reviews: BTreeMap::new(),
            contacts: BTreeMap::new(),
            next_product_id: 1,
            next_farmer_id: 1,
            next_review_id: 1,
            next_contact_id: 1,
        }
    }

    // ─── Products ───────────────────────────────────────────────────────────

    /// All products in insertion order, optionally narrowed to a category
    /// (case-insensitive). An unknown category yields an empty list.
    pub fn list_products(&self, category: Option<&str>) -> Vec<Product> {
        filter_by_category(self.products.values(), category)
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<Product> {
        self.products.values().find(|p| p.slug == slug).cloned()
    }

    pub fn product_by_id(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    pub fn create_product(&mut self, new: NewProduct) -> Result<Product, StoreError> {
        if !is_valid_slug(&new.slug) {
            return Err(ValidationError::InvalidSlug(new.slug).into());
        }
        if self.products.values().any(|p| p.slug == new.slug) {
            return Err(StoreError::DuplicateSlug(new.slug));
        }
        if !is_valid_price(new.price) {
            return Err(ValidationError::OutOfRange {
                field: "price",
                min: 0,
                max: i64::from(MAX_PRICE_UNITS),
            }
            .into());
        }
        if let Some(rating) = new.rating {
            if rating.is_sign_negative() || rating > MAX_PRODUCT_RATING {
                return Err(ValidationError::OutOfRange {
                    field: "rating",
                    min: 0,
                    max: 5,
                }
                .into());
            }
        }

        let id = ProductId(self.next_product_id);
        self.next_product_id += 1;
        let product = new.into_product(id);
        info!(%id, slug = %product.slug, "Created product");
        self.products.insert(id, product.clone());
        Ok(product)
    }

    // ─── Farmers ────────────────────────────────────────────────────────────

    pub fn list_farmers(&self) -> Vec<Farmer> {
        self.farmers
            .values()
            .map(|f| f.with_product_count(self.products.values()))
            .collect()
    }

    pub fn farmer_by_id(&self, id: FarmerId) -> Option<Farmer> {
        self.farmers
            .get(&id)
            .map(|f| f.with_product_count(self.products.values()))
    }

    pub fn create_farmer(&mut self, new: NewFarmer) -> Farmer {
        let id = FarmerId(self.next_farmer_id);
        self.next_farmer_id += 1;
        let farmer = new.into_farmer(id);
        info!(%id, name = %farmer.name, "Created farmer");
        self.farmers.insert(id, farmer.clone());
        farmer
    }

    // ─── Reviews ────────────────────────────────────────────────────────────

    pub fn reviews_for_product(&self, product_id: ProductId) -> Vec<Review> {
        self.reviews
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect()
    }

    pub fn create_review(
        &mut self,
        product_id: ProductId,
        new: NewReview,
    ) -> Result<Review, StoreError> {
        if !self.products.contains_key(&product_id) {
            return Err(StoreError::ProductNotFound(product_id));
        }
        let id = ReviewId(self.next_review_id);
        let review = new.into_review(id, product_id, Utc::now())?;
        self.next_review_id += 1;
        info!(review_id = id.0, %product_id, rating = review.rating, "Created review");
        self.reviews.insert(id, review.clone());
        Ok(review)
    }

    // ─── Contacts ───────────────────────────────────────────────────────────

    pub fn create_contact(&mut self, new: NewContact) -> Result<Contact, StoreError> {
        let id = ContactId(self.next_contact_id);
        let contact = new.into_contact(id, Utc::now())?;
        self.next_contact_id += 1;
        info!(contact_id = id.0, category = %contact.category, "Received contact message");
        self.contacts.insert(id, contact.clone());
        Ok(contact)
    }
}
