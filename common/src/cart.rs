//! Client-side shopping cart.
//!
//! `CartStore` owns the cart lines and the durable slot they are mirrored to.
//! Every mutation updates memory first and then writes the whole cart to the
//! slot; a failed write is logged and otherwise ignored. Loading never fails:
//! unreadable or inconsistent slot contents are discarded.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::checkout::{CheckoutSummary, PromoCode};
use crate::product::{is_valid_price, Product, ProductId};
use crate::storage::{CartStorage, CART_STORAGE_KEY};

/// One product in the cart with its requested quantity.
///
/// The product fields are a snapshot taken when the product was first added;
/// later catalog changes do not reach lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price × quantity. Saturates instead of panicking; lines with a valid
    /// price never get near the limit.
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A user-visible, non-blocking notification (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

pub struct CartStore<S: CartStorage> {
    lines: Vec<CartLine>,
    storage: S,
    notices: Vec<Notice>,
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrate the cart from `storage`, or start empty.
    pub fn load(mut storage: S) -> Self {
        let lines = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match decode_lines(&raw) {
                Ok(lines) => {
                    debug!(lines = lines.len(), "Loaded cart from storage");
                    lines
                }
                Err(reason) => {
                    warn!(%reason, "Discarding unreadable cart data");
                    if let Err(e) = storage.remove(CART_STORAGE_KEY) {
                        warn!(error = %e, "Failed to clear corrupt cart slot");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Cart storage unreadable; starting with an empty cart");
                Vec::new()
            }
        };

        Self {
            lines,
            storage,
            notices: Vec::new(),
        }
    }

    /// Lines in display (insertion) order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add_to_cart(&mut self, product: &Product) {
        if !self.increment(product, 1) {
            return;
        }
        self.persist();
        self.notices.push(Notice::new(
            "Added to cart!",
            format!("{} has been added to your cart.", product.name),
        ));
    }

    /// Add `quantity` units at once (the product page's quantity picker).
    pub fn add_many(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 || !self.increment(product, quantity) {
            return;
        }
        self.persist();
        self.notices.push(Notice::new(
            "Added to cart!",
            format!("{quantity} x {} added to your cart.", product.name),
        ));
    }

    /// Delete the line for `product_id`. Absent ids are ignored.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        let removed = self.lines.len() != before;
        self.persist();
        if removed {
            debug!(%product_id, "Removed line from cart");
            self.notices.push(Notice::new(
                "Removed from cart",
                "Item has been removed from your cart.",
            ));
        }
    }

    /// Set the absolute quantity of an existing line. Zero or negative
    /// removes the line; an id not in the cart is left alone.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
            self.persist();
        }
    }

    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.persist();
        self.notices.push(Notice::new(
            "Cart cleared",
            "All items have been removed from your cart.",
        ));
    }

    /// Sum of price × quantity over all lines, exact.
    pub fn cart_total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.line_total()))
    }

    /// Total number of units (drives the navigation badge).
    pub fn cart_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|line| line.product.id == product_id)
    }

    pub fn item_quantity(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product.id == product_id)
            .map_or(0, |line| line.quantity)
    }

    pub fn checkout_summary(&self, promo: Option<PromoCode>) -> CheckoutSummary {
        CheckoutSummary::compute(self.cart_total(), promo)
    }

    /// Drain notifications produced since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }

    /// Returns false, leaving the cart untouched, for a product whose price
    /// the cart cannot hold.
    fn increment(&mut self, product: &Product, by: u32) -> bool {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(by),
            None if !is_valid_price(product.price) => {
                warn!(product_id = %product.id, price = %product.price, "Refusing product with invalid price");
                return false;
            }
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: by,
            }),
        }
        true
    }

    fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.lines) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &encoded) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

/// Parse stored lines and check the cart invariants: positive quantities,
/// prices within catalog bounds and at most one line per product.
fn decode_lines(raw: &str) -> Result<Vec<CartLine>, String> {
    let lines: Vec<CartLine> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let mut seen = HashSet::new();
    for line in &lines {
        if line.quantity == 0 {
            return Err(format!("zero quantity for product {}", line.product.id));
        }
        if !is_valid_price(line.product.price) {
            return Err(format!(
                "price {} out of range for product {}",
                line.product.price, line.product.id
            ));
        }
        if !seen.insert(line.product.id) {
            return Err(format!("duplicate line for product {}", line.product.id));
        }
    }
    Ok(lines)
}
