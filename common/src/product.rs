use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::farmer::FarmerId;

/// Unique product identifier (auto-incrementing, assigned at creation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of farm product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Coffee,
    Spices,
    Grains,
    Herbs,
    Tea,
}

impl ProductCategory {
    pub fn all() -> &'static [ProductCategory] {
        &[
            ProductCategory::Coffee,
            ProductCategory::Spices,
            ProductCategory::Grains,
            ProductCategory::Herbs,
            ProductCategory::Tea,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Coffee => "Coffee",
            ProductCategory::Spices => "Spices",
            ProductCategory::Grains => "Grains",
            ProductCategory::Herbs => "Herbs",
            ProductCategory::Tea => "Tea",
        }
    }

    /// Case-insensitive match against a free-form category filter.
    ///
    /// Filters that name no known category simply never match.
    pub fn matches(self, filter: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(filter.trim())
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.matches(s))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// A product listing in the catalog.
///
/// Prices and ratings are exact decimals; on the wire they travel as strings
/// (`"24.99"`) so no client ever sees binary floating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub image_url: String,
    pub farmer_id: FarmerId,
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub slug: String,
}

fn default_in_stock() -> bool {
    true
}

/// Fields supplied when creating a product; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub image_url: String,
    pub farmer_id: FarmerId,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    pub slug: String,
}

impl NewProduct {
    /// Materialize the product under `id`, applying the catalog defaults
    /// (rating 0, no reviews, in stock).
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image_url: self.image_url,
            farmer_id: self.farmer_id,
            rating: self.rating.unwrap_or(Decimal::ZERO),
            review_count: self.review_count.unwrap_or(0),
            in_stock: self.in_stock.unwrap_or(true),
            slug: self.slug,
        }
    }
}

/// Highest accepted unit price, in whole currency units.
pub const MAX_PRICE_UNITS: u32 = 1_000_000;

/// [`MAX_PRICE_UNITS`] as a decimal. Keeps every cart total far inside
/// `Decimal`'s range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(MAX_PRICE_UNITS, 0, 0, false, 0);

/// A price the catalog and the cart accept: zero up to [`MAX_PRICE`].
pub fn is_valid_price(price: Decimal) -> bool {
    !price.is_sign_negative() && price <= MAX_PRICE
}

/// Returns true if `slug` is URL-safe: lowercase ASCII letters and digits
/// separated by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
