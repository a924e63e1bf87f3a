//! Catalog query contract shared by the server and the storefront client.
//!
//! Category filtering is what the API does server-side; search and sort are
//! pure transforms layered on top of whatever list was fetched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Sort order for a product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Name A-Z.
    #[default]
    Name,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Name,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name A-Z",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = Self::all().iter().map(|k| k.as_str()).collect();
                format!("unknown sort key '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Client-side search + sort applied to a fetched product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: SortKey,
}

impl ProductQuery {
    pub fn new(search: impl Into<String>, sort: SortKey) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }

    /// Case-insensitive substring match on name or description. Leading and
    /// trailing whitespace in the search is ignored, so a blank search
    /// matches everything.
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    /// Filter then sort. Sorting is stable: ties keep their relative order.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        let mut visible: Vec<Product> = products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        sort_products(&mut visible, self.sort);
        visible
    }
}

/// Stable in-place sort by `key`.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
        SortKey::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
}

/// Keep products whose category case-insensitively equals `category`;
/// `None` or a blank filter keeps everything. Insertion order is preserved.
pub fn filter_by_category<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    category: Option<&str>,
) -> Vec<Product> {
    let category = category.map(str::trim).filter(|c| !c.is_empty());
    products
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category.matches(c)))
        .cloned()
        .collect()
}
