use std::fmt;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Unique farmer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmerId(pub u32);

impl fmt::Display for FarmerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A partner farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: FarmerId,
    pub name: String,
    pub location: String,
    pub specialty: String,
    pub bio: String,
    pub image_url: String,
    /// Derived: number of catalog products supplied by this farmer.
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub years_experience: u32,
}

impl Farmer {
    /// Return a copy with `product_count` recomputed from `products`.
    pub fn with_product_count<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Farmer {
        let product_count = products
            .into_iter()
            .filter(|p| p.farmer_id == self.id)
            .count() as u32;
        Farmer {
            product_count,
            ..self.clone()
        }
    }
}

/// Fields supplied when creating a farmer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFarmer {
    pub name: String,
    pub location: String,
    pub specialty: String,
    pub bio: String,
    pub image_url: String,
    #[serde(default)]
    pub years_experience: Option<u32>,
}

impl NewFarmer {
    pub fn into_farmer(self, id: FarmerId) -> Farmer {
        Farmer {
            id,
            name: self.name,
            location: self.location,
            specialty: self.specialty,
            bio: self.bio,
            image_url: self.image_url,
            product_count: 0,
            years_experience: self.years_experience.unwrap_or(0),
        }
    }
}
