use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::ProductId;
use crate::validation::{require, ValidationError};

/// Unique review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub u32);

pub const MIN_REVIEW_RATING: i64 = 1;
pub const MAX_REVIEW_RATING: i64 = 5;

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub customer_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review payload as posted by a customer. `rating` is signed so that
/// out-of-range input is reported as a validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub customer_name: String,
    pub rating: i64,
    pub comment: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("customerName", &self.customer_name)?;
        if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                min: MIN_REVIEW_RATING,
                max: MAX_REVIEW_RATING,
            });
        }
        require("comment", &self.comment)?;
        Ok(())
    }

    /// Validate and materialize the review.
    pub fn into_review(
        self,
        id: ReviewId,
        product_id: ProductId,
        created_at: DateTime<Utc>,
    ) -> Result<Review, ValidationError> {
        self.validate()?;
        Ok(Review {
            id,
            product_id,
            customer_name: self.customer_name.trim().to_string(),
            rating: self.rating as u8,
            comment: self.comment.trim().to_string(),
            created_at,
        })
    }
}
