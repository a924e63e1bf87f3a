use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_email, min_chars, require, ValidationError};

/// Unique contact-message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u32);

pub const MIN_MESSAGE_CHARS: usize = 10;

/// Categories offered by the contact form, as `(key, label)`.
pub const CONTACT_CATEGORIES: &[(&str, &str)] = &[
    ("products", "Product Questions"),
    ("partnership", "Farmer Partnership"),
    ("wholesale", "Wholesale Inquiry"),
    ("support", "Customer Support"),
    ("other", "Other"),
];

/// The canonical key for `category`, matched case-insensitively.
pub fn contact_category(category: &str) -> Option<&'static str> {
    let category = category.trim();
    CONTACT_CATEGORIES
        .iter()
        .map(|(key, _)| *key)
        .find(|key| key.eq_ignore_ascii_case(category))
}

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub category: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub category: String,
    pub message: String,
}

impl NewContact {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        require("category", &self.category)?;
        if contact_category(&self.category).is_none() {
            return Err(ValidationError::UnknownCategory(self.category.trim().to_string()));
        }
        min_chars("message", &self.message, MIN_MESSAGE_CHARS)?;
        Ok(())
    }

    pub fn into_contact(
        self,
        id: ContactId,
        created_at: DateTime<Utc>,
    ) -> Result<Contact, ValidationError> {
        self.validate()?;
        let category = contact_category(&self.category)
            .ok_or_else(|| ValidationError::UnknownCategory(self.category.clone()))?;
        Ok(Contact {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            category: category.to_string(),
            message: self.message.trim().to_string(),
            created_at,
        })
    }
}
