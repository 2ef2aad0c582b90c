use crate::models::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Title, unique under case-insensitive comparison
    pub title: String,

    /// Brand name
    pub brand: String,

    /// Free-text description
    pub description: String,

    /// List price
    pub price: Price,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a stored product from its insert payload
    pub fn from_new(id: i64, new: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: new.title,
            brand: new.brand,
            description: new.description,
            price: new.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive containment test against title, brand or description
    pub fn matches_any_field(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.brand.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }

    /// Case-insensitive containment test against brand or description
    pub fn matches_brand_or_description(&self, needle_lower: &str) -> bool {
        self.brand.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

/// Insert payload for a product; id and timestamps are assigned on save
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 255))]
    pub brand: String,

    pub description: String,

    pub price: Price,
}

impl NewProduct {
    pub fn new(
        title: impl Into<String>,
        brand: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            title: title.into(),
            brand: brand.into(),
            description: description.into(),
            price,
        }
    }
}

/// One page of products in ascending id order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,

    /// Number of products in the whole catalog, not just this page
    pub total_items: u64,
}
