//! Catalog product snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Price, ProductId};

/// A product as returned by the catalog API.
///
/// The cart keeps a copy of this at the time of adding, not a live reference,
/// so later catalog changes do not affect items already in a cart. Optional
/// fields default when missing so snapshots written by older clients still
/// decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    pub category: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl Product {
    /// Create a product snapshot with the required fields.
    ///
    /// Stock starts at zero and the product is active; use the builder-style
    /// setters for the rest.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price, category: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            stock: 0,
            category,
            category_name: None,
            image: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stock level.
    #[must_use]
    pub const fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Whether at least one unit is in stock.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}
