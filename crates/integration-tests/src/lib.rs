//! Integration tests for YuvaKart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p yuvakart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over file-backed storage
//! - `checkout_flow` - Cart through order draft to cleared cart
//!
//! Shared fixtures live here so the test binaries build the same catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use yuvakart_cart::{CartStore, FileStorage};
use yuvakart_core::{CategoryId, Price, Product, ProductId};

/// A small catalog of products priced in whole rupees.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        product(1, "Turmeric Powder 200g", 120, 25),
        product(2, "Basmati Rice 5kg", 650, 8),
        product(3, "Cold Pressed Groundnut Oil 1L", 280, 0),
        product(4, "Assam Tea 250g", 100, 40),
    ]
}

/// Build a product snapshot.
#[must_use]
pub fn product(id: i64, name: &str, price: i64, stock: u32) -> Product {
    Product::new(
        ProductId::new(id),
        name,
        Price::from_units(price),
        CategoryId::new(1),
    )
    .with_stock(stock)
}

/// Open a cart store rooted in `dir`.
#[must_use]
pub fn file_store(dir: &Path) -> CartStore<FileStorage> {
    CartStore::new(FileStorage::new(dir))
}
