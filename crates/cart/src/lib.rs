//! YuvaKart cart library.
//!
//! A client-local shopping cart persisted as a single JSON blob in a
//! key/value storage backend, plus the checkout arithmetic the storefront
//! performs on top of it.
//!
//! # Modules
//!
//! - [`model`] - `Cart` and `CartItem` with the one-item-per-product invariant
//! - [`codec`] - JSON encoding of the persisted cart
//! - [`storage`] - `CartStorage` trait and its memory, file, and unavailable backends
//! - [`store`] - `CartStore`, the cart operations over a storage backend
//! - [`checkout`] - Shipping, order drafts, and UPI payment links
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust
//! use yuvakart_cart::{CartStore, MemoryStorage};
//! use yuvakart_core::{CategoryId, Price, Product, ProductId};
//!
//! let store = CartStore::new(MemoryStorage::new());
//! let tea = Product::new(ProductId::new(1), "Tea", Price::from_units(100), CategoryId::new(1));
//!
//! store.add_to_cart(&tea, 1);
//! store.add_to_cart(&tea, 2);
//!
//! assert_eq!(store.get_cart_item_count(), 3);
//! assert_eq!(store.get_cart_total(), Price::from_units(300));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod codec;
pub mod config;
pub mod model;
pub mod storage;
pub mod store;

pub use checkout::{
    CheckoutError, CheckoutSummary, Customer, OrderDraft, OrderLine, ShippingPolicy, UpiSettings,
};
pub use codec::{DecodeError, EncodeError};
pub use config::{CartConfig, ConfigError};
pub use model::{Cart, CartItem};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError, UnavailableStorage};
pub use store::{CartReadError, CartStore, DEFAULT_CART_KEY};
