//! Cart operations over a storage backend.
//!
//! Every operation reads the whole cart from storage, applies the change, and
//! writes it back. Storage and decode failures never reach the caller: reads
//! fall back to an empty cart and writes are dropped, with a `warn` log line
//! for each. [`CartStore::try_get_cart`] exposes the typed failure for callers
//! that want to tell "empty" apart from "unreadable".

use thiserror::Error;
use tracing::instrument;

use yuvakart_core::{Price, Product, ProductId};

use crate::codec::{self, DecodeError};
use crate::model::{Cart, CartItem};
use crate::storage::{CartStorage, StorageError};

/// Storage key the storefront has always used for the cart.
pub const DEFAULT_CART_KEY: &str = "yuvakart_cart";

/// Why a stored cart could not be read.
#[derive(Debug, Error)]
pub enum CartReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A cart persisted under one key of a [`CartStorage`].
///
/// Holds no cart state of its own; two stores over the same storage and key
/// see each other's writes.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store using [`DEFAULT_CART_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Create a store using a custom key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key the cart lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the cart, reporting storage and decode failures.
    ///
    /// An unset key is an empty cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CartReadError` if storage cannot be read or holds malformed data.
    pub fn try_get_cart(&self) -> Result<Cart, CartReadError> {
        match self.storage.get_item(&self.key)? {
            Some(data) => Ok(codec::decode(&data)?),
            None => Ok(Cart::new()),
        }
    }

    /// Read the cart. Unavailable storage or malformed data reads as empty.
    #[must_use]
    pub fn get_cart(&self) -> Cart {
        self.try_get_cart().unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "Failed to read cart, using empty cart");
            Cart::new()
        })
    }

    /// Add `quantity` units of `product`, merging with an existing item.
    ///
    /// Returns the updated cart. Quantities of zero or less are ignored.
    #[instrument(level = "debug", skip(self, product), fields(key = %self.key, product_id = %product.id))]
    pub fn add_to_cart(&self, product: &Product, quantity: i64) -> Cart {
        let mut cart = self.get_cart();

        if quantity <= 0 {
            tracing::debug!(quantity, "Ignoring non-positive add quantity");
            return cart;
        }

        cart.add(product, u32::try_from(quantity).unwrap_or(u32::MAX));
        self.save(&cart);
        cart
    }

    /// Add a single unit of `product`.
    pub fn add_one(&self, product: &Product) -> Cart {
        self.add_to_cart(product, 1)
    }

    /// Set an item's quantity exactly. Zero or less removes the item.
    ///
    /// Does nothing if the product is not in the cart. Returns the updated cart.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> Cart {
        let mut cart = self.get_cart();
        if cart.set_quantity(product_id, quantity) {
            self.save(&cart);
        }
        cart
    }

    /// Remove a product. Does nothing if it is not in the cart.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn remove_from_cart(&self, product_id: ProductId) -> Cart {
        let mut cart = self.get_cart();
        if cart.remove(product_id) {
            self.save(&cart);
        }
        cart
    }

    /// Delete the stored cart entirely.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn clear_cart(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "Failed to clear cart");
        }
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn get_cart_total(&self) -> Price {
        self.get_cart().total()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn get_cart_item_count(&self) -> u64 {
        self.get_cart().item_count()
    }

    #[must_use]
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.get_cart().contains(product_id)
    }

    #[must_use]
    pub fn get_cart_item(&self, product_id: ProductId) -> Option<CartItem> {
        self.get_cart().get(product_id).cloned()
    }

    fn save(&self, cart: &Cart) {
        let data = match codec::encode(cart) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&self.key, &data) {
            tracing::warn!(key = %self.key, error = %e, "Failed to save cart");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use yuvakart_core::CategoryId;

    use super::*;
    use crate::storage::{MemoryStorage, UnavailableStorage};

    fn product(id: i64, price: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            Price::from_units(price),
            CategoryId::new(1),
        )
        .with_stock(10)
    }

    #[test]
    fn test_empty_on_first_access() {
        let store = CartStore::new(MemoryStorage::new());
        assert!(store.get_cart().is_empty());
        assert_eq!(store.get_cart_total(), Price::ZERO);
        assert_eq!(store.get_cart_item_count(), 0);
    }

    #[test]
    fn test_add_merges_and_totals() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 100), 1);
        let cart = store.add_to_cart(&product(1, 100), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(store.get_cart_total(), Price::from_units(300));
        assert_eq!(store.get_cart_item_count(), 3);
    }

    #[test]
    fn test_add_quantities_sum() {
        let store = CartStore::new(MemoryStorage::new());
        let adds = [1, 4, 2, 7];
        for quantity in adds {
            store.add_to_cart(&product(5, 3), quantity);
        }

        let item = store.get_cart_item(ProductId::new(5)).unwrap();
        assert_eq!(i64::from(item.quantity), adds.iter().sum::<i64>());
    }

    #[test]
    fn test_add_one() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_one(&product(1, 10));
        store.add_one(&product(1, 10));
        assert_eq!(store.get_cart_item_count(), 2);
    }

    #[test]
    fn test_add_non_positive_is_ignored() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 0);
        store.add_to_cart(&product(1, 10), -3);

        assert!(!store.is_in_cart(ProductId::new(1)));
        assert_eq!(store.storage().get_item(DEFAULT_CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_does_not_cap_at_stock() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 50);
        assert_eq!(store.get_cart_item_count(), 50);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 5);

        let cart = store.update_quantity(ProductId::new(1), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(store.get_cart_item_count(), 2);
    }

    #[test]
    fn test_update_quantity_non_positive_removes() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 5);
        store.add_to_cart(&product(2, 10), 1);

        store.update_quantity(ProductId::new(1), 0);
        assert!(!store.is_in_cart(ProductId::new(1)));

        store.update_quantity(ProductId::new(2), -4);
        assert!(!store.is_in_cart(ProductId::new(2)));
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 1);

        let cart = store.update_quantity(ProductId::new(2), 3);
        assert_eq!(cart.len(), 1);
        assert!(!store.is_in_cart(ProductId::new(2)));
    }

    #[test]
    fn test_remove_from_cart() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 1);
        store.add_to_cart(&product(2, 20), 1);

        let cart = store.remove_from_cart(ProductId::new(1));
        assert_eq!(cart.len(), 1);
        assert!(store.is_in_cart(ProductId::new(2)));

        let cart = store.remove_from_cart(ProductId::new(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_cart_deletes_blob() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 1);
        store.clear_cart();

        assert_eq!(store.storage().get_item(DEFAULT_CART_KEY).unwrap(), None);
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn test_lookup_helpers() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(&product(1, 10), 2);

        assert!(store.is_in_cart(ProductId::new(1)));
        assert!(!store.is_in_cart(ProductId::new(2)));
        assert_eq!(store.get_cart_item(ProductId::new(1)).unwrap().quantity, 2);
        assert!(store.get_cart_item(ProductId::new(2)).is_none());
    }

    #[test]
    fn test_malformed_data_reads_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(DEFAULT_CART_KEY, "{not json").unwrap();
        let store = CartStore::new(storage);

        assert!(store.get_cart().is_empty());
        assert!(matches!(
            store.try_get_cart(),
            Err(CartReadError::Decode(_))
        ));
    }

    #[test]
    fn test_malformed_data_is_replaced_on_add() {
        let storage = MemoryStorage::new();
        storage.set_item(DEFAULT_CART_KEY, "garbage").unwrap();
        let store = CartStore::new(storage);

        store.add_to_cart(&product(1, 10), 1);
        assert_eq!(store.try_get_cart().unwrap().item_count(), 1);
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let store = CartStore::new(UnavailableStorage);

        let cart = store.add_to_cart(&product(1, 10), 2);
        assert_eq!(cart.item_count(), 2);

        assert!(store.get_cart().is_empty());
        assert!(!store.is_in_cart(ProductId::new(1)));
        assert_eq!(store.get_cart_total(), Price::ZERO);
        store.update_quantity(ProductId::new(1), 3);
        store.remove_from_cart(ProductId::new(1));
        store.clear_cart();
        assert!(matches!(
            store.try_get_cart(),
            Err(CartReadError::Storage(StorageError::Unavailable))
        ));
    }

    #[test]
    fn test_stores_share_storage() {
        let storage = MemoryStorage::new();
        let first = CartStore::new(&storage);
        let second = CartStore::new(&storage);

        first.add_to_cart(&product(1, 100), 2);
        let cart = second.get_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_custom_keys_are_independent() {
        let storage = MemoryStorage::new();
        let a = CartStore::with_key(&storage, "cart_a");
        let b = CartStore::with_key(&storage, "cart_b");

        a.add_to_cart(&product(1, 10), 1);
        assert!(b.get_cart().is_empty());
        assert_eq!(a.key(), "cart_a");
    }
}
