//! Cart contents.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s with at most one item per
//! product and every quantity at least one. All mutation goes through `Cart`
//! methods so those invariants cannot be broken from outside.

use serde::{Deserialize, Serialize};

use yuvakart_core::{Price, Product, ProductId};

/// One product snapshot and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Product ID this item is keyed by.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// An ordered sequence of cart items, keyed by product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw items, merging duplicates and dropping
    /// zero-quantity entries.
    ///
    /// When a product appears more than once the first position is kept and
    /// the quantities are summed.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(&item.product, item.quantity);
        }
        cart
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the item for a product.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing item keeps its original snapshot and has its quantity
    /// incremented; otherwise a new item is appended. Adding zero units does
    /// nothing. Stock levels are not checked here.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id() == product.id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity,
            });
        }
    }

    /// Set the quantity of an existing item.
    ///
    /// A quantity of zero or less removes the item. Returns `false` if the
    /// product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        if quantity <= 0 {
            self.items.remove(index);
            return true;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        true
    }

    /// Remove a product. Returns `false` if it was not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);
        self.items.len() != before
    }

    /// Sum of price times quantity over all items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities (not the number of distinct products).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product_id)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use yuvakart_core::CategoryId;

    use super::*;

    fn product(id: i64, price: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            Price::from_units(price),
            CategoryId::new(1),
        )
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1);
        cart.add(&product(1, 100), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 3);
        assert_eq!(cart.total(), Price::from_units(300));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product(3, 10), 1);
        cart.add(&product(1, 10), 1);
        cart.add(&product(2, 10), 1);
        cart.add(&product(3, 10), 1);

        let ids: Vec<i64> = cart.items().iter().map(|i| i.product_id().as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1);
        cart.add(&product(1, 150), 1);

        assert_eq!(cart.items()[0].product.price, Price::from_units(100));
        assert_eq!(cart.total(), Price::from_units(200));
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1), u32::MAX);
        cart.add(&product(1, 1), 5);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 5);

        assert!(cart.set_quantity(ProductId::new(1), 2));
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        for quantity in [0, -1, i64::MIN] {
            let mut cart = Cart::new();
            cart.add(&product(1, 100), 5);

            assert!(cart.set_quantity(ProductId::new(1), quantity));
            assert!(!cart.contains(ProductId::new(1)));
        }
    }

    #[test]
    fn test_set_quantity_clamps_large_values() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1), 1);

        assert!(cart.set_quantity(ProductId::new(1), i64::MAX));
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1);

        assert!(!cart.set_quantity(ProductId::new(9), 4));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 1);
        cart.add(&product(2, 50), 1);

        assert!(cart.remove(ProductId::new(1)));
        assert!(!cart.remove(ProductId::new(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100), 2);
        cart.add(&product(2, 35), 3);

        assert_eq!(cart.total(), Price::from_units(305));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(Cart::new().total(), Price::ZERO);
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let cart = Cart::from_items([
            CartItem {
                product: product(1, 10),
                quantity: 1,
            },
            CartItem {
                product: product(2, 10),
                quantity: 0,
            },
            CartItem {
                product: product(1, 10),
                quantity: 4,
            },
        ]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }
}
