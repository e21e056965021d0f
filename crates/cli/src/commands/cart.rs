//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! yk-cli cart add --id 1 --name "Tea" --price 100 --quantity 2
//! yk-cli cart update --id 1 --quantity 5
//! yk-cli cart remove --id 1
//! yk-cli cart clear
//! ```

use tracing::info;

use yuvakart_cart::{Cart, CartConfig};
use yuvakart_core::{CategoryId, CurrencyCode, Price, Product, ProductId};

/// Product details given on the command line.
#[derive(Debug, Clone)]
pub struct ProductArgs {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub stock: u32,
    pub category: CategoryId,
    pub description: Option<String>,
}

impl From<ProductArgs> for Product {
    fn from(args: ProductArgs) -> Self {
        let product = Self::new(args.id, args.name, args.price, args.category).with_stock(args.stock);
        match args.description {
            Some(description) => product.with_description(description),
            None => product,
        }
    }
}

/// Log every item and the cart totals.
pub fn show(config: &CartConfig) {
    let cart = config.open_store().get_cart();
    log_cart(&cart);
}

/// Add a product to the cart.
pub fn add(config: &CartConfig, product: ProductArgs, quantity: i64) {
    let store = config.open_store();
    let product = Product::from(product);

    if quantity <= 0 {
        info!(product_id = %product.id, quantity, "Nothing to add");
        return;
    }
    if product.stock > 0 && i64::from(product.stock) < quantity {
        tracing::warn!(
            product_id = %product.id,
            stock = product.stock,
            quantity,
            "Adding more units than are in stock"
        );
    }

    let cart = store.add_to_cart(&product, quantity);
    log_cart(&cart);
}

/// Set an item's quantity.
pub fn update(config: &CartConfig, product_id: ProductId, quantity: i64) {
    let store = config.open_store();
    if !store.is_in_cart(product_id) {
        info!(%product_id, "Product is not in the cart");
        return;
    }

    let cart = store.update_quantity(product_id, quantity);
    if quantity <= 0 {
        info!(%product_id, "Removed from cart");
    }
    log_cart(&cart);
}

/// Remove a product from the cart.
pub fn remove(config: &CartConfig, product_id: ProductId) {
    let store = config.open_store();
    if !store.is_in_cart(product_id) {
        info!(%product_id, "Product is not in the cart");
        return;
    }

    let cart = store.remove_from_cart(product_id);
    info!(%product_id, "Removed from cart");
    log_cart(&cart);
}

/// Delete the stored cart.
pub fn clear(config: &CartConfig) {
    config.open_store().clear_cart();
    info!("Cart cleared");
}

fn log_cart(cart: &Cart) {
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }

    for item in cart {
        info!(
            "  [{}] {} x{} @ {} = {}",
            item.product_id(),
            item.product.name,
            item.quantity,
            item.product.price.display_in(CurrencyCode::INR),
            item.line_total().display_in(CurrencyCode::INR),
        );
    }

    let count = cart.item_count();
    info!(
        "{count} {} in your cart, total {}",
        if count == 1 { "item" } else { "items" },
        cart.total().display_in(CurrencyCode::INR),
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> CartConfig {
        CartConfig {
            data_dir: dir.to_path_buf(),
            ..CartConfig::default()
        }
    }

    fn tea() -> ProductArgs {
        ProductArgs {
            id: ProductId::new(1),
            name: "Tea".to_string(),
            price: Price::from_units(100),
            stock: 10,
            category: CategoryId::new(2),
            description: Some("Assam, 250g".to_string()),
        }
    }

    #[test]
    fn test_product_args_conversion() {
        let product = Product::from(tea());
        assert_eq!(product.stock, 10);
        assert_eq!(product.description, "Assam, 250g");
        assert_eq!(product.category, CategoryId::new(2));
    }

    #[test]
    fn test_add_update_remove_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        add(&config, tea(), 2);
        add(&config, tea(), 1);
        assert_eq!(config.open_store().get_cart_item_count(), 3);

        update(&config, ProductId::new(1), 5);
        assert_eq!(config.open_store().get_cart_item_count(), 5);

        remove(&config, ProductId::new(1));
        assert!(config.open_store().get_cart().is_empty());
    }

    #[test]
    fn test_add_non_positive_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        add(&config, tea(), 0);
        add(&config, tea(), -3);
        assert!(config.open_store().get_cart().is_empty());
        assert!(!dir.path().join("yuvakart_cart.json").exists());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        add(&config, tea(), 1);
        clear(&config);
        assert!(!dir.path().join("yuvakart_cart.json").exists());
    }
}
