//! Checkout commands.
//!
//! # Usage
//!
//! ```bash
//! yk-cli checkout summary
//! yk-cli checkout draft -n "Asha Rao" -p 9876543210 -a "12 MG Road, Guntur"
//! yk-cli checkout upi
//! yk-cli checkout complete
//! ```

use thiserror::Error;
use tracing::info;

use yuvakart_cart::{CartConfig, CheckoutError, CheckoutSummary, Customer, OrderDraft};
use yuvakart_core::CurrencyCode;

/// Errors that can occur during checkout commands.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    /// The order could not be built.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// The order payload could not be serialized.
    #[error("Failed to serialize order: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Log subtotal, shipping, and total.
pub fn summary(config: &CartConfig) {
    let cart = config.open_store().get_cart();
    let summary = CheckoutSummary::for_cart(&cart, &config.shipping);

    info!("Items:    {}", summary.item_count);
    info!("Subtotal: {}", summary.subtotal.display_in(CurrencyCode::INR));
    if summary.shipping_charge.amount().is_zero() {
        info!("Shipping: FREE");
    } else {
        info!(
            "Shipping: {} (free above {})",
            summary.shipping_charge.display_in(CurrencyCode::INR),
            config
                .shipping
                .free_shipping_threshold
                .display_in(CurrencyCode::INR),
        );
    }
    if let Some(remaining) = config.shipping.amount_to_free_shipping(summary.subtotal) {
        info!(
            "Add {} more for free shipping",
            remaining.display_in(CurrencyCode::INR)
        );
    }
    info!("Total:    {}", summary.total.display_in(CurrencyCode::INR));
}

/// Build the order payload for the current cart.
///
/// # Errors
///
/// Returns an error if the cart is empty or a required field is blank.
pub fn build_draft(
    config: &CartConfig,
    customer: &Customer,
) -> Result<OrderDraft, CheckoutCommandError> {
    let cart = config.open_store().get_cart();
    Ok(OrderDraft::from_cart(customer, &cart, &config.shipping)?)
}

/// Print the order payload as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the draft cannot be built or serialized.
#[allow(clippy::print_stdout)] // The payload is the command's output
pub fn draft(config: &CartConfig, customer: &Customer) -> Result<(), CheckoutCommandError> {
    let draft = build_draft(config, customer)?;
    info!(
        items = draft.items.len(),
        total = %draft.total_amount,
        "Order draft ready"
    );
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}

/// Build the UPI payment link for the current total.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is nothing to pay for.
pub fn upi_link(config: &CartConfig) -> Result<String, CheckoutCommandError> {
    let cart = config.open_store().get_cart();
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    let summary = CheckoutSummary::for_cart(&cart, &config.shipping);
    Ok(config.upi.payment_uri(summary.total))
}

/// Print the UPI payment link on stdout.
///
/// # Errors
///
/// Returns an error if the cart is empty.
#[allow(clippy::print_stdout)] // The link is the command's output
pub fn upi(config: &CartConfig) -> Result<(), CheckoutCommandError> {
    let link = upi_link(config)?;
    info!(merchant = %config.upi.merchant_name, "Pay with any UPI app");
    println!("{link}");
    Ok(())
}

/// Clear the cart once the order has been accepted.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is no cart to complete.
pub fn complete(config: &CartConfig) -> Result<(), CheckoutCommandError> {
    let store = config.open_store();
    let count = store.get_cart_item_count();
    if count == 0 {
        return Err(CheckoutError::EmptyCart.into());
    }

    store.clear_cart();
    info!(items = count, "Checkout complete, cart cleared");
    Ok(())
}
