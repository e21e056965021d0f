//! Checkout arithmetic over a cart snapshot.
//!
//! Shipping is a flat charge waived above a subtotal threshold. An
//! [`OrderDraft`] is the order-create payload the backend accepts; submitting
//! it is up to the caller, and a successful submission should be followed by
//! [`CartStore::clear_cart`](crate::CartStore::clear_cart).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use yuvakart_core::{CurrencyCode, Price, ProductId};

use crate::model::Cart;

/// Errors building an order from a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required customer field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Shipping charge rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Price,
    /// Charge applied otherwise.
    pub flat_charge: Price,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Price::from_units(500),
            flat_charge: Price::from_units(50),
        }
    }
}

impl ShippingPolicy {
    /// Shipping charge for a given subtotal.
    #[must_use]
    pub fn charge_for(&self, subtotal: Price) -> Price {
        if subtotal > self.free_shipping_threshold {
            Price::ZERO
        } else {
            self.flat_charge
        }
    }

    /// How much more the shopper must spend before shipping is waived.
    ///
    /// `None` when no charge applies. At exactly the threshold this is zero,
    /// since any further amount ships free.
    #[must_use]
    pub fn amount_to_free_shipping(&self, subtotal: Price) -> Option<Price> {
        if self.charge_for(subtotal).amount().is_zero() {
            return None;
        }
        Some(Price::new(
            self.free_shipping_threshold.amount() - subtotal.amount(),
        ))
    }
}

/// Totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub subtotal: Price,
    pub shipping_charge: Price,
    pub total: Price,
    pub item_count: u64,
}

impl CheckoutSummary {
    /// Compute totals for a cart.
    #[must_use]
    pub fn for_cart(cart: &Cart, policy: &ShippingPolicy) -> Self {
        let subtotal = cart.total();
        let shipping_charge = policy.charge_for(subtotal);
        Self {
            subtotal,
            shipping_charge,
            total: subtotal + shipping_charge,
            item_count: cart.item_count(),
        }
    }
}

/// Customer details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub shipping_address: String,
}

/// One ordered product with the price it was added at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Price,
}

/// Order-create request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub shipping_address: String,
    pub total_amount: Price,
    pub shipping_charge: Price,
    pub items: Vec<OrderLine>,
}

impl OrderDraft {
    /// Build an order from a cart.
    ///
    /// Customer fields are trimmed; a blank email is dropped.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart and
    /// `CheckoutError::MissingField` if name, phone, or address is blank.
    pub fn from_cart(
        customer: &Customer,
        cart: &Cart,
        policy: &ShippingPolicy,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let customer_name = required(&customer.name, "customer name")?;
        let customer_phone = required(&customer.phone, "customer phone")?;
        let shipping_address = required(&customer.shipping_address, "shipping address")?;
        let customer_email = customer
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_owned);

        let summary = CheckoutSummary::for_cart(cart, policy);
        let items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id(),
                quantity: item.quantity,
                price: item.product.price,
            })
            .collect();

        Ok(Self {
            customer_name,
            customer_phone,
            customer_email,
            shipping_address,
            total_amount: summary.total,
            shipping_charge: summary.shipping_charge,
            items,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CheckoutError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Merchant UPI details used to build payment links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpiSettings {
    pub merchant_name: String,
    /// Virtual payment address, e.g. `shop@bank`.
    pub upi_id: String,
}

impl Default for UpiSettings {
    fn default() -> Self {
        Self {
            merchant_name: "YuvaKart".to_string(),
            upi_id: "merchant@upi".to_string(),
        }
    }
}

impl UpiSettings {
    /// `upi://pay` link requesting `amount` in rupees.
    ///
    /// ```
    /// use yuvakart_cart::UpiSettings;
    /// use yuvakart_core::Price;
    ///
    /// let uri = UpiSettings::default().payment_uri(Price::from_units(350));
    /// assert_eq!(uri, "upi://pay?pa=merchant%40upi&pn=YuvaKart&am=350.00&cu=INR");
    /// ```
    #[must_use]
    pub fn payment_uri(&self, amount: Price) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={amount}&cu={}",
            urlencoding::encode(&self.upi_id),
            urlencoding::encode(&self.merchant_name),
            CurrencyCode::INR.code(),
        )
    }
}
