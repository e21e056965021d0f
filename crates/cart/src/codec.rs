//! JSON encoding of the persisted cart.
//!
//! The stored layout is a JSON array of `{ "product": Product, "quantity": n }`
//! objects with no version marker. Anything that does not match that shape is
//! a [`DecodeError`]; callers decide whether to surface it or fall back to an
//! empty cart.

use thiserror::Error;

use yuvakart_core::ProductId;

use crate::model::{Cart, CartItem};

/// Errors decoding a stored cart blob.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The blob is not a JSON array of cart items.
    #[error("malformed cart data: {0}")]
    Json(#[from] serde_json::Error),

    /// An item was stored with a quantity of zero.
    #[error("cart item for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// Errors encoding a cart for storage.
#[derive(Debug, Error)]
#[error("failed to encode cart: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Decode a stored cart.
///
/// Duplicate entries for the same product are merged into the first one.
///
/// # Errors
///
/// Returns `DecodeError` if the input is not valid cart JSON or an item has a
/// zero quantity. Negative quantities fail as JSON errors.
pub fn decode(data: &str) -> Result<Cart, DecodeError> {
    let items: Vec<CartItem> = serde_json::from_str(data)?;

    if let Some(item) = items.iter().find(|item| item.quantity == 0) {
        return Err(DecodeError::ZeroQuantity(item.product_id()));
    }

    Ok(Cart::from_items(items))
}

/// Encode a cart for storage.
///
/// # Errors
///
/// Returns `EncodeError` if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(cart)?)
}
