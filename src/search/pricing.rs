//! Palindrome discount pricing.

use crate::models::Price;
use serde::{Deserialize, Serialize};

/// Percentage taken off every item when the query is a palindrome.
pub const PALINDROME_DISCOUNT_PERCENT: u8 = 50;

/// Display prices for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedAmount {
    pub original_price: Price,
    pub final_price: Price,
    /// Present only when a discount was applied
    pub discount_percentage: Option<u8>,
}

/// Apply the palindrome discount rule to `original`.
///
/// Without a palindrome match the price passes through unchanged. With one,
/// the final price is half the original, rounded half-up to the cent.
pub fn price(original: Price, is_palindrome_match: bool) -> PricedAmount {
    if !is_palindrome_match {
        return PricedAmount {
            original_price: original,
            final_price: original,
            discount_percentage: None,
        };
    }

    PricedAmount {
        original_price: original,
        final_price: original.halved(),
        discount_percentage: Some(PALINDROME_DISCOUNT_PERCENT),
    }
}
