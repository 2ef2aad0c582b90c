//! Non-negative monetary amount with two fractional digits.
//!
//! Amounts are held as integer cents so that discount arithmetic and
//! rounding are exact. JSON carries the decimal value (`49.99`), or a decimal
//! string (`"90071992547409.93"`) beyond 2^53 cents where a float would drop
//! cents; compact binary formats such as bincode carry the raw cents.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest cent amount an `f64` holds exactly; larger amounts are written to
/// JSON as decimal strings.
const MAX_EXACT_FLOAT_CENTS: i64 = 1 << 53;

/// A price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: i64,
}

/// Error returned when a price cannot be parsed or is out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price must not be negative: {0}")]
    Negative(String),

    #[error("invalid price: {0}")]
    Invalid(String),

    #[error("price has more than two decimal places: {0}")]
    TooPrecise(String),

    #[error("price out of range: {0}")]
    OutOfRange(String),
}

impl Price {
    /// Zero price.
    pub const ZERO: Price = Price { cents: 0 };

    /// Create a price from cents.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative(cents.to_string()));
        }
        Ok(Self { cents })
    }

    /// Create a price from a decimal amount, rounding to the nearest cent.
    pub fn from_decimal(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::Invalid(amount.to_string()));
        }
        if amount < 0.0 {
            return Err(PriceError::Negative(amount.to_string()));
        }
        let cents = (amount * 100.0).round();
        if cents > i64::MAX as f64 {
            return Err(PriceError::OutOfRange(amount.to_string()));
        }
        Ok(Self {
            cents: cents as i64,
        })
    }

    /// Amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Decimal value (e.g. `49.99`).
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Half of this price, rounded half-up to the cent.
    ///
    /// ```
    /// use catalog_search::models::Price;
    /// let p: Price = "33.33".parse().unwrap();
    /// assert_eq!(p.halved().to_string(), "16.67");
    /// ```
    pub fn halved(&self) -> Price {
        // cents >= 0: an odd remainder is exactly half a cent, which rounds up.
        Price {
            cents: self.cents / 2 + self.cents % 2,
        }
    }
}

impl From<u32> for Price {
    fn from(cents: u32) -> Self {
        Self {
            cents: i64::from(cents),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Parse a decimal string such as `"99.99"`, `"100"` or `"0.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(PriceError::Negative(s.to_string()));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty())
            || !digits_only(whole)
            || !digits_only(frac)
        {
            return Err(PriceError::Invalid(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(PriceError::TooPrecise(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| PriceError::OutOfRange(s.to_string()))?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse().unwrap_or(0),
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(|cents| Price { cents })
            .ok_or_else(|| PriceError::OutOfRange(s.to_string()))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            if self.cents <= MAX_EXACT_FLOAT_CENTS {
                serializer.serialize_f64(self.to_decimal())
            } else {
                serializer.collect_str(self)
            }
        } else {
            serializer.serialize_i64(self.cents)
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(DecimalVisitor)
        } else {
            let cents = i64::deserialize(deserializer)?;
            Price::from_cents(cents).map_err(de::Error::custom)
        }
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative decimal amount")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Price::from_decimal(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        v.checked_mul(100)
            .ok_or_else(|| E::custom(PriceError::OutOfRange(v.to_string())))
            .and_then(|c| Price::from_cents(c).map_err(E::custom))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(PriceError::OutOfRange(v.to_string())))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse().map_err(E::custom)
    }
}
