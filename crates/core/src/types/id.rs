//! Canonical product identifier.
//!
//! Catalog payloads and stored cart snapshots may carry product IDs either as
//! JSON numbers or as numeric strings (`"12"`). [`ProductId`] accepts both on
//! the way in and always writes a JSON number, so every comparison inside the
//! cart is a plain integer comparison.

use core::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`ProductId`] from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty (after trimming).
    #[error("product id cannot be empty")]
    Empty,
    /// The input is not a non-negative integer.
    #[error("product id must be a non-negative integer, got {0:?}")]
    NotNumeric(String),
}

/// A type-safe product identifier.
///
/// ```rust
/// # use tote_core::ProductId;
/// let a: ProductId = serde_json::from_str("7").unwrap();
/// let b: ProductId = serde_json::from_str("\"7\"").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(serde_json::to_string(&b).unwrap(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new ID from a u64 value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying u64 value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parse an ID from text, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or not a non-negative
    /// integer.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ProductIdError::NotNumeric(s.to_owned()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProductIdVisitor)
    }
}

struct ProductIdVisitor;

impl Visitor<'_> for ProductIdVisitor {
    type Value = ProductId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ProductId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(ProductId)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_cmp
    )]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // 3.0 is a valid id, 3.5 is not
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
            Ok(ProductId(v as u64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ProductId::parse(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number() {
        let id: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(id, ProductId::new(42));
    }

    #[test]
    fn test_deserialize_numeric_string() {
        let id: ProductId = serde_json::from_str("\" 42 \"").unwrap();
        assert_eq!(id, ProductId::new(42));
    }

    #[test]
    fn test_deserialize_integral_float() {
        let id: ProductId = serde_json::from_str("42.0").unwrap();
        assert_eq!(id, ProductId::new(42));
    }

    #[test]
    fn test_deserialize_rejects_fraction_and_negative() {
        assert!(serde_json::from_str::<ProductId>("4.5").is_err());
        assert!(serde_json::from_str::<ProductId>("-1").is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_numeric() {
        assert!(serde_json::from_str::<ProductId>("\"abc\"").is_err());
        assert!(serde_json::from_str::<ProductId>("null").is_err());
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ProductId::new(9)).unwrap();
        assert_eq!(json, "9");
    }

    #[test]
    fn test_parse() {
        assert_eq!("17".parse::<ProductId>().unwrap(), ProductId::new(17));
        assert_eq!(ProductId::parse("  "), Err(ProductIdError::Empty));
        assert!(matches!(
            ProductId::parse("x1"),
            Err(ProductIdError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ProductId::new(5)), "5");
    }
}
