//! Core types for Tote.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod payment;
pub mod price;

pub use email::{Email, EmailError};
pub use id::{ProductId, ProductIdError};
pub use payment::PaymentMethod;
pub use price::{MAX_PRICE, Price, PriceError, format_money, round_to_cents};
