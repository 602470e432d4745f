//! Tote Core - Shared types library.
//!
//! This crate provides common types used across all Tote components:
//! - `storefront` - Cart state engine, catalog filtering, and checkout
//! - `cli` - Command-line front end driving the engine against local files
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, and
//!   payment methods

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
