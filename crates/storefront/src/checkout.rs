//! Checkout: order totals and form validation.
//!
//! No payment is taken and no order is sent anywhere. Placing an order
//! validates the form, prices the cart and empties it (see
//! [`Store::place_order`](crate::store::Store::place_order)).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tote_core::{Email, PaymentMethod};
use uuid::Uuid;

// =============================================================================
// Pricing
// =============================================================================

/// Tax and shipping rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRules {
    /// Fraction of the subtotal charged as tax (0.10 = 10%).
    pub tax_rate: Decimal,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping charge below the threshold.
    pub shipping_fee: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(10, 2),
            free_shipping_threshold: Decimal::from(50),
            shipping_fee: Decimal::from(10),
        }
    }
}

/// Totals shown in the cart and on the order confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    /// How much more to spend for free shipping, when it does not apply yet.
    pub remaining_for_free_shipping: Option<Decimal>,
}

impl OrderSummary {
    /// Price a subtotal. Amounts saturate at [`Decimal::MAX`].
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, rules: &PricingRules) -> Self {
        let tax = subtotal.saturating_mul(rules.tax_rate);
        let free = subtotal > rules.free_shipping_threshold;
        let shipping = if free { Decimal::ZERO } else { rules.shipping_fee };

        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal.saturating_add(tax).saturating_add(shipping),
            remaining_for_free_shipping: (!free)
                .then(|| rules.free_shipping_threshold.saturating_sub(subtotal)),
        }
    }

    /// Whether shipping is free.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

// =============================================================================
// Form
// =============================================================================

/// A checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    PaymentMethod,
}

impl CheckoutField {
    /// Form field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::PaymentMethod => "paymentMethod",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-wise validation messages, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<CheckoutField, &'static str>);

impl ValidationErrors {
    fn insert(&mut self, field: CheckoutField, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: CheckoutField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Failed fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (CheckoutField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Errors that can occur when placing an order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("Your cart is empty")]
    EmptyCart,

    /// One or more form fields are invalid.
    #[error("Please fix the highlighted errors: {0}")]
    Invalid(ValidationErrors),
}

/// Raw checkout form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub payment_method: String,
}

/// Contact and delivery details from a valid form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Ten digits.
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Digits only.
    pub zip_code: String,
    pub payment_method: PaymentMethod,
}

/// Keep only ASCII digits, as the phone and ZIP inputs do while typing.
#[must_use]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn required(
    errors: &mut ValidationErrors,
    field: CheckoutField,
    value: &str,
    message: &'static str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, message);
    }
    trimmed.to_owned()
}

impl CheckoutForm {
    /// Check every field and collect all failures.
    ///
    /// Phone and ZIP code are reduced to their digits first. Text fields are
    /// trimmed in the returned details.
    ///
    /// # Errors
    ///
    /// Returns the messages for every invalid field.
    pub fn validate(&self) -> Result<CheckoutDetails, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let first_name = required(
            &mut errors,
            CheckoutField::FirstName,
            &self.first_name,
            "Please enter your first name.",
        );
        let last_name = required(
            &mut errors,
            CheckoutField::LastName,
            &self.last_name,
            "Please enter your last name.",
        );

        let email = Email::parse(&self.email).ok();
        if email.is_none() {
            errors.insert(CheckoutField::Email, "Please enter a valid email address.");
        }

        let phone = digits_only(&self.phone);
        if phone.len() != 10 {
            errors.insert(CheckoutField::Phone, "Please enter a 10 digit phone number.");
        }

        let address = required(
            &mut errors,
            CheckoutField::Address,
            &self.address,
            "Please enter your address.",
        );
        let city = required(
            &mut errors,
            CheckoutField::City,
            &self.city,
            "Please enter your city.",
        );
        let state = required(
            &mut errors,
            CheckoutField::State,
            &self.state,
            "Please enter your state.",
        );

        let zip_code = digits_only(&self.zip_code);
        if zip_code.is_empty() {
            errors.insert(CheckoutField::ZipCode, "Please enter your ZIP code.");
        }

        let payment_method = self.payment_method.trim().parse::<PaymentMethod>().ok();
        if payment_method.is_none() {
            errors.insert(
                CheckoutField::PaymentMethod,
                "Please select a payment method.",
            );
        }

        match (email, payment_method) {
            (Some(email), Some(payment_method)) if errors.is_empty() => Ok(CheckoutDetails {
                first_name,
                last_name,
                email,
                phone,
                address,
                city,
                state,
                zip_code,
                payment_method,
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// Record of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Order reference shown to the shopper.
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    /// Units ordered.
    pub item_count: u64,
    pub summary: OrderSummary,
    pub customer: CheckoutDetails,
}
