//! Entity drafts and stored records.
//!
//! A *draft* carries the field values a caller supplies, with the documented
//! defaults filled in on deserialization. `validate()` checks every field rule
//! and reports all failures together; `into_*` builds the stored record once
//! the draft is valid. Identity and system-managed timestamps are assigned by
//! the store, never by the caller.
//!
//! Rules that need stored state (referenced records exist, category names are
//! unique) are checked by the store on top of these.

pub mod category;
pub mod customer;
pub mod order;
pub mod payment;
pub mod product;
pub mod seller;

pub use category::{Category, CategoryDraft};
pub use customer::{Customer, CustomerDraft};
pub use order::{Order, OrderDraft, OrderItem, OrderItemDraft};
pub use payment::{Payment, PaymentDraft};
pub use product::{Product, ProductDraft};
pub use seller::{Seller, SellerDraft, SellerProfile};

use rust_decimal::Decimal;

use crate::types::DecimalFormat;
use crate::validation::{self, ValidationErrors};

/// Required text: not blank, at most `max` characters.
fn check_required_text(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if let Err(e) = validation::required(value) {
        errors.push(field, e);
        return;
    }
    errors.check(field, validation::max_length(value, max));
}

/// Optional text: blank is accepted as-is; otherwise `min..=max` characters.
fn check_optional_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.is_empty() {
        return;
    }
    errors.check(field, validation::min_length(value, min));
    errors.check(field, validation::max_length(value, max));
}

/// Decimal column precision plus optional bounds.
fn check_decimal(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Decimal,
    format: DecimalFormat,
    bounds: (Option<Decimal>, Option<Decimal>),
) {
    errors.check(field, validation::decimal_precision(value, format));
    if let Some(min) = bounds.0 {
        errors.check(field, validation::min_value(value, min));
    }
    if let Some(max) = bounds.1 {
        errors.check(field, validation::max_value(value, max));
    }
}
