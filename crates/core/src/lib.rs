//! Shop Core - entity shapes and field validators.
//!
//! This crate defines the storefront records (customers, sellers, categories,
//! products, orders, order items, payments) and the rules a record must meet
//! before it may be stored. `shop-store` enforces them on every write, along
//! with references, uniqueness and cascade delete.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! storage. Validators can run standalone at a form boundary before any
//! persistence attempt.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, email, order status, decimal precision
//! - [`validation`] - Field validators and aggregated validation errors
//! - [`models`] - Entity drafts and stored records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::{FieldError, ValidationCode, ValidationError, ValidationErrors};
