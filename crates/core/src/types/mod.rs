//! Core value types for the shop schema.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod decimal;
pub mod email;
pub mod id;
pub mod status;

pub use decimal::{DecimalFormat, DigitCount};
pub use email::{Email, EmailError};
pub use id::*;
pub use status::OrderStatus;
