//! Payments against orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::check_decimal;
use crate::types::{DecimalFormat, OrderId, PaymentId};
use crate::validation::ValidationErrors;

/// Field values for recording or updating a payment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentDraft {
    pub order: OrderId,
    /// 20 digits with 2 decimal places.
    pub price: Decimal,
    #[serde(default)]
    pub completed: bool,
}

impl PaymentDraft {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns all failed rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_decimal(
            &mut errors,
            "price",
            self.price,
            DecimalFormat::PAYMENT,
            (None, None),
        );
        errors.into_result()
    }

    /// Build the stored record.
    ///
    /// # Errors
    ///
    /// Returns every failed rule if the draft is invalid.
    pub fn into_payment(
        self,
        id: PaymentId,
        payment_date: DateTime<Utc>,
    ) -> Result<Payment, ValidationErrors> {
        self.validate()?;
        Ok(Payment {
            id,
            order: self.order,
            price: self.price,
            payment_date,
            completed: self.completed,
        })
    }
}

/// A stored payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order: OrderId,
    pub price: Decimal,
    /// Set when the payment is recorded; later updates keep it.
    pub payment_date: DateTime<Utc>,
    pub completed: bool,
}
