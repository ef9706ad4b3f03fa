//! Payment table.

use chrono::Utc;
use shop_core::{OrderId, Payment, PaymentDraft, PaymentId};
use tracing::{debug, info};

use crate::{MemoryStore, Result, missing_reference, next_id, not_found, rejected, shape_errors};

impl MemoryStore {
    fn checked_payment_draft(&self, draft: &PaymentDraft) -> Result<()> {
        let mut errors = shape_errors(draft.validate());
        if !self.orders.contains_key(&draft.order) {
            missing_reference(&mut errors, "order", "Order", draft.order.as_i32());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(rejected("payment", errors))
        }
    }

    /// Record a payment against an order, dated now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` for an invalid price or a
    /// missing order.
    pub fn create_payment(&mut self, draft: PaymentDraft) -> Result<&Payment> {
        self.checked_payment_draft(&draft)?;

        let id = PaymentId::new(next_id(&mut self.sequences.payment, "payment")?);
        let payment = draft
            .into_payment(id, Utc::now())
            .map_err(|e| rejected("payment", e))?;

        debug!(
            payment_id = %id,
            order_id = %payment.order,
            price = %payment.price,
            completed = payment.completed,
            "payment created"
        );
        Ok(&*self.payments.entry(id).or_insert(payment))
    }

    /// Get a payment by id.
    #[must_use]
    pub fn payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.get(&id)
    }

    /// All payments, in id order.
    pub fn payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.values()
    }

    /// Payments made against one order.
    pub fn payments_for(&self, order: OrderId) -> impl Iterator<Item = &Payment> {
        self.payments.values().filter(move |p| p.order == order)
    }

    /// Replace a payment's order, price and completion flag. The payment
    /// date is kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the payment does not exist.
    /// Returns `RepositoryError::Validation` with every failed rule.
    pub fn update_payment(&mut self, id: PaymentId, draft: PaymentDraft) -> Result<&Payment> {
        let payment_date = self
            .payments
            .get(&id)
            .map(|p| p.payment_date)
            .ok_or_else(|| not_found("payment", id.as_i32()))?;
        self.checked_payment_draft(&draft)?;

        let payment = draft
            .into_payment(id, payment_date)
            .map_err(|e| rejected("payment", e))?;
        debug!(payment_id = %id, completed = payment.completed, "payment updated");
        self.payments.insert(id, payment);
        self.payments
            .get(&id)
            .ok_or_else(|| not_found("payment", id.as_i32()))
    }

    /// Delete one payment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the payment does not exist.
    pub fn delete_payment(&mut self, id: PaymentId) -> Result<Payment> {
        let payment = self
            .payments
            .remove(&id)
            .ok_or_else(|| not_found("payment", id.as_i32()))?;
        info!(payment_id = %id, order_id = %payment.order, "payment deleted");
        Ok(payment)
    }
}
