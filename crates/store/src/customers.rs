//! Customer table.

use shop_core::{
    Customer, CustomerDraft, CustomerId, OrderId, ProductId, SellerId, ValidationCode,
    ValidationError, ValidationErrors,
};
use tracing::{debug, info};

use crate::{DeleteSummary, MemoryStore, Result, next_id, not_found, rejected, shape_errors};

/// Record an `immutable` failure if an update tries to change the username.
pub(crate) fn check_username_unchanged(errors: &mut ValidationErrors, stored: &str, requested: &str) {
    if stored != requested {
        errors.push(
            "username",
            ValidationError::new(
                ValidationCode::Immutable,
                "Username cannot be changed after the account is created.",
            ),
        );
    }
}

impl MemoryStore {
    /// Store a new customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` with every failed field rule.
    /// Returns `RepositoryError::IdsExhausted` if no id is left.
    pub fn create_customer(&mut self, draft: CustomerDraft) -> Result<&Customer> {
        draft.validate().map_err(|e| rejected("customer", e))?;

        let id = CustomerId::new(next_id(&mut self.sequences.customer, "customer")?);
        let customer = draft.into_customer(id).map_err(|e| rejected("customer", e))?;

        debug!(customer_id = %id, username = %customer.username, "customer created");
        Ok(&*self.customers.entry(id).or_insert(customer))
    }

    /// Get a customer by id. Sellers are customers too.
    #[must_use]
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// All customers, sellers included, in id order.
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// Whether this customer has a seller profile.
    #[must_use]
    pub fn is_seller(&self, id: CustomerId) -> bool {
        self.sellers.contains_key(&SellerId::new(id.as_i32()))
    }

    /// Replace a customer's fields. The username must stay the same.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer does not exist.
    /// Returns `RepositoryError::Validation` with every failed rule, including
    /// `immutable` for a changed username.
    pub fn update_customer(&mut self, id: CustomerId, draft: CustomerDraft) -> Result<&Customer> {
        let slot = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| not_found("customer", id.as_i32()))?;

        let mut errors = shape_errors(draft.validate());
        check_username_unchanged(&mut errors, &slot.username, &draft.username);
        if !errors.is_empty() {
            return Err(rejected("customer", errors));
        }

        *slot = draft.into_customer(id).map_err(|e| rejected("customer", e))?;
        debug!(customer_id = %id, "customer updated");
        Ok(&*slot)
    }

    /// Delete a customer and everything that depends on it.
    ///
    /// Removes the seller profile (and its products) if the customer is a
    /// seller, and every order placed by the customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer does not exist.
    pub fn delete_customer(&mut self, id: CustomerId) -> Result<DeleteSummary> {
        if !self.customers.contains_key(&id) {
            return Err(not_found("customer", id.as_i32()));
        }

        let mut summary = DeleteSummary::default();
        self.remove_customer_lineage(id, &mut summary);

        info!(customer_id = %id, removed = summary.total(), "customer deleted");
        Ok(summary)
    }

    /// Remove a customer, its seller profile and all dependents.
    pub(crate) fn remove_customer_lineage(&mut self, id: CustomerId, summary: &mut DeleteSummary) {
        let seller_id = SellerId::new(id.as_i32());
        if self.sellers.remove(&seller_id).is_some() {
            summary.sellers += 1;

            let products: Vec<ProductId> = self
                .products
                .values()
                .filter(|p| p.seller == seller_id)
                .map(|p| p.id)
                .collect();
            for product in products {
                self.remove_product_cascade(product, summary);
            }
        }

        let orders: Vec<OrderId> = self
            .orders
            .values()
            .filter(|o| o.customer == id)
            .map(|o| o.id)
            .collect();
        for order in orders {
            self.remove_order_cascade(order, summary);
        }

        if self.customers.remove(&id).is_some() {
            summary.customers += 1;
        }
    }
}
