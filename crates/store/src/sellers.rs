//! Seller profiles, stored under their customer's id.

use shop_core::{Seller, SellerDraft, SellerId};
use tracing::{debug, info};

use crate::customers::check_username_unchanged;
use crate::{DeleteSummary, MemoryStore, Result, next_id, not_found, rejected, shape_errors};

impl MemoryStore {
    /// Store a new seller: a customer record plus its seller profile, under
    /// one shared id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` with every failed rule of the
    /// customer and seller fields.
    pub fn create_seller(&mut self, draft: SellerDraft) -> Result<Seller<'_>> {
        draft.validate().map_err(|e| rejected("seller", e))?;

        let id = SellerId::new(next_id(&mut self.sequences.customer, "customer")?);
        let (customer, profile) = draft.into_parts(id).map_err(|e| rejected("seller", e))?;

        debug!(seller_id = %id, username = %customer.username, "seller created");
        self.customers.insert(id.customer_id(), customer);
        self.sellers.insert(id, profile);
        self.seller(id).ok_or_else(|| not_found("seller", id.as_i32()))
    }

    /// Get a seller with its customer record.
    #[must_use]
    pub fn seller(&self, id: SellerId) -> Option<Seller<'_>> {
        let profile = self.sellers.get(&id)?;
        let customer = self.customers.get(&id.customer_id())?;
        Some(Seller { customer, profile })
    }

    /// All sellers, in id order.
    pub fn sellers(&self) -> impl Iterator<Item = Seller<'_>> {
        self.sellers.keys().filter_map(|id| self.seller(*id))
    }

    /// Replace a seller's customer and seller fields. The username must stay
    /// the same.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the seller does not exist.
    /// Returns `RepositoryError::Validation` with every failed rule.
    pub fn update_seller(&mut self, id: SellerId, draft: SellerDraft) -> Result<Seller<'_>> {
        let stored = self
            .seller(id)
            .ok_or_else(|| not_found("seller", id.as_i32()))?;

        let mut errors = shape_errors(draft.validate());
        check_username_unchanged(&mut errors, &stored.customer.username, &draft.customer.username);
        if !errors.is_empty() {
            return Err(rejected("seller", errors));
        }

        let (customer, profile) = draft.into_parts(id).map_err(|e| rejected("seller", e))?;
        self.customers.insert(id.customer_id(), customer);
        self.sellers.insert(id, profile);

        debug!(seller_id = %id, "seller updated");
        self.seller(id).ok_or_else(|| not_found("seller", id.as_i32()))
    }

    /// Delete a seller, its customer record, its products and its orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the seller does not exist.
    pub fn delete_seller(&mut self, id: SellerId) -> Result<DeleteSummary> {
        if !self.sellers.contains_key(&id) {
            return Err(not_found("seller", id.as_i32()));
        }

        let mut summary = DeleteSummary::default();
        self.remove_customer_lineage(id.customer_id(), &mut summary);

        info!(
            seller_id = %id,
            products = summary.products,
            removed = summary.total(),
            "seller deleted"
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shop_core::{CustomerId, ValidationCode};

    use crate::test_support::*;

    use super::*;

    #[test]
    fn test_seller_shares_customer_sequence() {
        let mut store = MemoryStore::new();
        let customer = store.create_customer(customer_draft("plain")).unwrap().id;
        let seller = store.create_seller(seller_draft("merchant")).unwrap().id();

        assert_eq!(customer, CustomerId::new(1));
        assert_eq!(seller, SellerId::new(2));
        assert!(store.is_seller(seller.customer_id()));
        assert!(!store.is_seller(customer));
        // The seller is visible as a customer under the same id.
        assert_eq!(store.customer(seller.customer_id()).unwrap().username, "merchant");
        assert_eq!(store.customers().count(), 2);
        assert_eq!(store.sellers().count(), 1);
    }

    #[test]
    fn test_invalid_seller_reports_customer_and_seller_fields() {
        let mut store = MemoryStore::new();
        let mut draft = seller_draft("merchant");
        draft.customer.phone = "phone".to_owned();
        draft.bank_account_number = String::new();

        let err = store.create_seller(draft).unwrap_err();
        let errors = err.validation().unwrap();
        assert!(errors.has("phone", ValidationCode::InvalidPhoneNumber));
        assert!(errors.has("bank_account_number", ValidationCode::Blank));
        assert_eq!(store.counts().customers, 0);
    }

    #[test]
    fn test_update_seller_profile() {
        let mut store = MemoryStore::new();
        let id = store.create_seller(seller_draft("merchant")).unwrap().id();

        let mut draft = seller_draft("merchant");
        draft.stars = 5;
        draft.verified = false;
        let seller = store.update_seller(id, draft).unwrap();
        assert_eq!(seller.profile.stars, 5);
        assert!(!seller.profile.verified);
    }

    #[test]
    fn test_update_seller_rejects_username_change() {
        let mut store = MemoryStore::new();
        let id = store.create_seller(seller_draft("merchant")).unwrap().id();

        let err = store.update_seller(id, seller_draft("trader")).unwrap_err();
        assert!(
            err.validation()
                .unwrap()
                .has("username", ValidationCode::Immutable)
        );
    }

    #[test]
    fn test_delete_seller_cascades_to_products_and_their_items() {
        let mut s = scenario();
        let summary = s.store.delete_seller(s.seller).unwrap();

        assert_eq!(summary.sellers, 1);
        assert_eq!(summary.customers, 1);
        assert_eq!(summary.products, 1);
        assert_eq!(summary.order_items, 1);
        assert!(s.store.product(s.product).is_none());
        assert!(s.store.order_item(s.item).is_none());
        assert!(s.store.customer(s.seller.customer_id()).is_none());
        // The buyer's order survives without the line.
        assert!(s.store.order(s.order).is_some());
        assert!(s.store.payment(s.payment).is_some());
    }

    #[test]
    fn test_delete_plain_customer_as_seller_fails() {
        let mut store = MemoryStore::new();
        let id = store.create_customer(customer_draft("plain")).unwrap().id;
        assert!(store.delete_seller(SellerId::new(id.as_i32())).is_err());
        assert!(store.customer(id).is_some());
    }
}
