//! Orders and their line items.

use chrono::Utc;
use rust_decimal::Decimal;
use shop_core::{
    CustomerId, Order, OrderDraft, OrderId, OrderItem, OrderItemDraft, OrderItemId, ValidationErrors,
};
use tracing::{debug, info};

use crate::{
    DeleteSummary, MemoryStore, Result, missing_reference, next_id, not_found, rejected,
    shape_errors,
};

impl MemoryStore {
    fn checked_order_draft(&self, draft: &OrderDraft) -> Result<()> {
        let mut errors = shape_errors(draft.validate());
        if !self.customers.contains_key(&draft.customer) {
            missing_reference(&mut errors, "customer", "Customer", draft.customer.as_i32());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(rejected("order", errors))
        }
    }

    /// Store a new order. Both timestamps are set to now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` for an invalid total cost or a
    /// missing customer.
    pub fn create_order(&mut self, draft: OrderDraft) -> Result<&Order> {
        self.checked_order_draft(&draft)?;

        let id = OrderId::new(next_id(&mut self.sequences.order, "order")?);
        let now = Utc::now();
        let order = draft.into_order(id, now, now).map_err(|e| rejected("order", e))?;

        debug!(order_id = %id, customer_id = %order.customer, status = order.status.code(), "order created");
        Ok(&*self.orders.entry(id).or_insert(order))
    }

    /// Get an order by id.
    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// All orders, in id order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Orders placed by one customer.
    pub fn orders_for(&self, customer: CustomerId) -> impl Iterator<Item = &Order> {
        self.orders.values().filter(move |o| o.customer == customer)
    }

    /// Replace an order's customer, total cost and status.
    ///
    /// Any status may follow any other. `created_at` is kept and `updated_at`
    /// is refreshed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Validation` with every failed rule.
    pub fn update_order(&mut self, id: OrderId, draft: OrderDraft) -> Result<&Order> {
        let created_at = self
            .orders
            .get(&id)
            .map(|o| o.created_at)
            .ok_or_else(|| not_found("order", id.as_i32()))?;
        self.checked_order_draft(&draft)?;

        let order = draft
            .into_order(id, created_at, Utc::now())
            .map_err(|e| rejected("order", e))?;
        debug!(order_id = %id, status = order.status.code(), "order updated");
        self.orders.insert(id, order);
        self.orders
            .get(&id)
            .ok_or_else(|| not_found("order", id.as_i32()))
    }

    /// Delete an order with its items and payments.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub fn delete_order(&mut self, id: OrderId) -> Result<DeleteSummary> {
        if !self.orders.contains_key(&id) {
            return Err(not_found("order", id.as_i32()));
        }

        let mut summary = DeleteSummary::default();
        self.remove_order_cascade(id, &mut summary);

        info!(
            order_id = %id,
            order_items = summary.order_items,
            payments = summary.payments,
            "order deleted"
        );
        Ok(summary)
    }

    pub(crate) fn remove_order_cascade(&mut self, id: OrderId, summary: &mut DeleteSummary) {
        let items = self.order_items.len();
        self.order_items.retain(|_, item| item.order != id);
        summary.order_items += items - self.order_items.len();

        let payments = self.payments.len();
        self.payments.retain(|_, payment| payment.order != id);
        summary.payments += payments - self.payments.len();

        if self.orders.remove(&id).is_some() {
            summary.orders += 1;
        }
    }

    fn check_item_references(&self, errors: &mut ValidationErrors, draft: &OrderItemDraft) {
        if !self.orders.contains_key(&draft.order) {
            missing_reference(errors, "order", "Order", draft.order.as_i32());
        }
        if !self.products.contains_key(&draft.product) {
            missing_reference(errors, "product", "Product", draft.product.as_i32());
        }
    }

    /// Add a line to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the order or product is
    /// missing.
    pub fn create_order_item(&mut self, draft: OrderItemDraft) -> Result<&OrderItem> {
        let mut errors = ValidationErrors::new();
        self.check_item_references(&mut errors, &draft);
        if !errors.is_empty() {
            return Err(rejected("order item", errors));
        }

        let id = OrderItemId::new(next_id(&mut self.sequences.order_item, "order item")?);
        let item = draft.into_order_item(id);

        debug!(
            order_item_id = %id,
            order_id = %item.order,
            product_id = %item.product,
            quantity = item.quantity,
            "order item created"
        );
        Ok(&*self.order_items.entry(id).or_insert(item))
    }

    /// Get an order item by id.
    #[must_use]
    pub fn order_item(&self, id: OrderItemId) -> Option<&OrderItem> {
        self.order_items.get(&id)
    }

    /// Lines of one order, in id order.
    pub fn items_of(&self, order: OrderId) -> impl Iterator<Item = &OrderItem> {
        self.order_items.values().filter(move |i| i.order == order)
    }

    /// Replace an order item's order, product and quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    /// Returns `RepositoryError::Validation` if the order or product is
    /// missing.
    pub fn update_order_item(&mut self, id: OrderItemId, draft: OrderItemDraft) -> Result<&OrderItem> {
        if !self.order_items.contains_key(&id) {
            return Err(not_found("order item", id.as_i32()));
        }

        let mut errors = ValidationErrors::new();
        self.check_item_references(&mut errors, &draft);
        if !errors.is_empty() {
            return Err(rejected("order item", errors));
        }

        debug!(order_item_id = %id, quantity = draft.quantity, "order item updated");
        self.order_items.insert(id, draft.into_order_item(id));
        self.order_items
            .get(&id)
            .ok_or_else(|| not_found("order item", id.as_i32()))
    }

    /// Delete one order item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    pub fn delete_order_item(&mut self, id: OrderItemId) -> Result<OrderItem> {
        let item = self
            .order_items
            .remove(&id)
            .ok_or_else(|| not_found("order item", id.as_i32()))?;
        info!(order_item_id = %id, order_id = %item.order, "order item deleted");
        Ok(item)
    }

    /// Quantity times the current product price, rounded to cents.
    ///
    /// Returns `None` if the item does not exist.
    #[must_use]
    pub fn item_cost(&self, id: OrderItemId) -> Option<Decimal> {
        let item = self.order_items.get(&id)?;
        Some(item.item_cost(self.products.get(&item.product)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shop_core::{OrderStatus, ProductId, ValidationCode};

    use crate::test_support::*;

    use super::*;

    #[test]
    fn test_create_order_sets_timestamps_and_defaults() {
        let s = scenario();
        let order = s.store.order(s.order).unwrap();

        assert_eq!(order.customer, s.buyer);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cost, Decimal::ZERO);
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn test_order_for_missing_customer() {
        let mut store = MemoryStore::new();
        let err = store.create_order(order_draft(CustomerId::new(7))).unwrap_err();
        assert_eq!(
            err.validation().unwrap().codes_for("customer"),
            vec![ValidationCode::DoesNotExist]
        );
        assert_eq!(store.orders().count(), 0);
    }

    #[test]
    fn test_sellers_can_place_orders() {
        let mut s = scenario();
        let order = s.store.create_order(order_draft(s.seller.customer_id())).unwrap().id;
        assert_eq!(s.store.orders_for(s.seller.customer_id()).count(), 1);
        assert_eq!(s.store.orders_for(s.buyer).next().unwrap().id, s.order);
        assert_ne!(order, s.order);
    }

    #[test]
    fn test_any_status_transition_is_allowed() {
        let mut s = scenario();
        let created_at = s.store.order(s.order).unwrap().created_at;

        for status in [OrderStatus::Completed, OrderStatus::Canceled, OrderStatus::Sent] {
            let mut draft = order_draft(s.buyer);
            draft.status = status;
            let order = s.store.update_order(s.order, draft).unwrap();
            assert_eq!(order.status, status);
            assert_eq!(order.created_at, created_at);
            assert!(order.updated_at >= created_at);
        }
    }

    #[test]
    fn test_total_cost_precision_is_checked() {
        let mut s = scenario();
        let mut draft = order_draft(s.buyer);
        draft.total_cost = Decimal::new(1001, 3);

        let err = s.store.update_order(s.order, draft).unwrap_err();
        assert!(
            err.validation()
                .unwrap()
                .has("total_cost", ValidationCode::MaxDecimalPlaces)
        );
    }

    #[test]
    fn test_item_cost_uses_current_price() {
        let mut s = scenario();
        assert_eq!(s.store.item_cost(s.item), Some(Decimal::new(5997, 2)));

        let mut draft = product_draft(s.seller);
        draft.price = Decimal::new(1000, 2);
        s.store.update_product(s.product, draft).unwrap();
        assert_eq!(s.store.item_cost(s.item), Some(Decimal::new(3000, 2)));
        assert_eq!(s.store.item_cost(OrderItemId::new(42)), None);
    }

    #[test]
    fn test_item_with_missing_references() {
        let mut store = MemoryStore::new();
        let err = store
            .create_order_item(item_draft(OrderId::new(1), ProductId::new(1), 1))
            .unwrap_err();
        let errors = err.validation().unwrap();
        assert!(errors.has("order", ValidationCode::DoesNotExist));
        assert!(errors.has("product", ValidationCode::DoesNotExist));
    }

    #[test]
    fn test_items_of_order() {
        let mut s = scenario();
        let second = s
            .store
            .create_order_item(item_draft(s.order, s.product, 1))
            .unwrap()
            .id;
        let ids: Vec<_> = s.store.items_of(s.order).map(|i| i.id).collect();
        assert_eq!(ids, vec![s.item, second]);
    }

    #[test]
    fn test_update_and_delete_item() {
        let mut s = scenario();
        let item = s
            .store
            .update_order_item(s.item, item_draft(s.order, s.product, 0))
            .unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(s.store.item_cost(s.item), Some(Decimal::ZERO));

        let removed = s.store.delete_order_item(s.item).unwrap();
        assert_eq!(removed.id, s.item);
        assert!(s.store.items_of(s.order).next().is_none());
        assert!(s.store.delete_order_item(s.item).is_err());
    }

    #[test]
    fn test_delete_order_removes_items_and_payments() {
        let mut s = scenario();
        let summary = s.store.delete_order(s.order).unwrap();

        assert_eq!(
            summary,
            DeleteSummary {
                orders: 1,
                order_items: 1,
                payments: 1,
                ..DeleteSummary::default()
            }
        );
        assert!(s.store.payment(s.payment).is_none());
        assert!(s.store.product(s.product).is_some());
        assert!(s.store.customer(s.buyer).is_some());
    }
}
