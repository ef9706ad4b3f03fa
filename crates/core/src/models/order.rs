//! Orders and their line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, check_decimal};
use crate::types::{CustomerId, DecimalFormat, OrderId, OrderItemId, OrderStatus, ProductId};
use crate::validation::ValidationErrors;

/// Field values for creating or updating an order.
///
/// Timestamps are not part of the draft; the store manages them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderDraft {
    pub customer: CustomerId,
    /// 12 digits with 2 decimal places.
    #[serde(default)]
    pub total_cost: Decimal,
    /// Any status may replace any other.
    #[serde(default)]
    pub status: OrderStatus,
}

impl OrderDraft {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns all failed rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_decimal(
            &mut errors,
            "total_cost",
            self.total_cost,
            DecimalFormat::AMOUNT,
            (None, None),
        );
        errors.into_result()
    }

    /// Build the stored record with the given timestamps.
    ///
    /// # Errors
    ///
    /// Returns every failed rule if the draft is invalid.
    pub fn into_order(
        self,
        id: OrderId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Order, ValidationErrors> {
        self.validate()?;
        Ok(Order {
            id,
            customer: self.customer,
            created_at,
            updated_at,
            total_cost: self.total_cost,
            status: self.status,
        })
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerId,
    /// Set once, when the order is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every write.
    pub updated_at: DateTime<Utc>,
    pub total_cost: Decimal,
    pub status: OrderStatus,
}

/// Field values for creating or updating an order line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderItemDraft {
    pub order: OrderId,
    pub product: ProductId,
    #[serde(default)]
    pub quantity: u32,
}

impl OrderItemDraft {
    /// Build the stored record. Both references are checked by the store.
    #[must_use]
    pub const fn into_order_item(self, id: OrderItemId) -> OrderItem {
        OrderItem {
            id,
            order: self.order,
            product: self.product,
            quantity: self.quantity,
        }
    }
}

/// A stored order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order: OrderId,
    pub product: ProductId,
    pub quantity: u32,
}

impl OrderItem {
    /// `quantity × product.price`, rounded to cents; zero without a product.
    ///
    /// ```
    /// # use rust_decimal::Decimal;
    /// # use shop_core::*;
    /// let item = OrderItem { id: OrderItemId::new(1), order: OrderId::new(1), product: ProductId::new(1), quantity: 3 };
    /// assert_eq!(item.item_cost(None), Decimal::ZERO);
    /// ```
    #[must_use]
    pub fn item_cost(&self, product: Option<&Product>) -> Decimal {
        product.map_or(Decimal::ZERO, |p| {
            (Decimal::from(self.quantity) * p.price).round_dp(2)
        })
    }
}
