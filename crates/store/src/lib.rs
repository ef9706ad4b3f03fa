//! Shop Store - ownership-based storage for the shop schema.
//!
//! [`MemoryStore`] owns every table. Reads take `&self`; writes take
//! `&mut self`, so a uniqueness check and the write it guards always happen
//! under the same exclusive borrow. Callers that share a store across threads
//! wrap it in their own lock.
//!
//! # Write path
//!
//! Every create and update:
//! 1. validates the draft (all field rules),
//! 2. checks references and uniqueness against the current tables,
//! 3. stores the record only if steps 1 and 2 found nothing.
//!
//! All failures from steps 1 and 2 are returned together as
//! [`RepositoryError::Validation`].
//!
//! # Cascade delete
//!
//! | Deleting | Also removes |
//! |---|---|
//! | Customer | its seller profile, products, orders |
//! | Seller | its customer record, products, orders |
//! | Product | order items for it, its category links |
//! | Order | its order items and payments |
//! | Category | only its links from products |

#![cfg_attr(not(test), forbid(unsafe_code))]

mod categories;
mod customers;
pub mod error;
pub mod fixture;
mod orders;
mod payments;
mod products;
mod sellers;

use std::collections::BTreeMap;

use serde::Serialize;
use shop_core::{
    Category, CategoryId, Customer, CustomerId, Order, OrderId, OrderItem, OrderItemId, Payment,
    PaymentId, Product, ProductId, SellerId, SellerProfile, ValidationCode, ValidationError,
    ValidationErrors,
};

pub use error::RepositoryError;

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Next free id per table. Customers and sellers share one sequence.
#[derive(Debug, Default)]
struct Sequences {
    customer: i32,
    category: i32,
    product: i32,
    order: i32,
    order_item: i32,
    payment: i32,
}

fn next_id(counter: &mut i32, entity: &'static str) -> Result<i32> {
    let id = counter
        .checked_add(1)
        .ok_or(RepositoryError::IdsExhausted { entity })?;
    *counter = id;
    Ok(id)
}

/// What a delete removed, including everything removed by cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub customers: usize,
    pub sellers: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
    pub payments: usize,
}

impl DeleteSummary {
    /// Total number of records removed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.customers + self.sellers + self.products + self.orders + self.order_items + self.payments
    }
}

/// In-memory store for all shop entities.
#[derive(Debug, Default)]
pub struct MemoryStore {
    customers: BTreeMap<CustomerId, Customer>,
    sellers: BTreeMap<SellerId, SellerProfile>,
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
    order_items: BTreeMap<OrderItemId, OrderItem>,
    payments: BTreeMap<PaymentId, Payment>,
    sequences: Sequences,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records per table.
    #[must_use]
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            customers: self.customers.len(),
            sellers: self.sellers.len(),
            categories: self.categories.len(),
            products: self.products.len(),
            orders: self.orders.len(),
            order_items: self.order_items.len(),
            payments: self.payments.len(),
        }
    }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub customers: usize,
    pub sellers: usize,
    pub categories: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
    pub payments: usize,
}

/// Record a `does_not_exist` failure for a reference field.
fn missing_reference(
    errors: &mut ValidationErrors,
    field: &'static str,
    entity: &'static str,
    id: i32,
) {
    errors.push(
        field,
        ValidationError::new(
            ValidationCode::DoesNotExist,
            format!("{entity} instance with id {id} does not exist."),
        ),
    );
}

/// Start from the draft's own failures, or an empty set.
fn shape_errors(result: std::result::Result<(), ValidationErrors>) -> ValidationErrors {
    result.err().unwrap_or_default()
}

/// Log and wrap a rejected write.
fn rejected(entity: &'static str, errors: ValidationErrors) -> RepositoryError {
    tracing::warn!(entity, failures = errors.len(), errors = %errors, "write rejected");
    RepositoryError::Validation(errors)
}

const fn not_found(entity: &'static str, id: i32) -> RepositoryError {
    RepositoryError::NotFound { entity, id }
}
