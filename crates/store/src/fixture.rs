//! Bulk loading of a whole dataset into a store.
//!
//! Sections load in dependency order: customers, sellers, categories,
//! products, orders, order items, payments. Customers and sellers share one
//! id sequence, so in an empty store the first seller gets the id after the
//! last customer. References inside the file use those ids.
//!
//! A failing entry is recorded and skipped; later entries still load. A
//! rejected entry takes no id, so every later entry of the same sequence gets
//! an id one lower than its position suggests. A reference written against
//! the intended ids then points at the wrong record, or fails as
//! `does_not_exist`. [`LoadReport::shifts_ids`] flags this case.

use serde::Deserialize;
use shop_core::{
    CategoryDraft, CustomerDraft, OrderDraft, OrderItemDraft, PaymentDraft, ProductDraft,
    SellerDraft,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{MemoryStore, RepositoryError, StoreCounts};

const REFERENCED_SECTIONS: &[&str] = &["customers", "sellers", "categories", "products", "orders"];

/// A dataset to load, one list per entity kind. Missing sections are empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub customers: Vec<CustomerDraft>,
    pub sellers: Vec<SellerDraft>,
    pub categories: Vec<CategoryDraft>,
    pub products: Vec<ProductDraft>,
    pub orders: Vec<OrderDraft>,
    pub order_items: Vec<OrderItemDraft>,
    pub payments: Vec<PaymentDraft>,
}

/// One fixture entry that could not be stored.
#[derive(Debug, Error)]
#[error("{kind}[{index}]: {source}")]
pub struct FixtureError {
    /// Section name, e.g. `"products"`.
    pub kind: &'static str,
    /// Position within the section, starting at 0.
    pub index: usize,
    #[source]
    pub source: RepositoryError,
}

/// Outcome of [`Fixture::load_into`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records in the store after loading.
    pub counts: StoreCounts,
    /// Every entry that failed, in load order.
    pub failures: Vec<FixtureError>,
}

impl LoadReport {
    /// Whether every entry loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether a rejected entry belongs to a section whose ids other
    /// sections refer to: customers, sellers, categories, products or orders.
    #[must_use]
    pub fn shifts_ids(&self) -> bool {
        self.failures.iter().any(|f| REFERENCED_SECTIONS.contains(&f.kind))
    }

    fn record<T>(&mut self, kind: &'static str, index: usize, result: Result<T, RepositoryError>) {
        if let Err(source) = result {
            warn!(kind, index, error = %source, "fixture entry rejected");
            self.failures.push(FixtureError {
                kind,
                index,
                source,
            });
        }
    }
}

impl Fixture {
    /// Total number of entries across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.len()
            + self.sellers.len()
            + self.categories.len()
            + self.products.len()
            + self.orders.len()
            + self.order_items.len()
            + self.payments.len()
    }

    /// Whether the fixture has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store every entry, continuing past failures.
    pub fn load_into(self, store: &mut MemoryStore) -> LoadReport {
        let mut report = LoadReport::default();
        let total = self.len();

        for (i, draft) in self.customers.into_iter().enumerate() {
            report.record("customers", i, store.create_customer(draft).map(|_| ()));
        }
        for (i, draft) in self.sellers.into_iter().enumerate() {
            report.record("sellers", i, store.create_seller(draft).map(|_| ()));
        }
        for (i, draft) in self.categories.into_iter().enumerate() {
            report.record("categories", i, store.create_category(draft).map(|_| ()));
        }
        for (i, draft) in self.products.into_iter().enumerate() {
            report.record("products", i, store.create_product(draft).map(|_| ()));
        }
        for (i, draft) in self.orders.into_iter().enumerate() {
            report.record("orders", i, store.create_order(draft).map(|_| ()));
        }
        for (i, draft) in self.order_items.into_iter().enumerate() {
            report.record("order_items", i, store.create_order_item(draft).map(|_| ()));
        }
        for (i, draft) in self.payments.into_iter().enumerate() {
            report.record("payments", i, store.create_payment(draft).map(|_| ()));
        }

        report.counts = store.counts();
        if report.shifts_ids() {
            warn!("rejected entries shifted later ids; references after them may not match");
        }
        info!(
            entries = total,
            failed = report.failures.len(),
            "fixture loaded"
        );
        report
    }
}
