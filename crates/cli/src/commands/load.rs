//! Load a fixture file into a fresh in-memory store.
//!
//! Runs every field, reference and uniqueness rule, and reports all failing
//! entries. Nothing is persisted.
//!
//! # Usage
//!
//! ```bash
//! shop-cli load fixtures/shop.yaml
//! ```

use std::path::Path;

use shop_store::MemoryStore;
use shop_store::fixture::{Fixture, LoadReport};
use tracing::{error, info};

use super::{InputError, read_document};

/// Read a fixture and load it into an empty store.
///
/// # Errors
///
/// Returns `InputError` if the file cannot be read or deserialized.
pub async fn load_file(path: &Path) -> Result<(MemoryStore, LoadReport), InputError> {
    let fixture: Fixture = read_document(path).await?;
    info!(entries = fixture.len(), "Parsed fixture");

    let mut store = MemoryStore::new();
    let report = fixture.load_into(&mut store);
    Ok((store, report))
}

/// Load a fixture file and log the resulting row counts and every failure.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any entry was rejected.
pub async fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %path.display(), "Loading fixture");

    let (_store, report) = load_file(path).await?;

    let counts = report.counts;
    info!("Load complete!");
    info!("  Customers: {}", counts.customers);
    info!("  Sellers: {}", counts.sellers);
    info!("  Categories: {}", counts.categories);
    info!("  Products: {}", counts.products);
    info!("  Orders: {}", counts.orders);
    info!("  Order items: {}", counts.order_items);
    info!("  Payments: {}", counts.payments);

    if report.is_clean() {
        return Ok(());
    }

    error!("  Rejected entries: {}", report.failures.len());
    for failure in &report.failures {
        error!("    - {failure}");
    }
    Err(format!("{} fixture entries rejected", report.failures.len()).into())
}
