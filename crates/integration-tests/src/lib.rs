//! Integration tests for the shop crates.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cascade` - Delete chains across customers, sellers, products and orders
//! - `fixtures` - Loading the sample fixture files under `fixtures/`
//! - `validation` - Field rules seen through the store's write path

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use rust_decimal::Decimal;
use shop_core::{CustomerDraft, OrderId, PaymentDraft, ProductDraft, SellerDraft, SellerId};
use shop_store::MemoryStore;
use shop_store::fixture::{Fixture, LoadReport};

/// Path of a file under this crate's `fixtures/` directory.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Parse a fixture file by extension and load it into a fresh store.
///
/// # Panics
///
/// Panics if the file cannot be read or parsed; fixture files are part of the
/// test suite.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn load_fixture(name: &str) -> (MemoryStore, LoadReport) {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path).unwrap();
    let fixture: Fixture = if name.ends_with(".json") {
        serde_json::from_str(&content).unwrap()
    } else {
        serde_yaml::from_str(&content).unwrap()
    };

    let mut store = MemoryStore::new();
    let report = fixture.load_into(&mut store);
    (store, report)
}

/// A customer draft that passes every field rule.
#[must_use]
pub fn customer(username: &str) -> CustomerDraft {
    CustomerDraft {
        first_name: "Alan".to_owned(),
        last_name: "Turing".to_owned(),
        username: username.to_owned(),
        phone: "09127654321".to_owned(),
        email: format!("{username}@example.org"),
        password: "Enigma1912!".to_owned(),
        address: "7 Bletchley Park Road".to_owned(),
        postal_code: 54321,
    }
}

/// A verified seller draft that passes every field rule.
#[must_use]
pub fn seller(username: &str) -> SellerDraft {
    SellerDraft {
        customer: customer(username),
        verified: true,
        bank_account_number: "IR0099887766".to_owned(),
        stars: 3,
    }
}

/// A product draft for the given seller, with no categories.
#[must_use]
pub fn product(seller: SellerId, title: &str, price: Decimal) -> ProductDraft {
    ProductDraft {
        title: title.to_owned(),
        price,
        categories: std::collections::BTreeSet::new(),
        description: format!("{title} for integration tests."),
        quantity: 10,
        satisfaction_percentage: Decimal::ZERO,
        seller,
    }
}

/// An incomplete payment of `price` for the given order.
#[must_use]
pub const fn payment(order: OrderId, price: Decimal) -> PaymentDraft {
    PaymentDraft {
        order,
        price,
        completed: false,
    }
}
