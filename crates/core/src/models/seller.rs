//! Sellers: customers that also list products.
//!
//! A seller is not a separate account. It extends an existing customer record
//! and shares its identity: [`SellerId`] and [`CustomerId`] carry the same
//! value, and removing either side removes the whole lineage.

use serde::{Deserialize, Serialize};

use super::{Customer, CustomerDraft, check_required_text};
use crate::types::{CustomerId, SellerId};
use crate::validation::ValidationErrors;

const BANK_ACCOUNT_MAX: usize = 20;

/// Field values for creating or updating a seller.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerDraft {
    /// The customer fields this seller is built on.
    #[serde(flatten)]
    pub customer: CustomerDraft,
    #[serde(default)]
    pub verified: bool,
    /// At most 20 characters.
    pub bank_account_number: String,
    #[serde(default)]
    pub stars: u32,
}

impl SellerDraft {
    /// Check the customer fields and the seller fields.
    ///
    /// # Errors
    ///
    /// Returns all failed rules, customer fields first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.customer.collect_errors();
        check_required_text(
            &mut errors,
            "bank_account_number",
            &self.bank_account_number,
            BANK_ACCOUNT_MAX,
        );
        errors.into_result()
    }

    /// Split into the customer record and the seller extension.
    ///
    /// # Errors
    ///
    /// Returns every failed rule if the draft is invalid.
    pub fn into_parts(self, id: SellerId) -> Result<(Customer, SellerProfile), ValidationErrors> {
        self.validate()?;
        let customer = self.customer.into_customer(id.customer_id())?;
        let profile = SellerProfile {
            id,
            verified: self.verified,
            bank_account_number: self.bank_account_number,
            stars: self.stars,
        };
        Ok((customer, profile))
    }
}

/// The seller-only fields, stored under the shared id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerProfile {
    pub id: SellerId,
    pub verified: bool,
    pub bank_account_number: String,
    pub stars: u32,
}

/// A seller as read from the store: its customer record and its extension.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Seller<'a> {
    pub customer: &'a Customer,
    pub profile: &'a SellerProfile,
}

impl Seller<'_> {
    /// The shared identity.
    #[must_use]
    pub const fn id(&self) -> SellerId {
        self.profile.id
    }

    /// The id of the underlying customer record.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        self.profile.id.customer_id()
    }
}
