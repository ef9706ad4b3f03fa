//! Catalog products.

use core::fmt;
use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{check_decimal, check_required_text};
use crate::types::{CategoryId, DecimalFormat, ProductId, SellerId};
use crate::validation::ValidationErrors;

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 500;

/// Field values for creating or updating a product.
///
/// The store additionally checks that `seller` and every category exist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductDraft {
    /// Required, at most 200 characters.
    pub title: String,
    /// Non-negative, 12 digits with 2 decimal places.
    #[serde(default)]
    pub price: Decimal,
    /// Zero or more categories.
    #[serde(default, alias = "category")]
    pub categories: BTreeSet<CategoryId>,
    /// Required, at most 500 characters.
    pub description: String,
    #[serde(default)]
    pub quantity: u32,
    /// 0-100, 5 digits with 2 decimal places.
    #[serde(default)]
    pub satisfaction_percentage: Decimal,
    pub seller: SellerId,
}

impl ProductDraft {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns all failed rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_text(&mut errors, "title", &self.title, TITLE_MAX);
        check_decimal(
            &mut errors,
            "price",
            self.price,
            DecimalFormat::AMOUNT,
            (Some(Decimal::ZERO), None),
        );
        check_required_text(&mut errors, "description", &self.description, DESCRIPTION_MAX);
        check_decimal(
            &mut errors,
            "satisfaction_percentage",
            self.satisfaction_percentage,
            DecimalFormat::PERCENTAGE,
            (Some(Decimal::ZERO), Some(Decimal::ONE_HUNDRED)),
        );
        errors.into_result()
    }

    /// Build the stored record.
    ///
    /// # Errors
    ///
    /// Returns every failed rule if the draft is invalid.
    pub fn into_product(self, id: ProductId) -> Result<Product, ValidationErrors> {
        self.validate()?;
        Ok(Product {
            id,
            title: self.title,
            price: self.price,
            categories: self.categories,
            description: self.description,
            quantity: self.quantity,
            satisfaction_percentage: self.satisfaction_percentage,
            seller: self.seller,
        })
    }
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub categories: BTreeSet<CategoryId>,
    pub description: String,
    pub quantity: u32,
    pub satisfaction_percentage: Decimal,
    pub seller: SellerId,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
