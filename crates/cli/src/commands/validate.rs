//! Validate a single record file against the field rules.
//!
//! Only field rules run here. References and uniqueness need a store; use
//! `shop-cli load` for those.
//!
//! # Usage
//!
//! ```bash
//! shop-cli validate customer customer.yaml
//! shop-cli validate product product.json
//! ```

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use shop_core::{
    CategoryDraft, CustomerDraft, OrderDraft, OrderItemDraft, PaymentDraft, ProductDraft,
    SellerDraft, ValidationErrors,
};
use tracing::{error, info};

use super::{InputError, read_document};

/// Record kinds accepted by `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Customer,
    Seller,
    Category,
    Product,
    Order,
    OrderItem,
    Payment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
            Self::Category => "category",
            Self::Product => "product",
            Self::Order => "order",
            Self::OrderItem => "order-item",
            Self::Payment => "payment",
        };
        f.write_str(name)
    }
}

async fn field_errors<T>(
    path: &Path,
    validate: impl FnOnce(&T) -> Result<(), ValidationErrors>,
) -> Result<ValidationErrors, InputError>
where
    T: serde::de::DeserializeOwned,
{
    let draft: T = read_document(path).await?;
    Ok(validate(&draft).err().unwrap_or_default())
}

/// Read a record of the given kind and collect its field failures.
///
/// Order items have no field rules; a file that deserializes is valid.
///
/// # Errors
///
/// Returns `InputError` if the file cannot be read or deserialized.
pub async fn check_file(kind: RecordKind, path: &Path) -> Result<ValidationErrors, InputError> {
    match kind {
        RecordKind::Customer => field_errors(path, CustomerDraft::validate).await,
        RecordKind::Seller => field_errors(path, SellerDraft::validate).await,
        RecordKind::Category => field_errors(path, CategoryDraft::validate).await,
        RecordKind::Product => field_errors(path, ProductDraft::validate).await,
        RecordKind::Order => field_errors(path, OrderDraft::validate).await,
        RecordKind::OrderItem => field_errors(path, |_: &OrderItemDraft| Ok(())).await,
        RecordKind::Payment => field_errors(path, PaymentDraft::validate).await,
    }
}

/// Validate one record file and log every failure.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the record breaks any rule.
pub async fn run(kind: RecordKind, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(%kind, path = %path.display(), "Validating record");

    let errors = check_file(kind, path).await?;
    if errors.is_empty() {
        info!(%kind, "Record is valid");
        return Ok(());
    }

    error!(%kind, report = %serde_json::to_string(&errors)?, "Record validation failed:");
    for err in &errors {
        error!("  - {err}");
    }
    Err(format!("{} validation errors found", errors.len()).into())
}
