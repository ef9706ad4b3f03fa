//! Repository error types.

use shop_core::ValidationErrors;
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The record broke one or more rules; every failure is listed.
    ///
    /// Covers field rules as well as missing references (`does_not_exist`),
    /// duplicate category names (`unique`) and username changes (`immutable`).
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Requested entity was not found.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"product"`.
        entity: &'static str,
        /// Requested id.
        id: i32,
    },

    /// The id sequence for an entity kind has no values left.
    #[error("no ids left for {entity}")]
    IdsExhausted {
        /// Entity kind.
        entity: &'static str,
    },
}

impl RepositoryError {
    /// The validation failures, if this is a validation error.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound { .. } | Self::IdsExhausted { .. } => None,
        }
    }
}
