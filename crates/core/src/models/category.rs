//! Product categories.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::check_required_text;
use crate::types::CategoryId;
use crate::validation::ValidationErrors;

/// Plural display label.
pub const VERBOSE_NAME_PLURAL: &str = "Categories";

const NAME_MAX: usize = 100;

/// Field values for creating or renaming a category.
///
/// Names must also be unique across stored categories; the store checks that.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    /// Check the name shape.
    ///
    /// # Errors
    ///
    /// Returns `blank` or `max_length` for `name`.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_text(&mut errors, "name", &self.name, NAME_MAX);
        errors.into_result()
    }

    /// Build the stored record.
    ///
    /// # Errors
    ///
    /// Returns every failed rule if the draft is invalid.
    pub fn into_category(self, id: CategoryId) -> Result<Category, ValidationErrors> {
        self.validate()?;
        Ok(Category {
            id,
            name: self.name,
        })
    }
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
