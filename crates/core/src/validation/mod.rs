//! Validation errors and field validators.
//!
//! Validators are pure functions over a single value. Entity drafts combine
//! them and collect every failure into [`ValidationErrors`], so a caller sees
//! all violated rules of a record at once.

use core::fmt;
use std::borrow::Cow;

use serde::Serialize;

pub mod validators;

pub use validators::*;

/// Machine-readable validation failure code.
///
/// The string form returned by [`ValidationCode::as_str`] is stable; callers
/// may branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum ValidationCode {
    InvalidUsernameLength,
    InvalidPhoneNumber,
    InvalidPasswordNumeric,
    InvalidPasswordAlphabet,
    InvalidPasswordSpecial,
    MinLength,
    MaxLength,
    Blank,
    InvalidEmail,
    MinValue,
    MaxValue,
    MaxDigits,
    MaxDecimalPlaces,
    MaxWholeDigits,
    /// Another stored record already holds this value.
    Unique,
    /// A referenced record does not exist.
    DoesNotExist,
    /// The field cannot change after creation.
    Immutable,
}

impl ValidationCode {
    /// Stable string form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUsernameLength => "invalid_username_length",
            Self::InvalidPhoneNumber => "invalid_phone_number",
            Self::InvalidPasswordNumeric => "invalid_password_numeric",
            Self::InvalidPasswordAlphabet => "invalid_password_alphabet",
            Self::InvalidPasswordSpecial => "invalid_password_special",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Blank => "blank",
            Self::InvalidEmail => "invalid_email",
            Self::MinValue => "min_value",
            Self::MaxValue => "max_value",
            Self::MaxDigits => "max_digits",
            Self::MaxDecimalPlaces => "max_decimal_places",
            Self::MaxWholeDigits => "max_whole_digits",
            Self::Unique => "unique",
            Self::DoesNotExist => "does_not_exist",
            Self::Immutable => "immutable",
        }
    }
}

impl From<ValidationCode> for &'static str {
    fn from(code: ValidationCode) -> Self {
        code.as_str()
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed rule: a code and a human message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Machine-readable code.
    pub code: ValidationCode,
    /// Display message.
    pub message: Cow<'static, str>,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(code: ValidationCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A validation error attributed to a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name, as it appears in the draft.
    pub field: &'static str,
    /// Machine-readable code.
    pub code: ValidationCode,
    /// Display message.
    pub message: Cow<'static, str>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

/// Every rule a record violates, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: &'static str, error: ValidationError) {
        self.0.push(FieldError {
            field,
            code: error.code,
            message: error.message,
        });
    }

    /// Record the failure of a single-rule validator, if any.
    pub fn check(&mut self, field: &'static str, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.push(field, error);
        }
    }

    /// Record every failure of a multi-rule validator.
    pub fn check_all(&mut self, field: &'static str, result: Result<(), Vec<ValidationError>>) {
        if let Err(errors) = result {
            for error in errors {
                self.push(field, error);
            }
        }
    }

    /// Append all failures from `other`.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Whether no failure has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the recorded failures.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Codes recorded for `field`, in order.
    #[must_use]
    pub fn codes_for(&self, field: &str) -> Vec<ValidationCode> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.code)
            .collect()
    }

    /// Whether `field` failed with `code`.
    #[must_use]
    pub fn has(&self, field: &str, code: ValidationCode) -> bool {
        self.0.iter().any(|e| e.field == field && e.code == code)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
