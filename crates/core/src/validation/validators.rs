//! Reusable field validators.
//!
//! Each validator checks one rule on one value and returns a
//! [`ValidationError`] carrying a stable [`ValidationCode`]. They do no I/O and
//! can be called on raw form input before any record is built.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::{ValidationCode, ValidationError};
use crate::types::{DecimalFormat, DigitCount, Email};

/// Minimum username length, in characters.
pub const USERNAME_MIN_LENGTH: usize = 3;
/// Maximum username length, in characters.
pub const USERNAME_MAX_LENGTH: usize = 20;
/// Minimum password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Characters that satisfy the password special-character rule.
pub const PASSWORD_SPECIAL_CHARACTERS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("Invalid regex"));
static ALPHABET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]").expect("Invalid regex"));
static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("Invalid regex"));

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Username must be between 3 and 20 characters.
///
/// # Errors
///
/// Returns `invalid_username_length` outside that range.
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let len = char_len(value);
    if (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::InvalidUsernameLength,
            "Username should be between 3 and 20 characters.",
        ))
    }
}

/// Phone number must consist of ASCII digits only.
///
/// # Errors
///
/// Returns `invalid_phone_number` if the value is empty or has any non-digit.
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::InvalidPhoneNumber,
            "Phone number should contain numeric characters.",
        ))
    }
}

/// Password must contain at least one digit.
///
/// # Errors
///
/// Returns `invalid_password_numeric`.
pub fn validate_password_numeric(value: &str) -> Result<(), ValidationError> {
    if DIGIT_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::InvalidPasswordNumeric,
            "Password should contain at least one numeric character.",
        ))
    }
}

/// Password must contain at least one ASCII letter.
///
/// # Errors
///
/// Returns `invalid_password_alphabet`.
pub fn validate_password_alphabet(value: &str) -> Result<(), ValidationError> {
    if ALPHABET_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::InvalidPasswordAlphabet,
            "Password should contain at least one alphabet character.",
        ))
    }
}

/// Password must contain at least one of [`PASSWORD_SPECIAL_CHARACTERS`].
///
/// # Errors
///
/// Returns `invalid_password_special`.
pub fn validate_password_special(value: &str) -> Result<(), ValidationError> {
    if SPECIAL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::InvalidPasswordSpecial,
            "Password should contain at least one special character.",
        ))
    }
}

/// Full password policy: minimum length, then digit, letter and special
/// character rules.
///
/// Every rule is checked; the result lists all failures in that order.
///
/// ```
/// use shop_core::validation::{validate_password, ValidationCode};
///
/// assert!(validate_password("Password1!").is_ok());
///
/// let codes: Vec<_> = validate_password("alllower")
///     .unwrap_err()
///     .into_iter()
///     .map(|e| e.code)
///     .collect();
/// assert_eq!(
///     codes,
///     [ValidationCode::InvalidPasswordNumeric, ValidationCode::InvalidPasswordSpecial]
/// );
/// ```
///
/// # Errors
///
/// Returns every failed rule.
pub fn validate_password(value: &str) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = [
        min_length(value, PASSWORD_MIN_LENGTH),
        validate_password_numeric(value),
        validate_password_alphabet(value),
        validate_password_special(value),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Value must have at least `limit` characters.
///
/// # Errors
///
/// Returns `min_length`.
pub fn min_length(value: &str, limit: usize) -> Result<(), ValidationError> {
    let len = char_len(value);
    if len >= limit {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::MinLength,
            format!("Ensure this value has at least {limit} characters (it has {len})."),
        ))
    }
}

/// Value must have at most `limit` characters.
///
/// # Errors
///
/// Returns `max_length`.
pub fn max_length(value: &str, limit: usize) -> Result<(), ValidationError> {
    let len = char_len(value);
    if len <= limit {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::MaxLength,
            format!("Ensure this value has at most {limit} characters (it has {len})."),
        ))
    }
}

/// Value must not be empty or whitespace only.
///
/// # Errors
///
/// Returns `blank`.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(
            ValidationCode::Blank,
            "This field cannot be blank.",
        ))
    } else {
        Ok(())
    }
}

/// Value must be a well-formed email address (see [`Email::parse`]).
///
/// # Errors
///
/// Returns `invalid_email`.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    Email::parse(value).map(|_| ()).map_err(|e| {
        ValidationError::new(
            ValidationCode::InvalidEmail,
            format!("Enter a valid email address ({e})."),
        )
    })
}

/// Decimal must be at least `limit`.
///
/// # Errors
///
/// Returns `min_value`.
pub fn min_value(value: Decimal, limit: Decimal) -> Result<(), ValidationError> {
    if value >= limit {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::MinValue,
            format!("Ensure this value is greater than or equal to {limit}."),
        ))
    }
}

/// Decimal must be at most `limit`.
///
/// # Errors
///
/// Returns `max_value`.
pub fn max_value(value: Decimal, limit: Decimal) -> Result<(), ValidationError> {
    if value <= limit {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationCode::MaxValue,
            format!("Ensure this value is less than or equal to {limit}."),
        ))
    }
}

/// Decimal must fit the declared column precision.
///
/// Trailing fractional zeros do not count, so `1.50` and `1.5` are equivalent.
///
/// # Errors
///
/// Returns `max_digits`, `max_decimal_places` or `max_whole_digits`, the
/// first that applies.
pub fn decimal_precision(value: Decimal, format: DecimalFormat) -> Result<(), ValidationError> {
    let count = DigitCount::of(value);

    if count.digits > format.max_digits {
        return Err(ValidationError::new(
            ValidationCode::MaxDigits,
            format!(
                "Ensure that there are no more than {} digits in total.",
                format.max_digits
            ),
        ));
    }

    if count.decimals > format.decimal_places {
        return Err(ValidationError::new(
            ValidationCode::MaxDecimalPlaces,
            format!(
                "Ensure that there are no more than {} decimal places.",
                format.decimal_places
            ),
        ));
    }

    if count.whole_digits() > format.max_whole_digits() {
        return Err(ValidationError::new(
            ValidationCode::MaxWholeDigits,
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                format.max_whole_digits()
            ),
        ));
    }

    Ok(())
}
