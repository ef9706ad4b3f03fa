//! Customer accounts.

use core::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::{check_optional_text, check_required_text};
use crate::types::{CustomerId, Email};
use crate::validation::{self, ValidationCode, ValidationError, ValidationErrors};

/// Default first name for customers who leave it blank.
pub const DEFAULT_FIRST_NAME: &str = "dear";
/// Default last name for customers who leave it blank.
pub const DEFAULT_LAST_NAME: &str = "user";

const FIRST_NAME_MAX: usize = 30;
const LAST_NAME_MAX: usize = 50;
const NAME_MIN: usize = 3;
const PHONE_MAX: usize = 11;
const PASSWORD_MAX: usize = 20;
const ADDRESS_MIN: usize = 10;
const ADDRESS_MAX: usize = 1000;

fn default_first_name() -> String {
    DEFAULT_FIRST_NAME.to_owned()
}

fn default_last_name() -> String {
    DEFAULT_LAST_NAME.to_owned()
}

/// Field values for creating or updating a customer.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Deserialize)]
pub struct CustomerDraft {
    /// Optional; 3-30 characters when given.
    #[serde(default = "default_first_name")]
    pub first_name: String,
    /// Optional; 3-50 characters when given.
    #[serde(default = "default_last_name")]
    pub last_name: String,
    /// 3-20 characters. Cannot change once the customer exists.
    pub username: String,
    /// Digits only, at most 11.
    pub phone: String,
    pub email: String,
    /// 8-20 characters with a digit, a letter and a special character.
    pub password: String,
    /// 10-1000 characters.
    pub address: String,
    pub postal_code: i32,
}

impl fmt::Debug for CustomerDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("address", &self.address)
            .field("postal_code", &self.postal_code)
            .finish()
    }
}

impl CustomerDraft {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns all failed rules, grouped by field in declaration order.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.collect_errors().into_result()
    }

    pub(crate) fn collect_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        check_optional_text(&mut errors, "first_name", &self.first_name, NAME_MIN, FIRST_NAME_MAX);
        check_optional_text(&mut errors, "last_name", &self.last_name, NAME_MIN, LAST_NAME_MAX);

        // Only the empty string is blank; spaces count toward the length rule.
        if self.username.is_empty() {
            errors.check("username", validation::required(&self.username));
        } else {
            errors.check("username", validation::validate_username(&self.username));
        }

        if let Err(e) = validation::required(&self.phone) {
            errors.push("phone", e);
        } else {
            errors.check("phone", validation::max_length(&self.phone, PHONE_MAX));
            errors.check("phone", validation::validate_phone_number(&self.phone));
        }

        if let Err(e) = validation::required(&self.email) {
            errors.push("email", e);
        } else {
            errors.check("email", validation::validate_email(&self.email));
        }

        if let Err(e) = validation::required(&self.password) {
            errors.push("password", e);
        } else {
            errors.check("password", validation::max_length(&self.password, PASSWORD_MAX));
            errors.check_all("password", validation::validate_password(&self.password));
        }

        check_required_text(&mut errors, "address", &self.address, ADDRESS_MAX);
        if !self.address.trim().is_empty() {
            errors.check("address", validation::min_length(&self.address, ADDRESS_MIN));
        }

        errors
    }

    /// Build the stored record.
    ///
    /// # Errors
    ///
    /// Returns every failed rule if the draft is invalid.
    pub fn into_customer(self, id: CustomerId) -> Result<Customer, ValidationErrors> {
        self.validate()?;

        let email = Email::parse(&self.email).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.push(
                "email",
                ValidationError::new(ValidationCode::InvalidEmail, e.to_string()),
            );
            errors
        })?;

        Ok(Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            phone: self.phone,
            email,
            password: SecretString::from(self.password),
            address: self.address,
            postal_code: self.postal_code,
        })
    }
}

/// A stored customer.
///
/// The password is never serialized and is redacted in `Debug` output.
#[derive(Debug, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub email: Email,
    #[serde(skip_serializing)]
    pub password: SecretString,
    pub address: String,
    pub postal_code: i32,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    pub(crate) fn valid_draft() -> CustomerDraft {
        CustomerDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            username: "ada".to_owned(),
            phone: "09121234567".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "Password1!".to_owned(),
            address: "12 Analytical Engine Road".to_owned(),
            postal_code: 12345,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn test_username_blank_only_when_empty() {
        let mut draft = valid_draft();
        draft.username = "   ".to_owned();
        assert!(draft.validate().is_ok());

        draft.username = "  ".to_owned();
        assert_eq!(
            draft.validate().unwrap_err().codes_for("username"),
            vec![ValidationCode::InvalidUsernameLength]
        );

        draft.username = String::new();
        assert_eq!(
            draft.validate().unwrap_err().codes_for("username"),
            vec![ValidationCode::Blank]
        );
    }

    #[test]
    fn test_defaults_fill_blank_names() {
        let draft: CustomerDraft = serde_json::from_value(serde_json::json!({
            "username": "grace",
            "phone": "0123",
            "email": "grace@example.com",
            "password": "Password1!",
            "address": "1 Harbour Street",
            "postal_code": 1000
        }))
        .unwrap();

        assert_eq!(draft.first_name, "dear");
        assert_eq!(draft.last_name, "user");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_blank_names_are_allowed() {
        let mut draft = valid_draft();
        draft.first_name = String::new();
        draft.last_name = String::new();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_short_names_fail_min_length() {
        let mut draft = valid_draft();
        draft.first_name = "Al".to_owned();
        draft.last_name = "X".to_owned();
        let errors = draft.validate().unwrap_err();
        assert!(errors.has("first_name", ValidationCode::MinLength));
        assert!(errors.has("last_name", ValidationCode::MinLength));
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let draft = CustomerDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            username: "ad".to_owned(),
            phone: "0912-123".to_owned(),
            email: "not-an-email".to_owned(),
            password: "alllower".to_owned(),
            address: "short".to_owned(),
            postal_code: 1,
        };

        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.codes_for("username"),
            vec![ValidationCode::InvalidUsernameLength]
        );
        assert_eq!(
            errors.codes_for("phone"),
            vec![ValidationCode::InvalidPhoneNumber]
        );
        assert_eq!(errors.codes_for("email"), vec![ValidationCode::InvalidEmail]);
        assert_eq!(
            errors.codes_for("password"),
            vec![
                ValidationCode::InvalidPasswordNumeric,
                ValidationCode::InvalidPasswordSpecial
            ]
        );
        assert_eq!(errors.codes_for("address"), vec![ValidationCode::MinLength]);
    }

    #[test]
    fn test_phone_longer_than_eleven_digits_fails() {
        let mut draft = valid_draft();
        draft.phone = "091212345678".to_owned();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.codes_for("phone"), vec![ValidationCode::MaxLength]);
    }

    #[test]
    fn test_password_longer_than_twenty_fails() {
        let mut draft = valid_draft();
        draft.password = "Password1!Password1!x".to_owned();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.codes_for("password"), vec![ValidationCode::MaxLength]);
    }

    #[test]
    fn test_required_fields_report_blank() {
        let mut draft = valid_draft();
        draft.username = String::new();
        draft.phone = String::new();
        draft.email = String::new();
        draft.password = String::new();
        draft.address = String::new();

        let errors = draft.validate().unwrap_err();
        for field in ["username", "phone", "email", "password", "address"] {
            assert_eq!(errors.codes_for(field), vec![ValidationCode::Blank], "{field}");
        }
    }

    #[test]
    fn test_into_customer_keeps_fields() {
        let customer = valid_draft().into_customer(CustomerId::new(3)).unwrap();
        assert_eq!(customer.id, CustomerId::new(3));
        assert_eq!(customer.email.as_str(), "ada@example.com");
        assert_eq!(customer.password.expose_secret(), "Password1!");
        assert_eq!(customer.to_string(), "Ada Lovelace");
    }

    #[test]
    fn test_password_is_redacted() {
        let draft = valid_draft();
        assert!(!format!("{draft:?}").contains("Password1!"));

        let customer = draft.into_customer(CustomerId::new(1)).unwrap();
        assert!(!format!("{customer:?}").contains("Password1!"));
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("password").is_none());
    }
}
