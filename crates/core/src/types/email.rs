//! Customer email addresses.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Dot-atom mailbox, or a quoted string of printable ASCII.
static MAILBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+)*\z",
        r#"|^"([\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*"\z"#,
    ))
    .expect("Invalid regex")
});

/// One or more labels of up to 63 characters, then a top-level label of
/// 2 to 63 characters. A trailing `-` on the top-level label is checked
/// separately.
static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9-]{2,63}\z",
    )
    .expect("Invalid regex")
});

/// Hosts accepted without a dotted domain.
const HOST_ALLOWLIST: &[&str] = &["localhost"];

/// Why a string is not an acceptable address.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("address is empty")]
    Empty,
    #[error("address is longer than {max} characters")]
    TooLong { max: usize },
    #[error("address has no '@'")]
    MissingAtSymbol,
    /// Empty, or characters outside the dot-atom and quoted forms.
    #[error("invalid mailbox before the '@'")]
    InvalidLocalPart,
    /// Not a dotted domain with a top-level label of at least two characters.
    #[error("invalid host name after the '@'")]
    InvalidDomain,
}

/// A customer's email address, checked for shape only.
///
/// The address is kept exactly as entered; no case folding. The host is
/// split off at the last `@`, so a quoted mailbox may contain one.
///
/// ```
/// use shop_core::Email;
///
/// let email = Email::parse("ada+shop@example.co.uk").unwrap();
/// assert_eq!(email.mailbox(), "ada+shop");
/// assert_eq!(email.host(), "example.co.uk");
///
/// assert!(Email::parse("ada@localhost").is_ok());
/// assert!(Email::parse("ada@example.c").is_err());
/// assert!(Email::parse("ada@@example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    address: String,
    at: usize,
}

impl Email {
    /// Longest accepted address, in characters.
    pub const MAX_LENGTH: usize = 254;

    /// Check and wrap an address.
    ///
    /// # Errors
    ///
    /// Returns the first shape problem found, checking length, the `@` sign,
    /// the mailbox, then the host.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        if input.is_empty() {
            return Err(EmailError::Empty);
        }
        if input.chars().count() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let Some((mailbox, host)) = input.rsplit_once('@') else {
            return Err(EmailError::MissingAtSymbol);
        };

        if !MAILBOX_RE.is_match(mailbox) {
            return Err(EmailError::InvalidLocalPart);
        }
        if !is_valid_host(host) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self {
            address: input.to_owned(),
            at: mailbox.len(),
        })
    }

    /// The full address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Part before the `@`.
    #[must_use]
    pub fn mailbox(&self) -> &str {
        self.address.get(..self.at).unwrap_or_default()
    }

    /// Part after the `@`.
    #[must_use]
    pub fn host(&self) -> &str {
        self.address.get(self.at + 1..).unwrap_or_default()
    }
}

fn is_valid_host(host: &str) -> bool {
    HOST_ALLOWLIST.contains(&host) || (HOST_RE.is_match(host) && !host.ends_with('-'))
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.address
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for ok in [
            "ada@example.com",
            "ada.lovelace@mail.example.org",
            "ada+orders@example.io",
            "o'brien@example.ie",
            "ada_l@sub-domain.example.com",
            "ada@localhost",
            "ada@example.xn--p1ai",
            "\"ada..lovelace\"@example.com",
            "\"ada@home\"@example.com",
        ] {
            assert!(Email::parse(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_rejection_reasons() {
        let cases = [
            ("", EmailError::Empty),
            ("ada.example.com", EmailError::MissingAtSymbol),
            ("@example.com", EmailError::InvalidLocalPart),
            ("ada lovelace@example.com", EmailError::InvalidLocalPart),
            ("\"ada lovelace\"@example.com", EmailError::InvalidLocalPart),
            ("a,b@example.com", EmailError::InvalidLocalPart),
            ("ada.@example.com", EmailError::InvalidLocalPart),
            ("ada..l@example.com", EmailError::InvalidLocalPart),
            ("ada@home@example.com", EmailError::InvalidLocalPart),
            ("ada@", EmailError::InvalidDomain),
            ("ada@example", EmailError::InvalidDomain),
            ("x@y.z", EmailError::InvalidDomain),
            ("ada@exa_mple.com", EmailError::InvalidDomain),
            ("ada@-example.com", EmailError::InvalidDomain),
            ("ada@example-.com", EmailError::InvalidDomain),
            ("ada@example.com-", EmailError::InvalidDomain),
            ("ada@.example.com", EmailError::InvalidDomain),
            ("ada@example.com.", EmailError::InvalidDomain),
            ("ada@mail..example.com", EmailError::InvalidDomain),
            ("ada@example.com\n", EmailError::InvalidDomain),
        ];
        for (input, expected) in cases {
            assert_eq!(Email::parse(input), Err(expected), "{input:?}");
        }
    }

    #[test]
    fn test_comma_and_underscore_host_rejected() {
        assert!(Email::parse("a,b@exa_mple.com").is_err());
    }

    #[test]
    fn test_host_label_length() {
        let label = "a".repeat(63);
        assert!(Email::parse(&format!("ada@{label}.com")).is_ok());
        assert!(Email::parse(&format!("ada@example.{label}")).is_ok());

        let long = "a".repeat(64);
        assert_eq!(
            Email::parse(&format!("ada@{long}.com")),
            Err(EmailError::InvalidDomain)
        );
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let host = "@example.com";
        let fits = format!("{}{host}", "a".repeat(Email::MAX_LENGTH - host.len()));
        assert!(Email::parse(&fits).is_ok());

        let over = format!("a{fits}");
        assert_eq!(
            Email::parse(&over),
            Err(EmailError::TooLong {
                max: Email::MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_parts_and_display() {
        let email = Email::parse("Grace.Hopper@Navy.mil").unwrap();
        assert_eq!(email.mailbox(), "Grace.Hopper");
        assert_eq!(email.host(), "Navy.mil");
        assert_eq!(email.to_string(), "Grace.Hopper@Navy.mil");

        let quoted = Email::parse("\"ada@home\"@example.com").unwrap();
        assert_eq!(quoted.mailbox(), "\"ada@home\"");
        assert_eq!(quoted.host(), "example.com");
    }

    #[test]
    fn test_serde_checks_shape() {
        assert!(serde_json::from_str::<Email>("\"ada@example\"").is_err());

        let email: Email = serde_json::from_str("\"ada@localhost\"").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"ada@localhost\"");
    }
}
