use std::fmt;

use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMS Broadcast account credentials (`username` + `password`).
///
/// Construction never fails: emptiness is checked when a request is built, so
/// credentials can be filled in late (for example after reading a secret store).
/// `Debug` output redacts the password.
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Form field name used by SMS Broadcast (`username`).
    pub const USERNAME_FIELD: &'static str = "username";
    /// Form field name used by SMS Broadcast (`password`).
    pub const PASSWORD_FIELD: &'static str = "password";

    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Name of the first credential field that is empty, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.username.is_empty() {
            Some(Self::USERNAME_FIELD)
        } else if self.password.is_empty() {
            Some(Self::PASSWORD_FIELD)
        } else {
            None
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Maximum number of concatenated parts the gateway may use (`maxsplit`).
///
/// Invariant: `1..=7`.
pub struct MaxSplit(u8);

impl MaxSplit {
    /// Form field name used by SMS Broadcast (`maxsplit`).
    pub const FIELD: &'static str = "maxsplit";

    /// Minimum allowed split count.
    pub const MIN: u8 = 1;
    /// Maximum allowed split count.
    pub const MAX: u8 = 7;

    /// A single, unfragmented SMS.
    pub const SINGLE: Self = Self(1);

    /// Create a validated split count.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::SplitOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying split count.
    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number rendered in the gateway's international form.
///
/// SMS Broadcast accepts local (`04...`), international (`614...`) or bare numbers
/// without validation. This type is opt-in for callers who want numbers checked and
/// normalized before they reach the gateway. Equality and hashing use the
/// international form.
pub struct PhoneNumber {
    raw: String,
    international: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse a phone number and normalize it to E.164 digits without the leading `+`.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::InvalidPhoneNumber { input: raw });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        let international = e164.trim_start_matches('+').to_owned();

        Ok(Self {
            raw,
            international,
            parsed,
        })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Digits as sent to the gateway, e.g. `61400000000`.
    pub fn international(&self) -> &str {
        &self.international
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.international == other.international
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.international.hash(state);
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.international
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_report_first_missing_field() {
        assert_eq!(Credentials::new("user", "pass").missing_field(), None);
        assert_eq!(
            Credentials::new("", "").missing_field(),
            Some(Credentials::USERNAME_FIELD)
        );
        assert_eq!(
            Credentials::new("user", "").missing_field(),
            Some(Credentials::PASSWORD_FIELD)
        );
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("user", "hunter2"));
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn max_split_enforces_range() {
        assert!(MaxSplit::new(0).is_err());
        assert_eq!(MaxSplit::new(MaxSplit::MIN).unwrap().value(), 1);
        assert_eq!(MaxSplit::new(MaxSplit::MAX).unwrap().value(), 7);
        assert_eq!(
            MaxSplit::new(8),
            Err(ValidationError::SplitOutOfRange {
                min: 1,
                max: 7,
                actual: 8
            })
        );
    }

    #[test]
    fn phone_number_normalizes_local_number_to_international_digits() {
        let local = PhoneNumber::parse(Some(country::Id::AU), " 0400 000 000 ").unwrap();
        assert_eq!(local.raw(), "0400 000 000");
        assert_eq!(local.international(), "61400000000");

        let intl = PhoneNumber::parse(None, "+61400000000").unwrap();
        assert_eq!(local, intl);

        let as_string: String = intl.into();
        assert_eq!(as_string, "61400000000");
    }

    #[test]
    fn phone_number_rejects_garbage() {
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
        assert!(PhoneNumber::parse(None, "   ").is_err());
    }
}
