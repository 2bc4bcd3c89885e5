use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;

/// A validated short code identifying a [`UrlRecord`](crate::UrlRecord).
///
/// Short codes must be 3-10 characters long and contain only ASCII
/// letters and digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

pub const MIN_LENGTH: usize = 3;
pub const MAX_LENGTH: usize = 10;

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes match `^[A-Za-z0-9]{3,10}$`.
    pub fn new(code: impl Into<String>) -> Result<Self, RegistryError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators whose alphabet and length are already constrained).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Builds the display URL by joining the caller-supplied origin and the code.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), RegistryError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(RegistryError::InvalidShortcode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RegistryError::InvalidShortcode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ShortCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShortCode {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("abc").is_ok());
        assert!(ShortCode::new("Abc123XYZ").is_ok());
        assert!(ShortCode::new("validcode1").is_ok());
    }

    #[test]
    fn too_short() {
        assert!(ShortCode::new("ab").is_err());
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(ShortCode::new("toolongcode11").is_err());
        assert!(ShortCode::new("a".repeat(11)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc-def").is_err());
        assert!(ShortCode::new("abc_def").is_err());
        assert!(ShortCode::new("héllo").is_err());
    }

    #[test]
    fn errors_are_invalid_shortcode() {
        let err = ShortCode::new("ab").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidShortcode(_)));
    }

    #[test]
    fn to_url_joins_origin() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url("https://bur.row"), "https://bur.row/abc123");
        assert_eq!(code.to_url("https://bur.row/"), "https://bur.row/abc123");
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let ok: ShortCode = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(ok.as_str(), "abc123");
        assert!(serde_json::from_str::<ShortCode>("\"a-b\"").is_err());
    }
}
