//! Symbol value object for exchange trading symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// An NSE trading symbol.
///
/// Examples: "RELIANCE", "TCS", "M&M", "BAJAJ-AUTO".
///
/// Symbols are normalized on construction (trimmed, uppercased) so lookups
/// against the instrument table are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol, trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Validate the symbol for order submission.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty, too long, or contains
    /// characters outside the NSE symbol alphabet.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: "Symbol cannot be empty".to_string(),
            });
        }

        if self.0.len() > 32 {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: "Symbol exceeds maximum length".to_string(),
            });
        }

        // NSE symbols are alphanumeric plus '-' and '&' (M&M, BAJAJ-AUTO)
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '&')
        {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: "Symbol contains invalid characters".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_normalizes_case_and_whitespace() {
        let s = Symbol::new("  reliance ");
        assert_eq!(s.as_str(), "RELIANCE");
    }

    #[test]
    fn symbol_validate_ok() {
        assert!(Symbol::new("RELIANCE").validate().is_ok());
        assert!(Symbol::new("M&M").validate().is_ok());
        assert!(Symbol::new("BAJAJ-AUTO").validate().is_ok());
    }

    #[test]
    fn symbol_validate_empty() {
        assert!(Symbol::new("").validate().is_err());
        assert!(Symbol::new("   ").validate().is_err());
    }

    #[test]
    fn symbol_validate_invalid_characters() {
        assert!(Symbol::new("REL IANCE").validate().is_err());
        assert!(Symbol::new("REL.IANCE").validate().is_err());
    }

    #[test]
    fn symbol_validate_too_long() {
        let s = Symbol::new("A".repeat(33));
        assert!(s.validate().is_err());
    }

    #[test]
    fn symbol_display() {
        assert_eq!(format!("{}", Symbol::new("tcs")), "TCS");
    }

    #[test]
    fn symbol_serde_roundtrip() {
        let s = Symbol::new("RELIANCE");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"RELIANCE\"");

        let parsed: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, s);
    }
}
