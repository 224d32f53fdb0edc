//! Strongly-typed identifiers for domain entities
//!
//! Session identifiers are newtype wrappers around UUIDs. Claim numbers are
//! the customer-facing 12-digit numeric strings that key stored claims and
//! the claim detail view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

// One per intake session; only used for log correlation
define_id!(IntakeSessionId, "INT");

/// Number of digits in a claim number
pub const CLAIM_NUMBER_LEN: usize = 12;

const CLAIM_NUMBER_MODULUS: u128 = 1_000_000_000_000;

/// Customer-facing claim identifier: exactly twelve ASCII digits
///
/// Generated numbers are drawn uniformly at random with no collision check
/// against existing claims. Leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimNumber(String);

impl ClaimNumber {
    /// Draws a fresh random claim number
    ///
    /// The low 62 bits of a v4 UUID are fully random, so the reduction
    /// modulo 10^12 is uniform to within a negligible bias.
    pub fn generate() -> Self {
        let random = Uuid::new_v4().as_u128() & ((1u128 << 62) - 1);
        Self(format!(
            "{:0width$}",
            random % CLAIM_NUMBER_MODULUS,
            width = CLAIM_NUMBER_LEN
        ))
    }

    /// Returns the digits as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClaimNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CLAIM_NUMBER_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::invalid_identifier(format!(
                "claim number must be {} digits, got '{}'",
                CLAIM_NUMBER_LEN, s
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ClaimNumber {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClaimNumber> for String {
    fn from(number: ClaimNumber) -> String {
        number.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_claim_number_shape() {
        for _ in 0..200 {
            let number = ClaimNumber::generate();
            assert_eq!(number.as_str().len(), CLAIM_NUMBER_LEN);
            assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_session_id_display() {
        let id = IntakeSessionId::new();
        assert!(id.to_string().starts_with("INT-"));
    }

    #[test]
    fn test_claim_number_rejects_non_digits() {
        assert!("12345678901a".parse::<ClaimNumber>().is_err());
        assert!("12345".parse::<ClaimNumber>().is_err());
    }
}
