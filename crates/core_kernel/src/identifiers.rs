//! Strongly-typed identifiers for domain entities
//!
//! Fund records are keyed by a database-assigned integer. Wrapping it in a
//! newtype keeps raw integers from leaking into signatures where a fund
//! identifier is meant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Identifier of a stored fund record
///
/// Assigned by the record store on insert; never chosen by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(i64);

impl FundId {
    /// Wraps a store-assigned integer
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FundId {
    type Err = CoreError;

    /// Parses a path segment such as `"42"`
    ///
    /// Only positive integers are accepted, since the store never assigns
    /// zero or negative keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(CoreError::invalid_identifier("fund", s)),
        }
    }
}

impl From<i64> for FundId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<FundId> for i64 {
    fn from(id: FundId) -> i64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_id_display() {
        assert_eq!(FundId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: FundId = "17".parse().unwrap();
        assert_eq!(parsed, FundId::new(17));
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!("0".parse::<FundId>().is_err());
        assert!("-3".parse::<FundId>().is_err());
    }
}
