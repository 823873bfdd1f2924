//! Identifiers for knowledge-base records.
//!
//! This module provides the [`EntityId`] type used for anatomical entities,
//! vias, destinations and forward connections.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

/// Numeric identifier of a knowledge-base record.
///
/// The decimal rendering of an `EntityId` is the *external id* used to match
/// diagram nodes against predecessor references and saved layouts.
///
/// # Examples
///
/// ```
/// use composer_core::identifier::EntityId;
///
/// let id = EntityId::new(42);
/// assert_eq!(id.to_string(), "42");
/// assert_eq!("42".parse::<EntityId>().unwrap(), id);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from its numeric value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of this identifier.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for EntityId {
    /// Compares against an external id string: `id == "7"`.
    fn eq(&self, other: &str) -> bool {
        other.parse::<EntityId>().is_ok_and(|parsed| parsed == *self)
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(EntityId::new(0).to_string(), "0");
        assert_eq!(EntityId::new(1234).to_string(), "1234");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 17 ".parse::<EntityId>(), Ok(EntityId::new(17)));
        assert!("abc".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_compare_with_str() {
        let id = EntityId::new(7);
        assert!(id == "7");
        assert!(id != "07x");
        assert!(id != "8");
    }

    #[test]
    fn test_serde_transparent() {
        let id: EntityId = serde_json::from_str("9").unwrap();
        assert_eq!(id, EntityId::new(9));
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
    }
}
