//! Identifier types used throughout kindsync.
//!
//! Entities are keyed by store-assigned integers. The value `0` is reserved
//! as the universal "not yet created" sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable key of a persisted entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The sentinel for an entity that has not been created in the store yet.
    pub const NEW: EntityId = EntityId(0);

    /// Wraps a raw store key.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw store key.
    #[must_use]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// True when this is the "not yet created" sentinel.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.0 == 0
    }

    /// Parses an identity from its decimal form.
    pub fn parse(s: &str) -> crate::Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| crate::Error::InvalidIdentity(format!("{s:?}: {e}")))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
