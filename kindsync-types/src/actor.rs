//! The acting user on whose behalf entities are created and updated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the user performing a store mutation.
///
/// Passed explicitly into every operation that needs one; there is no
/// ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub id: u64,
    pub name: String,
}

impl Actor {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The built-in administrative actor used by batch runs.
    pub fn admin() -> Self {
        Self::new(0, "admin")
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
