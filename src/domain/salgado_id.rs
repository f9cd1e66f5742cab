//! Type-safe record identifier.
//!
//! [`SalgadoId`] wraps the store-assigned auto-increment key so that a
//! record id cannot be confused with a row count or any other integer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Primary key of a salgado record.
///
/// Assigned by the store on insert and immutable thereafter. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalgadoId(i64);

impl SalgadoId {
    /// Wraps a raw key as read from the store.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SalgadoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SalgadoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
