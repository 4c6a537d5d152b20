//! Opaque party identity handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity of a participating party — an airline, an oracle, or a
/// nominee awaiting admission.
///
/// The handle is opaque to the core: the substrate that delivers votes and
/// reports has already authenticated it (signature verification is not the
/// core's job). Equality and hashing are all the core ever needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw bytes of the identity, used for deterministic seed derivation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PartyId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PartyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
