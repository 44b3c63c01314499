//! Type-safe identifiers for teams and subscribers.
//!
//! [`TeamId`] is the canonical team identity: a `u64`. Admin panels and
//! other external callers are sloppy about whether an id arrives as a
//! JSON number or a numeric string, so deserialization accepts both and
//! canonicalizes. Lookups therefore never miss because `"2"` and `2`
//! were compared as different types.
//!
//! [`SubscriberId`] identifies one connected observer for the lifetime
//! of its connection. It uses UUID v7 (time-ordered) so log lines sort
//! by connection time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Canonical identity of a team in the score store.
///
/// Serializes as a plain JSON number. Deserialization also accepts a
/// numeric string (`"2"`) and canonicalizes it to the same value as the
/// number `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TeamId(pub u64);

impl TeamId {
    /// Wrap a raw numeric id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Return the inner numeric value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for TeamId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TeamId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.trim().parse::<u64>().map(Self).map_err(|e| {
                serde::de::Error::custom(format!("team id is not an unsigned integer ({e}): {s:?}"))
            }),
        }
    }
}

/// Identity of one connected observer, valid for the connection's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
