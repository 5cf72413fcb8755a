//! Strongly-typed ID types for domain entities.
//!
//! Milestone IDs are server-assigned ULIDs (unique and lexicographically
//! sortable by creation time) rendered with a short prefix. User IDs are
//! opaque strings issued by the external identity provider and are never
//! generated by this application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Server-assigned identifier for a milestone record.
///
/// Displayed as `ms_<ULID>`; parsing accepts both the prefixed and the bare
/// ULID form so IDs survive round trips through URLs and database columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneId(Ulid);

impl MilestoneId {
    /// Creates a new ID with a randomly generated ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Creates an ID from a ULID.
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// Returns the prefix used for display formatting.
    #[must_use]
    pub const fn prefix() -> &'static str {
        "ms"
    }
}

impl Default for MilestoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::prefix(), self.0)
    }
}

impl FromStr for MilestoneId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid_str = s.strip_prefix("ms_").unwrap_or(s);
        Ulid::from_str(ulid_str)
            .map(Self)
            .map_err(|e| ParseIdError {
                id_type: "MilestoneId",
                reason: e.to_string(),
            })
    }
}

impl From<Ulid> for MilestoneId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

/// Identifier for a user, as issued by the external identity provider.
///
/// The provider owns the format (typically a UUID subject claim); this type
/// treats it as opaque and only carries it between the session layer and the
/// privilege lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user ID from a provider-issued string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_id_display_has_prefix() {
        let id = MilestoneId::new();
        assert!(id.to_string().starts_with("ms_"));
    }

    #[test]
    fn milestone_id_parses_prefixed_form() {
        let id = MilestoneId::new();
        let parsed: MilestoneId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn milestone_id_parses_bare_ulid() {
        let ulid = Ulid::new();
        let id: MilestoneId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn milestone_id_rejects_garbage() {
        let err = "ms_not-a-ulid".parse::<MilestoneId>().unwrap_err();
        assert_eq!(err.id_type, "MilestoneId");
    }

    #[test]
    fn milestone_id_serde_is_transparent() {
        let id = MilestoneId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.as_ulid()));
    }

    #[test]
    fn user_id_round_trips_as_string() {
        let id = UserId::from("4d2c0b7e-5a1f-4f6e-9a3b-111111111111");
        assert_eq!(id.as_str(), "4d2c0b7e-5a1f-4f6e-9a3b-111111111111");
        assert_eq!(id.to_string(), id.as_str());
    }
}
