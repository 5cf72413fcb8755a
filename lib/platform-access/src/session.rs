//! Session token pair and provider validation outcome.
//!
//! The identity provider issues an opaque access/refresh token pair at login.
//! The application stores the pair in cookies and presents it back to the
//! provider on every request; the provider may rotate the values, and rotated
//! values must reach both the in-flight request context and the client.

use crate::identity::UserIdentity;
use serde::{Deserialize, Serialize};

/// The cookie-encoded token pair referencing a provider session.
///
/// Either half may be absent: a stale client can hold a refresh token after
/// the access token cookie expired, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    /// Short-lived access token presented on validation calls.
    pub access_token: Option<String>,
    /// Long-lived refresh token used to rotate an expired access token.
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    /// Creates a token pair with both halves present.
    #[must_use]
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        }
    }

    /// Returns true if neither token is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Outcome of a provider session-validation call.
#[derive(Debug, Clone, Default)]
pub struct SessionValidation {
    /// The authenticated identity, absent when no valid session exists.
    pub identity: Option<UserIdentity>,
    /// Rotated token values, present when the provider refreshed the session.
    pub rotated: Option<SessionTokens>,
}

impl SessionValidation {
    /// A validation outcome with no session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A validation outcome for a still-current session.
    #[must_use]
    pub fn current(identity: UserIdentity) -> Self {
        Self {
            identity: Some(identity),
            rotated: None,
        }
    }

    /// A validation outcome for a session whose tokens were rotated.
    #[must_use]
    pub fn refreshed(identity: UserIdentity, rotated: SessionTokens) -> Self {
        Self {
            identity: Some(identity),
            rotated: Some(rotated),
        }
    }
}
