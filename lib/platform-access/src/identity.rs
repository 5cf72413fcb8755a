//! Authenticated user identity.

use milestone_board_core::UserId;
use serde::{Deserialize, Serialize};

/// Identity derived from a valid provider session.
///
/// Carries only what the provider attests to. Administrator privilege is
/// intentionally absent: it must be looked up server-side per action, never
/// carried in client-visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Provider-issued unique user ID (the subject of the session).
    id: UserId,
    /// Email address, when the provider exposes one.
    email: Option<String>,
}

impl UserIdentity {
    /// Creates an identity from provider claims.
    #[must_use]
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// Returns the user's provider-issued ID.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the user's email address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
