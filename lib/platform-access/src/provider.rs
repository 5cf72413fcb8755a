//! Identity provider boundary trait.

use crate::error::ProviderError;
use crate::session::{SessionTokens, SessionValidation};
use async_trait::async_trait;

/// Boundary to the external identity provider.
///
/// Any provider implementing "validate session, rotate tokens, expose current
/// user" is substitutable here. Implementations must report an invalid or
/// expired session as an anonymous [`SessionValidation`], reserving `Err` for
/// transport-level failures so callers can distinguish "no user" from "could
/// not ask".
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Validates the session referenced by `tokens`, rotating them if needed.
    async fn validate(&self, tokens: &SessionTokens) -> Result<SessionValidation, ProviderError>;
}
