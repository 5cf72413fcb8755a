//! Per-request session refresh.

use milestone_board_platform_access::{IdentityProvider, SessionTokens, UserIdentity};
use std::sync::Arc;

/// Result of refreshing a session at the edge.
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    /// The authenticated identity, absent if no valid session.
    pub identity: Option<UserIdentity>,
    /// Rotated token values that must reach both the forwarded request and
    /// the client.
    pub rotated: Option<SessionTokens>,
}

impl RefreshOutcome {
    /// An outcome with no session and no rotation.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Refreshes the authentication session on every intercepted request.
///
/// With no provider configured this is a pass-through: no protection is
/// applied, which is the documented development-mode bypass, not an error.
/// Provider failures degrade to "no user"; availability is prioritized over
/// strict enforcement here, compensated by the server-side gate.
pub struct SessionRefresher {
    provider: Option<Arc<dyn IdentityProvider>>,
}

impl SessionRefresher {
    /// Creates a refresher over an optional provider.
    #[must_use]
    pub fn new(provider: Option<Arc<dyn IdentityProvider>>) -> Self {
        Self { provider }
    }

    /// Returns true when a provider is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Validates and refreshes the session referenced by `tokens`.
    pub async fn refresh(&self, tokens: &SessionTokens) -> RefreshOutcome {
        let Some(provider) = &self.provider else {
            tracing::debug!("identity provider not configured; session refresh skipped");
            return RefreshOutcome::anonymous();
        };

        if tokens.is_empty() {
            return RefreshOutcome::anonymous();
        }

        match provider.validate(tokens).await {
            Ok(validation) => RefreshOutcome {
                identity: validation.identity,
                rotated: validation.rotated,
            },
            Err(e) => {
                tracing::warn!(error = %e, "session refresh failed; treating request as unauthenticated");
                RefreshOutcome::anonymous()
            }
        }
    }
}
