//! Server-side authorization gate.
//!
//! Two independent checks, always performed server-side and never trusted
//! from the client:
//! - [`require_session`]: fresh provider validation of the request's cookies
//! - [`require_admin`]: fresh administrator lookup from the persistence store
//!
//! Every admin-only page load and every mutating action runs both, even
//! though the edge layer already ran. The edge layer is a UX convenience
//! with no notion of privilege; this gate is the security boundary.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use milestone_board_platform_access::{
    AuthenticationError, AuthorizationError, IdentityProvider, SessionTokens, UserIdentity,
};
use std::sync::Arc;

use super::{cookies, AppState};
use crate::db::PrivilegeStore;

/// Verifies that the presented tokens reference a valid provider session.
///
/// The validation is performed fresh against the provider, independent of
/// anything the edge layer concluded. An unconfigured provider fails closed:
/// the development-mode bypass belongs to the edge layer only.
pub async fn require_session(
    provider: Option<&Arc<dyn IdentityProvider>>,
    tokens: &SessionTokens,
) -> Result<UserIdentity, AuthenticationError> {
    let Some(provider) = provider else {
        tracing::debug!("identity provider not configured; gate fails closed");
        return Err(AuthenticationError::VerificationFailed {
            reason: "identity provider not configured".to_string(),
        });
    };

    if tokens.is_empty() {
        return Err(AuthenticationError::Unauthenticated);
    }

    match provider.validate(tokens).await {
        Ok(validation) => validation
            .identity
            .ok_or(AuthenticationError::Unauthenticated),
        Err(e) => {
            tracing::warn!(error = %e, "session verification failed; treating as unauthenticated");
            Err(AuthenticationError::VerificationFailed {
                reason: e.to_string(),
            })
        }
    }
}

/// Verifies that the authenticated identity holds administrator privilege.
///
/// The flag is looked up fresh from the store for every call; nothing the
/// client supplies can satisfy this check.
pub async fn require_admin(
    privileges: &dyn PrivilegeStore,
    identity: &UserIdentity,
) -> Result<(), AuthorizationError> {
    match privileges.is_admin(identity.id()).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthorizationError::Forbidden {
            user_id: identity.id().clone(),
        }),
        Err(e) => {
            tracing::error!(error = %e, user_id = %identity.id(), "privilege lookup failed");
            Err(AuthorizationError::CheckFailed {
                reason: e.to_string(),
            })
        }
    }
}

/// Extractor requiring a valid session.
///
/// Rejections redirect to the login page.
pub struct RequireSession(pub UserIdentity);

impl<S> FromRequestParts<S> for RequireSession
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| GateRejection::Internal)?;

        let tokens = cookies::read_tokens(&jar);
        let identity = require_session(app_state.provider.as_ref(), &tokens).await?;
        Ok(Self(identity))
    }
}

/// Extractor for optionally getting the authenticated identity.
///
/// Returns `None` instead of rejecting when no valid session exists.
pub struct OptionalSession(pub Option<UserIdentity>);

impl<S> FromRequestParts<S> for OptionalSession
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match RequireSession::from_request_parts(parts, state).await {
            Ok(RequireSession(identity)) => Ok(Self(Some(identity))),
            Err(_) => Ok(Self(None)),
        }
    }
}

/// Extractor requiring a valid session with administrator privilege.
pub struct RequireAdmin(pub UserIdentity);

impl<S> FromRequestParts<S> for RequireAdmin
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireSession(identity) = RequireSession::from_request_parts(parts, state).await?;

        let app_state = Arc::<AppState>::from_ref(state);
        require_admin(app_state.privileges.as_ref(), &identity).await?;

        Ok(Self(identity))
    }
}

/// Rejection type for the gate extractors.
///
/// Unauthenticated and forbidden users are recovered by redirecting rather
/// than shown a raw error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// No valid session.
    Unauthenticated,
    /// Valid session, but not an administrator.
    Forbidden,
    /// The gate itself could not run.
    Internal,
}

impl From<AuthenticationError> for GateRejection {
    fn from(_: AuthenticationError) -> Self {
        // Both "no session" and "could not verify" fail closed the same way.
        Self::Unauthenticated
    }
}

impl From<AuthorizationError> for GateRejection {
    fn from(e: AuthorizationError) -> Self {
        match e {
            AuthorizationError::Forbidden { .. } => Self::Forbidden,
            AuthorizationError::CheckFailed { .. } => Self::Internal,
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => Redirect::to("/login").into_response(),
            Self::Forbidden => Redirect::to("/?error=unauthorized").into_response(),
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
