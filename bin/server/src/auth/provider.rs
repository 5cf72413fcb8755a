//! REST client for the external identity provider.
//!
//! The provider exposes a GoTrue-style API: a current-user endpoint that
//! validates an access token, and a token endpoint that rotates the pair from
//! a refresh token. Invalid or expired credentials are a normal anonymous
//! outcome; only transport failures surface as errors.

use milestone_board_core::UserId;
use milestone_board_platform_access::{
    IdentityProvider, ProviderError, SessionTokens, SessionValidation, UserIdentity,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ProviderConfig;

/// HTTP client for the identity provider's session endpoints.
pub struct RestIdentityProvider {
    base_url: String,
    public_key: String,
    http: reqwest::Client,
}

/// User object returned by the provider.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
}

impl UserPayload {
    fn into_identity(self) -> UserIdentity {
        UserIdentity::new(UserId::new(self.id), self.email)
    }
}

/// Token grant response from the provider.
#[derive(Debug, Deserialize)]
struct TokenPayload {
    access_token: String,
    refresh_token: String,
    user: UserPayload,
}

impl RestIdentityProvider {
    /// Creates a provider client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Unreachable {
                details: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            public_key: config.public_key.clone(),
            http,
        })
    }

    /// Fetches the current user for an access token.
    ///
    /// Returns `None` when the token is rejected (stale or revoked).
    async fn fetch_user(&self, access_token: &str) -> Result<Option<UserIdentity>, ProviderError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(access_token)
            .header("apikey", &self.public_key)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable {
                details: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let payload: UserPayload =
                response
                    .json()
                    .await
                    .map_err(|e| ProviderError::UnexpectedResponse {
                        status: status.as_u16(),
                        details: format!("malformed user payload: {e}"),
                    })?;
            return Ok(Some(payload.into_identity()));
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Ok(None);
        }

        Err(ProviderError::UnexpectedResponse {
            status: status.as_u16(),
            details: "user endpoint returned a non-session verdict".to_string(),
        })
    }

    /// Rotates the token pair from a refresh token.
    ///
    /// Returns an anonymous validation when the refresh token is rejected.
    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionValidation, ProviderError> {
        let response = self
            .http
            .post(format!(
                "{}/auth/v1/token?grant_type=refresh_token",
                self.base_url
            ))
            .header("apikey", &self.public_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable {
                details: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let payload: TokenPayload =
                response
                    .json()
                    .await
                    .map_err(|e| ProviderError::UnexpectedResponse {
                        status: status.as_u16(),
                        details: format!("malformed token payload: {e}"),
                    })?;
            let identity = payload.user.into_identity();
            let rotated = SessionTokens::new(payload.access_token, payload.refresh_token);
            return Ok(SessionValidation::refreshed(identity, rotated));
        }

        if matches!(status.as_u16(), 400 | 401 | 403) {
            return Ok(SessionValidation::anonymous());
        }

        Err(ProviderError::UnexpectedResponse {
            status: status.as_u16(),
            details: "token endpoint returned a non-session verdict".to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn validate(&self, tokens: &SessionTokens) -> Result<SessionValidation, ProviderError> {
        if tokens.is_empty() {
            return Ok(SessionValidation::anonymous());
        }

        if let Some(access_token) = &tokens.access_token {
            if let Some(identity) = self.fetch_user(access_token).await? {
                return Ok(SessionValidation::current(identity));
            }
            // Stale access token; fall through to the refresh grant.
        }

        if let Some(refresh_token) = &tokens.refresh_token {
            return self.refresh_session(refresh_token).await;
        }

        Ok(SessionValidation::anonymous())
    }
}
