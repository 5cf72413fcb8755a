//! Error types for authentication and authorization.

use milestone_board_core::UserId;
use std::fmt;

/// Errors from the identity provider boundary.
///
/// Only transport-level failures surface here; an invalid or expired session
/// is a normal [`SessionValidation`](crate::SessionValidation) outcome, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider endpoint could not be reached.
    Unreachable { details: String },
    /// The provider responded with something other than a session verdict.
    UnexpectedResponse { status: u16, details: String },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { details } => {
                write!(f, "identity provider unreachable: {details}")
            }
            Self::UnexpectedResponse { status, details } => {
                write!(f, "unexpected provider response ({status}): {details}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Errors from authentication checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// No valid session was presented.
    Unauthenticated,
    /// A session exists but could not be verified against the provider.
    VerificationFailed { reason: String },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "not authenticated"),
            Self::VerificationFailed { reason } => {
                write!(f, "session verification failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

/// Errors from authorization checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The authenticated user lacks administrator privilege.
    Forbidden { user_id: UserId },
    /// The privilege lookup itself failed.
    CheckFailed { reason: String },
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden { user_id } => {
                write!(f, "user {user_id} lacks administrator privilege")
            }
            Self::CheckFailed { reason } => {
                write!(f, "privilege check failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthorizationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_unreachable_display() {
        let err = ProviderError::Unreachable {
            details: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("unreachable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn forbidden_names_the_user() {
        let err = AuthorizationError::Forbidden {
            user_id: UserId::from("user-9"),
        };
        assert!(err.to_string().contains("user-9"));
        assert!(err.to_string().contains("administrator"));
    }
}
