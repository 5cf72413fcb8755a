//! Authentication and authorization primitives for the milestone board.
//!
//! This crate provides the types shared between the edge interception layer
//! and the server-side authorization gate:
//! - [`UserIdentity`]: the authenticated identity derived from a valid session
//! - [`SessionTokens`]: the cookie-encoded access/refresh token pair
//! - [`SessionValidation`]: the outcome of a provider validation call
//! - [`IdentityProvider`]: the boundary trait for the external identity
//!   provider (validate session, rotate tokens, expose current user)
//!
//! # Access control model
//!
//! The identity provider owns sessions; this application holds only the
//! cookie-encoded token pair. Administrator privilege is deliberately *not*
//! part of [`UserIdentity`]: it is resolved fresh from the persistence store
//! for every privileged action, so a client can never smuggle the flag in
//! through a token or a form field.

pub mod error;
pub mod identity;
pub mod provider;
pub mod session;

pub use error::{AuthenticationError, AuthorizationError, ProviderError};
pub use identity::UserIdentity;
pub use provider::IdentityProvider;
pub use session::{SessionTokens, SessionValidation};
