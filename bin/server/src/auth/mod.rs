//! Authentication and authorization for the milestone board server.
//!
//! This module provides:
//! - The REST client for the external identity provider ([`provider`])
//! - Session cookie handling ([`cookies`])
//! - The server-side authorization gate ([`gate`])
//! - The OAuth hand-off and logout routes ([`routes`])
//!
//! # Authorization model
//!
//! Two independent layers ask "is this user allowed":
//! - The edge layer ([`crate::edge`]) is a UX convenience. It knows only
//!   whether a session exists and redirects users to the right place. It is
//!   never the sole enforcement of admin-only access.
//! - The gate ([`gate`]) is the security boundary. Every admin page load and
//!   every mutating action re-verifies the session against the provider and
//!   re-derives the administrator flag from the persistence store, even
//!   though the edge layer already ran. Direct navigation or replayed
//!   requests that bypass the edge still hit the gate.

pub mod cookies;
pub mod gate;
pub mod provider;
pub mod routes;

pub use gate::{GateRejection, OptionalSession, RequireAdmin, RequireSession};
pub use provider::RestIdentityProvider;

use milestone_board_platform_access::IdentityProvider;
use std::sync::Arc;

use crate::config::CookieConfig;
use crate::db::PrivilegeStore;
use crate::edge::RouteSet;
use crate::milestones::MilestoneService;

/// Shared application state.
pub struct AppState {
    /// Milestone operations (validation + persistence).
    pub service: MilestoneService,
    /// Administrator-privilege lookup.
    pub privileges: Arc<dyn PrivilegeStore>,
    /// Identity provider client. `None` disables the edge-protection layer
    /// and makes the gate fail closed.
    pub provider: Option<Arc<dyn IdentityProvider>>,
    /// Static route classification sets.
    pub routes: RouteSet,
    /// Session cookie settings.
    pub cookies: CookieConfig,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(
        service: MilestoneService,
        privileges: Arc<dyn PrivilegeStore>,
        provider: Option<Arc<dyn IdentityProvider>>,
        routes: RouteSet,
        cookies: CookieConfig,
    ) -> Self {
        Self {
            service,
            privileges,
            provider,
            routes,
            cookies,
        }
    }
}
