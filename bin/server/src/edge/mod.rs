//! Edge interception layer.
//!
//! Every inbound request (minus a static exemption list) passes through this
//! layer before any handler runs:
//! 1. [`refresh::SessionRefresher`] validates and refreshes the session
//!    against the identity provider, rotating cookies when needed.
//! 2. [`routes::RouteSet`] classifies the path as protected, auth-only, or
//!    public.
//! 3. [`policy::decide`] turns session state plus route class into allow /
//!    redirect-to-login / redirect-to-target.
//!
//! This layer is a UX convenience: it knows session presence, never
//! privilege, and is never the sole enforcement of admin-only access. When
//! the identity provider is not configured the whole layer is a logged
//! pass-through (development mode); the server-side gate still fails
//! closed.

pub mod middleware;
pub mod policy;
pub mod refresh;
pub mod routes;

pub use middleware::guard;
pub use policy::EdgeDecision;
pub use refresh::{RefreshOutcome, SessionRefresher};
pub use routes::{RouteClass, RouteSet};
