//! Edge redirect policy.
//!
//! Pure decision procedure combining session state and route class. The
//! policy knows only whether a session exists; privilege checks belong to
//! the server-side gate.

use super::routes::RouteClass;

/// Outcome of an edge evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Forward the request unchanged in substance.
    Allow,
    /// Send the user to the login page, preserving their destination.
    RedirectLogin { location: String },
    /// Send an already-authenticated user away from an auth-only page.
    RedirectTarget { location: String },
}

/// Decides what to do with an intercepted request.
///
/// Evaluated once per request, in order: protected routes bounce
/// unauthenticated users to login with the original path preserved as a
/// `redirect` query parameter; auth-only routes bounce authenticated users
/// to that preserved target (default root), stripping the parameter so it
/// does not leak further; everything else is allowed through.
#[must_use]
pub fn decide(class: RouteClass, authenticated: bool, path: &str, query: &str) -> EdgeDecision {
    match class {
        RouteClass::Protected if !authenticated => {
            let params = serde_urlencoded::to_string([("redirect", path)]).unwrap_or_default();
            EdgeDecision::RedirectLogin {
                location: format!("/login?{params}"),
            }
        }
        RouteClass::AuthOnly if authenticated => {
            let (target, remainder) = split_redirect_target(query);
            let location = if remainder.is_empty() {
                target
            } else {
                format!("{target}?{remainder}")
            };
            EdgeDecision::RedirectTarget { location }
        }
        _ => EdgeDecision::Allow,
    }
}

/// Extracts the `redirect` target from a query string, returning the target
/// and the remaining query with the parameter stripped.
///
/// Only same-site paths (leading `/`) are honored; anything else falls back
/// to the root.
fn split_redirect_target(query: &str) -> (String, String) {
    let params: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

    let mut target = "/".to_string();
    let mut rest = Vec::with_capacity(params.len());
    for (name, value) in params {
        if name == "redirect" {
            if value.starts_with('/') {
                target = value;
            }
        } else {
            rest.push((name, value));
        }
    }

    let remainder = serde_urlencoded::to_string(&rest).unwrap_or_default();
    (target, remainder)
}
