//! OAuth hand-off and logout routes.
//!
//! These live under the `/auth/` prefix, which the edge layer exempts: the
//! callback must be reachable without a session, and logout must work even
//! when the session is already dead.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use milestone_board_platform_access::SessionTokens;
use serde::Deserialize;
use std::sync::Arc;

use super::{cookies, AppState};

/// Query parameters for the provider callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    redirect: Option<String>,
}

/// Completes the provider hand-off by storing the issued token pair.
///
/// The provider redirects here after a successful login with the token pair
/// in the query; we move it into HttpOnly cookies and send the user to their
/// original destination.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> impl IntoResponse {
    let tokens = SessionTokens::new(query.access_token, query.refresh_token);

    let mut jar = jar;
    for cookie in cookies::session_cookies(&tokens, &state.cookies) {
        jar = jar.add(cookie);
    }

    // Only same-site paths are honored as targets.
    let target = query
        .redirect
        .filter(|t| t.starts_with('/'))
        .unwrap_or_else(|| "/".to_string());

    tracing::info!("session established via provider callback");
    (jar, Redirect::to(&target))
}

/// Logs the user out by clearing the session cookies.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let mut jar = jar;
    for cookie in cookies::removal_cookies() {
        jar = jar.add(cookie);
    }

    (jar, Redirect::to("/login"))
}
