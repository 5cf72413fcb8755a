//! Edge interception middleware for Axum.
//!
//! Wires the exemption check, session refresher, route classifier, and
//! redirect policy together, and propagates rotated cookies onto both the
//! forwarded request (so downstream reads observe the refreshed session
//! within the same request) and the outgoing response (so the client does
//! too), redirects included.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use milestone_board_platform_access::SessionTokens;
use std::sync::Arc;

use super::policy::{self, EdgeDecision};
use super::refresh::SessionRefresher;
use crate::auth::cookies::{self, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::auth::AppState;
use crate::config::CookieConfig;

/// Edge guard middleware, applied to every route.
pub async fn guard(State(state): State<Arc<AppState>>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if state.routes.is_exempt(&path) {
        return next.run(req).await;
    }

    let refresher = SessionRefresher::new(state.provider.clone());
    if !refresher.is_enabled() {
        // Development-mode bypass: no provider means no edge protection.
        return next.run(req).await;
    }

    let query = req.uri().query().unwrap_or("").to_string();
    let jar = CookieJar::from_headers(req.headers());
    let tokens = cookies::read_tokens(&jar);

    let outcome = refresher.refresh(&tokens).await;

    if let Some(rotated) = &outcome.rotated {
        forward_rotated_cookies(req.headers_mut(), rotated);
    }

    let class = state.routes.classify(&path);
    let decision = policy::decide(class, outcome.identity.is_some(), &path, &query);

    let mut response = match decision {
        EdgeDecision::Allow => next.run(req).await,
        EdgeDecision::RedirectLogin { location } => {
            tracing::debug!(path = %path, "redirecting unauthenticated user to login");
            Redirect::to(&location).into_response()
        }
        EdgeDecision::RedirectTarget { location } => {
            tracing::debug!(path = %path, target = %location, "redirecting authenticated user off auth page");
            Redirect::to(&location).into_response()
        }
    };

    if let Some(rotated) = &outcome.rotated {
        append_set_cookies(response.headers_mut(), rotated, &state.cookies);
    }

    response
}

/// Rewrites the request's `Cookie` header with the rotated token values so
/// downstream handlers and the gate read the refreshed session.
fn forward_rotated_cookies(headers: &mut HeaderMap, rotated: &SessionTokens) {
    let mut jar = CookieJar::from_headers(headers);
    if let Some(access) = &rotated.access_token {
        jar = jar.add(Cookie::new(ACCESS_TOKEN_COOKIE, access.clone()));
    }
    if let Some(refresh) = &rotated.refresh_token {
        jar = jar.add(Cookie::new(REFRESH_TOKEN_COOKIE, refresh.clone()));
    }

    let combined = jar
        .iter()
        .map(|c| format!("{}={}", c.name(), c.value()))
        .collect::<Vec<_>>()
        .join("; ");

    if let Ok(value) = HeaderValue::from_str(&combined) {
        headers.insert(header::COOKIE, value);
    }
}

/// Appends `Set-Cookie` headers for the rotated tokens to the response.
fn append_set_cookies(headers: &mut HeaderMap, rotated: &SessionTokens, config: &CookieConfig) {
    for cookie in cookies::session_cookies(rotated, config) {
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}
