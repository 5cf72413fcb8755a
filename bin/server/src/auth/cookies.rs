//! Session token cookies.
//!
//! The provider-issued token pair lives in two HttpOnly cookies. Reading is
//! shared by the edge layer and the gate; writing is shared by the edge layer
//! (rotation) and the auth routes (login hand-off, logout).

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use milestone_board_platform_access::SessionTokens;
use time::Duration;

use crate::config::CookieConfig;

/// Access token cookie name.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Refresh token cookie name.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Reads the session token pair from the request cookies.
#[must_use]
pub fn read_tokens(jar: &CookieJar) -> SessionTokens {
    SessionTokens {
        access_token: jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()),
        refresh_token: jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()),
    }
}

/// Builds the Set-Cookie values for a token pair.
///
/// Only the tokens that are present produce a cookie, so a rotation that
/// touched just the access token leaves the refresh cookie alone.
#[must_use]
pub fn session_cookies(tokens: &SessionTokens, config: &CookieConfig) -> Vec<Cookie<'static>> {
    let mut cookies = Vec::with_capacity(2);
    if let Some(access) = &tokens.access_token {
        cookies.push(build_cookie(
            ACCESS_TOKEN_COOKIE,
            access.clone(),
            Duration::minutes(config.access_max_age_minutes),
            config,
        ));
    }
    if let Some(refresh) = &tokens.refresh_token {
        cookies.push(build_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh.clone(),
            Duration::days(config.refresh_max_age_days),
            config,
        ));
    }
    cookies
}

/// Builds expired cookies that clear the token pair on the client.
#[must_use]
pub fn removal_cookies() -> Vec<Cookie<'static>> {
    [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE]
        .into_iter()
        .map(|name| {
            Cookie::build((name, ""))
                .path("/")
                .max_age(Duration::ZERO)
                .build()
        })
        .collect()
}

fn build_cookie(
    name: &'static str,
    value: String,
    max_age: Duration,
    config: &CookieConfig,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_tokens_handles_missing_cookies() {
        let jar = CookieJar::new();
        assert!(read_tokens(&jar).is_empty());
    }

    #[test]
    fn read_tokens_picks_up_both_cookies() {
        let jar = CookieJar::new()
            .add(Cookie::new(ACCESS_TOKEN_COOKIE, "acc"))
            .add(Cookie::new(REFRESH_TOKEN_COOKIE, "ref"));
        let tokens = read_tokens(&jar);
        assert_eq!(tokens.access_token.as_deref(), Some("acc"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("ref"));
    }

    #[test]
    fn session_cookies_are_http_only_and_scoped_to_root() {
        let tokens = SessionTokens::new("acc".into(), "ref".into());
        let cookies = session_cookies(&tokens, &CookieConfig::default());
        assert_eq!(cookies.len(), 2);
        for cookie in &cookies {
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.secure(), Some(true));
        }
    }

    #[test]
    fn partial_rotation_only_touches_present_tokens() {
        let tokens = SessionTokens {
            access_token: Some("acc".to_string()),
            refresh_token: None,
        };
        let cookies = session_cookies(&tokens, &CookieConfig::default());
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name(), ACCESS_TOKEN_COOKIE);
    }

    #[test]
    fn removal_cookies_expire_immediately() {
        for cookie in removal_cookies() {
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        }
    }
}
