//! Static route classification.

/// Classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a valid session to view.
    Protected,
    /// Intended only for unauthenticated users (login, one-time-passcode).
    AuthOnly,
    /// Neither rule applies.
    Public,
}

/// Paths the interception stage is never invoked for: the static asset
/// mount, the favicon, the OAuth callback prefix, and plain image files.
const EXEMPT_PREFIXES: &[&str] = &["/assets/", "/auth/"];
const EXEMPT_EXACT: &[&str] = &["/favicon.ico"];
const IMAGE_EXTENSIONS: &[&str] = &[".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// Static partition of the URL path space.
///
/// Protected routes use exact match for the root path and prefix match for
/// everything else (so `/form` also covers `/form/123`). Auth-only routes
/// use exact match only.
#[derive(Debug, Clone)]
pub struct RouteSet {
    protected: Vec<String>,
    auth_only: Vec<String>,
}

impl RouteSet {
    /// Creates a route set from explicit path lists.
    #[must_use]
    pub fn new(protected: Vec<String>, auth_only: Vec<String>) -> Self {
        Self {
            protected,
            auth_only,
        }
    }

    /// Returns the protected paths.
    #[must_use]
    pub fn protected(&self) -> &[String] {
        &self.protected
    }

    /// Returns the auth-only paths.
    #[must_use]
    pub fn auth_only(&self) -> &[String] {
        &self.auth_only
    }

    /// Returns true if the interception stage must not run for this path.
    ///
    /// Evaluated before [`RouteSet::classify`] is consulted at all.
    #[must_use]
    pub fn is_exempt(&self, path: &str) -> bool {
        EXEMPT_EXACT.contains(&path)
            || EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
            || IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
    }

    /// Classifies a path. Pure; ignores exemptions.
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        let is_protected = self.protected.iter().any(|route| {
            if route == "/" {
                path == "/"
            } else {
                path.starts_with(route.as_str())
            }
        });
        if is_protected {
            return RouteClass::Protected;
        }

        if self.auth_only.iter().any(|route| route == path) {
            return RouteClass::AuthOnly;
        }

        RouteClass::Public
    }
}

impl Default for RouteSet {
    fn default() -> Self {
        Self::new(
            ["/", "/account", "/form", "/dashboard", "/profile", "/settings"]
                .map(String::from)
                .to_vec(),
            ["/login", "/otp"].map(String::from).to_vec(),
        )
    }
}
