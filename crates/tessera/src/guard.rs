//! Route guard: the admit/deny decision a middleware layer makes for
//! every inbound request.
//!
//! The guard only looks at the request path and the session cookie. It
//! runs before any handler, so it uses the [`RequestVerifier`] path, not
//! the response jar.

use http::header::{CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Request, Response, StatusCode};
use tessera_session::{RequestVerifier, SessionClaims};

/// Body message of the 401 response for protected API routes.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

/// Which paths need a session, and where to send browsers that lack one.
///
/// Prefixes are matched with a plain `starts_with` on the request path.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// API paths answered with `401` when unauthenticated.
    pub protected_api_prefixes: Vec<String>,

    /// Page paths redirected to `login_path` when unauthenticated.
    pub protected_page_prefixes: Vec<String>,

    /// Redirect target for protected pages. Never redirected itself.
    pub login_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_api_prefixes: vec![
                "/api/projects".to_owned(),
                "/api/filesystem".to_owned(),
            ],
            protected_page_prefixes: Vec::new(),
            login_path: "/".to_owned(),
        }
    }
}

/// The outcome of [`RouteGuard::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through. Carries the session when there is one;
    /// public routes are admitted without.
    Admit(Option<SessionClaims>),

    /// Protected API route without a valid session.
    Unauthorized,

    /// Protected page without a valid session; send the browser here.
    Redirect(String),
}

impl Decision {
    /// Returns `true` for [`Decision::Admit`].
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit(_))
    }

    /// The verified session, if the request was admitted with one.
    pub fn session(&self) -> Option<&SessionClaims> {
        match self {
            Self::Admit(session) => session.as_ref(),
            _ => None,
        }
    }

    /// The response to send instead of running the handler.
    ///
    /// `None` means "continue to the handler".
    pub fn into_response(self) -> Option<Response<String>> {
        match self {
            Self::Admit(_) => None,
            Self::Unauthorized => {
                let body =
                    serde_json::json!({ "error": AUTH_REQUIRED_MESSAGE }).to_string();
                let mut response = Response::new(body);
                *response.status_mut() = StatusCode::UNAUTHORIZED;
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(response)
            }
            Self::Redirect(location) => {
                let location = HeaderValue::from_str(&location)
                    .unwrap_or_else(|_| HeaderValue::from_static("/"));
                let mut response = Response::new(String::new());
                *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
                response.headers_mut().insert(LOCATION, location);
                Some(response)
            }
        }
    }
}

/// Decides, per request, whether to admit, reject or redirect.
///
/// # Example
///
/// ```rust,ignore
/// let guard = RouteGuard::new(service.verifier(), GuardConfig::default());
/// if let Some(response) = guard.check(&request).await.into_response() {
///     return response;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RouteGuard {
    verifier: RequestVerifier,
    config: GuardConfig,
}

impl RouteGuard {
    /// A guard that verifies sessions with `verifier`.
    pub fn new(verifier: RequestVerifier, config: GuardConfig) -> Self {
        Self { verifier, config }
    }

    /// The guard's configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Makes the admission decision for `request`.
    ///
    /// Verification runs on every request so handlers of public routes
    /// still see who is logged in.
    pub async fn check<B>(&self, request: &Request<B>) -> Decision {
        let path = request.uri().path();
        let session = self.verifier.verify_session(request).await;
        if session.is_some() {
            return Decision::Admit(session);
        }

        if has_prefix(&self.config.protected_api_prefixes, path) {
            tracing::debug!(path, "unauthenticated request to protected API");
            return Decision::Unauthorized;
        }

        if path != self.config.login_path
            && has_prefix(&self.config.protected_page_prefixes, path)
        {
            tracing::debug!(path, "unauthenticated request to protected page");
            return Decision::Redirect(self.config.login_path.clone());
        }

        Decision::Admit(None)
    }
}

fn has_prefix(prefixes: &[String], path: &str) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}
