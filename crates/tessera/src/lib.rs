//! # Tessera
//!
//! Signed cookie sessions for login-gated web apps.
//!
//! A login action calls [`SessionService::create_session`], which signs
//! the user's identity into an `HS256` token and stores it in an
//! `HttpOnly` cookie. Later requests are checked either by
//! [`SessionService::get_session`] (server-rendered pages, with a
//! [`ResponseJar`]) or by the [`RouteGuard`] in front of the router
//! (inbound request only). Logout calls
//! [`SessionService::delete_session`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tessera::prelude::*;
//!
//! # async fn demo(request: http::Request<()>) -> Result<(), TesseraError> {
//! let settings = SessionSettings::from_env()?;
//! let sessions = SessionService::new(&settings);
//!
//! // Login handler, after the password check:
//! let jar = ResponseJar::from_headers(request.headers());
//! sessions.create_session(&jar, "user-1", "a@b.com").await?;
//!
//! // Middleware:
//! let guard = RouteGuard::new(sessions.verifier(), GuardConfig::default());
//! let decision = guard.check(&request).await;
//! # let _ = decision;
//! # Ok(())
//! # }
//! ```

mod error;
mod guard;
pub mod logging;

pub use error::TesseraError;
pub use guard::{AUTH_REQUIRED_MESSAGE, Decision, GuardConfig, RouteGuard};

pub use tessera_cookie::{
    CookieAttributes, CookieError, CookieSource, CookieStore, RequestCookies,
    ResponseJar,
};
pub use tessera_session::{
    Environment, RequestVerifier, SESSION_COOKIE_NAME, SessionClaims,
    SessionError, SessionService, SessionSettings,
};
pub use tessera_token::{SigningSecret, TokenCodec, TokenError};

/// Everything a handler or middleware usually needs.
pub mod prelude {
    pub use crate::logging::{LogConfig, LogFormat, init_logging};
    pub use crate::{
        CookieSource, CookieStore, Decision, GuardConfig, RequestVerifier,
        ResponseJar, RouteGuard, SessionClaims, SessionService,
        SessionSettings, TesseraError,
    };
}
