//! Cookie store abstraction for Tessera.
//!
//! Provides the [`CookieSource`] and [`CookieStore`] traits that hide how
//! cookies are actually read and written in a given execution context:
//!
//! - [`ResponseJar`] — the "current request/response" of a server-rendered
//!   page or action, passed explicitly instead of looked up from ambient
//!   state. Reads see the request's cookies plus any pending writes.
//! - [`RequestCookies`] — a read-only view over an inbound request's
//!   `Cookie` header, usable before any response exists (routing and
//!   middleware decisions).
//!
//! The session layer is written against the traits only, so the same
//! logic runs in both contexts.

#![allow(async_fn_in_trait)]

mod error;
mod jar;
mod request;

pub use error::CookieError;
pub use jar::ResponseJar;
pub use request::RequestCookies;

pub use cookie::{Cookie, SameSite};

use time::OffsetDateTime;

/// Path that scopes a cookie to the whole origin.
pub const ROOT_PATH: &str = "/";

/// Attributes applied to a cookie when it is written.
///
/// All attributes travel together: a store builds the complete cookie
/// from them before touching its jar, so a reader never observes a cookie
/// with only some of its attributes applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Hidden from page scripts.
    pub http_only: bool,
    /// Cross-site sending policy.
    pub same_site: SameSite,
    /// URL path scope.
    pub path: String,
    /// Only sent over HTTPS.
    pub secure: bool,
    /// Absolute expiry. `None` makes a browser-session cookie.
    pub expires: Option<OffsetDateTime>,
}

impl CookieAttributes {
    /// Attributes for an authentication cookie: `HttpOnly`,
    /// `SameSite=Lax`, `Path=/`, expiring at `expires`.
    ///
    /// `secure` should be `true` in production; plain-HTTP development
    /// servers need it `false` or the browser won't store the cookie.
    pub fn session(secure: bool, expires: OffsetDateTime) -> Self {
        Self {
            http_only: true,
            same_site: SameSite::Lax,
            path: ROOT_PATH.to_owned(),
            secure,
            expires: Some(expires),
        }
    }

    /// Builds the complete cookie `name=value` with these attributes.
    pub fn build_cookie(&self, name: &str, value: &str) -> Cookie<'static> {
        let mut builder = Cookie::build((name.to_owned(), value.to_owned()))
            .http_only(self.http_only)
            .same_site(self.same_site)
            .path(self.path.clone())
            .secure(self.secure);
        if let Some(expires) = self.expires {
            builder = builder.expires(expires);
        }
        builder.build()
    }
}

/// Reads named cookies.
pub trait CookieSource: Send + Sync {
    /// Returns the value of the cookie called `name`, if present.
    ///
    /// Never mutates the store.
    async fn get(&self, name: &str) -> Result<Option<String>, CookieError>;
}

/// Reads and writes named cookies.
pub trait CookieStore: CookieSource {
    /// Writes `name=value` with `attributes`, replacing any cookie already
    /// stored under `name`.
    async fn set(
        &self,
        name: &str,
        value: &str,
        attributes: &CookieAttributes,
    ) -> Result<(), CookieError>;

    /// Removes the cookie called `name`.
    ///
    /// Deleting a cookie that isn't there succeeds and does nothing.
    async fn delete(&self, name: &str) -> Result<(), CookieError>;
}
