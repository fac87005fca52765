//! A request-scoped cookie jar that collects response cookies.

use cookie::{Cookie, CookieJar};
use http::{HeaderMap, HeaderValue, header};
use tokio::sync::Mutex;

use crate::request::cookie_pairs;
use crate::{CookieAttributes, CookieError, CookieSource, CookieStore, ROOT_PATH};

/// The cookie jar of one request/response exchange.
///
/// Create one per request, seeded from the inbound headers, hand it to
/// whatever needs to read or write cookies, then copy the pending writes
/// onto the response with [`apply_to`](Self::apply_to).
///
/// The jar is behind a `tokio::sync::Mutex` so the handle can be shared
/// across `.await` points of the same request. Separate requests get
/// separate jars; nothing is shared between them.
///
/// Internally this is a [`cookie::CookieJar`]: the request's cookies are
/// the jar's "original" set and every `set`/`delete` is recorded in its
/// "delta", which becomes the `Set-Cookie` headers.
#[derive(Debug, Default)]
pub struct ResponseJar {
    jar: Mutex<CookieJar>,
}

impl ResponseJar {
    /// An empty jar, for a request that carried no cookies.
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar seeded with the cookies in the request's `Cookie` headers.
    ///
    /// If a name appears more than once the first occurrence is kept,
    /// matching what [`RequestCookies`](crate::RequestCookies) reads.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut jar = CookieJar::new();
        for cookie in cookie_pairs(headers) {
            if jar.get(cookie.name()).is_none() {
                jar.add_original(cookie.into_owned());
            }
        }
        Self {
            jar: Mutex::new(jar),
        }
    }

    /// The pending `Set-Cookie` cookie for `name`, if this response is
    /// going to write or remove it.
    pub async fn outgoing(&self, name: &str) -> Option<Cookie<'static>> {
        let jar = self.jar.lock().await;
        jar.delta().find(|cookie| cookie.name() == name).cloned()
    }

    /// Every pending write rendered as a `Set-Cookie` header value.
    ///
    /// # Errors
    /// Returns [`CookieError::InvalidHeader`] if a cookie contains bytes
    /// that aren't allowed in a header.
    pub async fn set_cookie_headers(&self) -> Result<Vec<HeaderValue>, CookieError> {
        let jar = self.jar.lock().await;
        jar.delta()
            .map(|cookie| {
                HeaderValue::from_str(&cookie.to_string())
                    .map_err(|e| CookieError::InvalidHeader(e.to_string()))
            })
            .collect()
    }

    /// Appends every pending write to `headers` as `Set-Cookie`.
    pub async fn apply_to(&self, headers: &mut HeaderMap) -> Result<(), CookieError> {
        for value in self.set_cookie_headers().await? {
            headers.append(header::SET_COOKIE, value);
        }
        Ok(())
    }
}

impl CookieSource for ResponseJar {
    async fn get(&self, name: &str) -> Result<Option<String>, CookieError> {
        let jar = self.jar.lock().await;
        Ok(jar.get(name).map(|cookie| cookie.value().to_owned()))
    }
}

impl CookieStore for ResponseJar {
    async fn set(
        &self,
        name: &str,
        value: &str,
        attributes: &CookieAttributes,
    ) -> Result<(), CookieError> {
        // Build first, lock second: the jar only ever holds complete cookies.
        let cookie = attributes.build_cookie(name, value);
        self.jar.lock().await.add(cookie);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), CookieError> {
        let target = Cookie::build((name.to_owned(), String::new()))
            .path(ROOT_PATH)
            .build();
        // `remove` emits a removal cookie (empty value, Max-Age=0, expiry in
        // the past) only if the request carried the cookie; a cookie set
        // earlier in this same exchange is simply dropped from the delta.
        self.jar.lock().await.remove(target);
        tracing::trace!(cookie = name, "cookie removed");
        Ok(())
    }
}
