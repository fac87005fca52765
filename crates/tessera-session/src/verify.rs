//! The single verification routine behind both read paths.
//!
//! `SessionService::get_session` and `RequestVerifier::verify_session`
//! differ only in where the raw cookie comes from: a response jar or an
//! inbound request. Both hand their [`CookieSource`] to [`resolve`],
//! so the claim-checking rules can't drift apart.

use std::fmt;

use http::{HeaderMap, Request};
use tessera_cookie::{CookieError, CookieSource, RequestCookies};
use tessera_token::{SessionClaims, TokenCodec, TokenError};

use crate::SessionSettings;

/// Why a read path answered "no session".
///
/// Only ever logged. Callers get `None` whatever the reason, so a client
/// probing the server can't tell a bad signature from an expired token.
#[derive(Debug)]
enum Rejection {
    /// No session cookie at all.
    Absent,
    /// A cookie was present but the token didn't verify.
    Invalid(TokenError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "no session cookie"),
            Self::Invalid(e) => write!(f, "{e}"),
        }
    }
}

/// Reads `cookie_name` from `source` and verifies it with `codec`.
///
/// Returns `Ok(None)` for every rejection (absent, malformed, wrong
/// signature, expired). `Err` means the source itself failed.
pub(crate) async fn resolve<S: CookieSource>(
    codec: &TokenCodec,
    source: &S,
    cookie_name: &str,
) -> Result<Option<SessionClaims>, CookieError> {
    let verdict = match source.get(cookie_name).await? {
        None => Err(Rejection::Absent),
        Some(token) => codec.decode(&token).map_err(Rejection::Invalid),
    };

    match verdict {
        Ok(claims) => {
            tracing::trace!(user_id = %claims.user_id, "session verified");
            Ok(Some(claims))
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "no valid session");
            Ok(None)
        }
    }
}

// ---------------------------------------------------------------------------
// RequestVerifier
// ---------------------------------------------------------------------------

/// Verifies the session cookie of an inbound request.
///
/// Meant for a routing or middleware layer: it needs nothing but the
/// request, so it runs before any response exists. Applies exactly the
/// same rules as [`SessionService::get_session`](crate::SessionService::get_session).
///
/// Cheap to clone; clones share the signing secret.
#[derive(Debug, Clone)]
pub struct RequestVerifier {
    codec: TokenCodec,
    cookie_name: String,
}

impl RequestVerifier {
    /// A verifier for `settings`.
    pub fn new(settings: &SessionSettings) -> Self {
        Self::from_parts(settings.codec(), settings.cookie_name.clone())
    }

    pub(crate) fn from_parts(codec: TokenCodec, cookie_name: String) -> Self {
        Self { codec, cookie_name }
    }

    /// Claims from `request`'s session cookie, or `None` if it is absent,
    /// malformed, expired, or signed with another secret.
    pub async fn verify_session<B>(
        &self,
        request: &Request<B>,
    ) -> Option<SessionClaims> {
        self.verify_headers(request.headers()).await
    }

    /// Like [`verify_session`](Self::verify_session), given only headers.
    pub async fn verify_headers(
        &self,
        headers: &HeaderMap,
    ) -> Option<SessionClaims> {
        let source = RequestCookies::from_headers(headers);
        match resolve(&self.codec, &source, &self.cookie_name).await {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "request cookies unreadable");
                None
            }
        }
    }
}
