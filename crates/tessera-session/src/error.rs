//! Error types for the session layer.

use tessera_cookie::CookieError;
use tessera_token::TokenError;

/// Errors that can occur while managing sessions.
///
/// None of these describe a bad token presented by a user. Those are
/// answered with "no session". These are server-side faults: the secret
/// is missing, signing failed, or the cookie store broke.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Issuing a token failed.
    #[error("failed to sign session token: {0}")]
    Signing(#[from] TokenError),

    /// The cookie store couldn't be read or written.
    #[error(transparent)]
    Cookie(#[from] CookieError),

    /// Production settings were loaded without a signing secret.
    #[error("JWT_SECRET must be set in production")]
    MissingSecret,
}
