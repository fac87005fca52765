//! Unified error type for Tessera.

use tessera_cookie::CookieError;
use tessera_session::SessionError;
use tessera_token::TokenError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `tessera` facade you deal with this single error type
/// instead of importing errors from each sub-crate. `#[from]` on each
/// variant lets `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TesseraError {
    /// A token-level error (signing, missing secret).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A cookie-store error.
    #[error(transparent)]
    Cookie(#[from] CookieError),

    /// A session-level error (configuration, signing, store).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The tracing subscriber couldn't be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_error() {
        let err: TesseraError = TokenError::MissingSecret.into();
        assert!(matches!(err, TesseraError::Token(_)));
        assert_eq!(err.to_string(), "signing secret is missing");
    }

    #[test]
    fn test_from_cookie_error() {
        let err: TesseraError = CookieError::Unavailable("gone".into()).into();
        assert!(matches!(err, TesseraError::Cookie(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_session_error() {
        let err: TesseraError = SessionError::MissingSecret.into();
        assert!(matches!(err, TesseraError::Session(_)));
        assert!(err.to_string().contains("JWT_SECRET"));
    }
}
