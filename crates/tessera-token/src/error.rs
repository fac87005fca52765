//! Error types for the token layer.
//!
//! Every way a token can be refused has its own variant, so the codec's
//! tests can assert the exact reason. The session layer above collapses
//! all of the decode-side variants into "no session" before anything
//! reaches a caller.

/// Errors that can occur while encoding or decoding a session token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token can't be split into header, payload and signature, or one
    /// of those segments isn't valid base64url/JSON, or the header names an
    /// algorithm other than `HS256`.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The recomputed signature doesn't match the one in the token.
    /// This includes tokens signed with a different secret.
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// The signature is valid but `now >= exp`.
    #[error("token expired")]
    Expired,

    /// No signing secret is configured (an empty key was supplied).
    #[error("signing secret is missing")]
    MissingSecret,

    /// Serializing the header or claims failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),
}

impl TokenError {
    /// Returns `true` for the outcomes a caller may see when presenting a
    /// bad token, as opposed to a fault in the server's own configuration.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::SignatureMismatch | Self::Expired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rejection_decode_failures_true() {
        assert!(TokenError::Malformed("x".into()).is_rejection());
        assert!(TokenError::SignatureMismatch.is_rejection());
        assert!(TokenError::Expired.is_rejection());
    }

    #[test]
    fn test_is_rejection_configuration_fault_false() {
        assert!(!TokenError::MissingSecret.is_rejection());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = TokenError::Malformed("expected 3 segments".into());
        assert_eq!(err.to_string(), "malformed token: expected 3 segments");
    }
}
