//! Error types for the cookie layer.

/// Errors a cookie store can report.
///
/// Reading a missing or unparseable cookie is NOT an error. It's just
/// `None`. These variants are for the store itself failing.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// A cookie couldn't be rendered as an HTTP header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// The backing cookie jar couldn't be reached.
    #[error("cookie store unavailable: {0}")]
    Unavailable(String),
}
