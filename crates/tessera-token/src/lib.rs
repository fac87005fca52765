//! Session tokens for Tessera.
//!
//! This crate is the bottom of the stack. It knows how to turn a user's
//! identity into a tamper-evident, self-expiring string and back:
//!
//! - **Claims** ([`SessionClaims`]) — what the token asserts.
//! - **Secret** ([`SigningSecret`]) — the process-wide HMAC key.
//! - **Codec** ([`TokenCodec`]) — compact `header.payload.signature`
//!   encoding, signed with HMAC-SHA256 (`HS256`).
//! - **Errors** ([`TokenError`]) — why a token was refused.
//!
//! # Architecture
//!
//! The codec doesn't know about cookies or HTTP. It only signs and
//! verifies strings; the layers above decide where those strings live.
//!
//! ```text
//! Cookie (transport) → Token (this crate) → Session (identity)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod claims;
mod codec;
mod error;
mod secret;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use claims::SessionClaims;
pub use codec::{TokenCodec, DEFAULT_TTL};
pub use error::TokenError;
pub use secret::SigningSecret;
