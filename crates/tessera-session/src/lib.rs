//! Session management for Tessera.
//!
//! This crate ties a signed token to a cookie and exposes the two ways
//! the rest of an application asks "who is this?":
//!
//! 1. **Session service** ([`SessionService`]) — `create_session`,
//!    `get_session` and `delete_session` for server-rendered pages and
//!    actions, each given an explicit cookie store for the current
//!    request.
//! 2. **Request verifier** ([`RequestVerifier`]) — `verify_session` for a
//!    routing/middleware layer that only has the inbound request.
//!
//! Both read paths go through the same verification routine and answer
//! with claims or nothing. *Why* a token was refused is logged, never
//! returned.
//!
//! # How it fits in the stack
//!
//! ```text
//! Guard / handlers (above)  ← decide admit, redirect or 401
//!     ↕
//! Session Layer (this crate)  ← cookie name, attributes, settings
//!     ↕
//! Token + Cookie layers (below)  ← signing, cookie jars
//! ```

mod config;
mod error;
mod service;
mod verify;

pub use config::{
    DEFAULT_SECRET, Environment, SESSION_COOKIE_NAME, SessionSettings,
};
pub use error::SessionError;
pub use service::SessionService;
pub use verify::RequestVerifier;

pub use tessera_token::SessionClaims;
