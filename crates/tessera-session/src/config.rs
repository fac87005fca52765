//! Session settings: secret, environment, cookie name and token lifetime.

use std::fmt;

use tessera_token::{DEFAULT_TTL, SigningSecret, TokenCodec};
use time::Duration;

use crate::SessionError;

/// Name of the cookie that carries the session token.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Secret used outside production when `JWT_SECRET` isn't set.
///
/// Anyone who knows this string can mint sessions, so production refuses
/// to fall back to it.
pub const DEFAULT_SECRET: &str = "development-secret-key";

const SECRET_VAR: &str = "JWT_SECRET";
const ENVIRONMENT_VARS: [&str; 2] = ["APP_ENV", "NODE_ENV"];

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// The deployment environment.
///
/// Only one thing depends on it directly: production cookies are marked
/// `Secure`, development cookies aren't (so plain `http://localhost`
/// still works).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parses an environment name. `"production"` (any case) is
    /// production; everything else is development.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Returns `true` for [`Environment::Production`].
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionSettings
// ---------------------------------------------------------------------------

/// Everything the session layer needs to know about its deployment.
///
/// Loaded once at process start (usually with
/// [`from_env`](Self::from_env)) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Process-wide signing secret.
    pub secret: SigningSecret,

    /// Development or production.
    pub environment: Environment,

    /// Name of the session cookie. Default: [`SESSION_COOKIE_NAME`].
    pub cookie_name: String,

    /// Lifetime of every issued token. Default: 7 days.
    pub ttl: Duration,
}

impl SessionSettings {
    /// Development settings around `secret`, with the default cookie name
    /// and a 7-day lifetime.
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            environment: Environment::Development,
            cookie_name: SESSION_COOKIE_NAME.to_owned(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Sets the deployment environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the session cookie's name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Sets the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Loads settings from process environment variables.
    ///
    /// See [`from_lookup`](Self::from_lookup) for the variables read.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// - `APP_ENV`, falling back to `NODE_ENV`: `production` selects
    ///   [`Environment::Production`].
    /// - `JWT_SECRET`: the signing secret, used as raw UTF-8 bytes.
    ///
    /// # Errors
    /// Returns [`SessionError::MissingSecret`] in production when
    /// `JWT_SECRET` is unset or empty. Development falls back to
    /// [`DEFAULT_SECRET`] and logs a warning.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SessionError> {
        let environment = ENVIRONMENT_VARS
            .iter()
            .find_map(|key| lookup(*key))
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();

        let secret = match lookup(SECRET_VAR).filter(|value| !value.is_empty()) {
            Some(value) => SigningSecret::new(value)?,
            None if environment.is_production() => {
                return Err(SessionError::MissingSecret);
            }
            None => {
                tracing::warn!(
                    %environment,
                    "JWT_SECRET not set, falling back to the development secret"
                );
                SigningSecret::new(DEFAULT_SECRET)?
            }
        };

        tracing::debug!(%environment, "session settings loaded");
        Ok(Self::new(secret).with_environment(environment))
    }

    /// Whether session cookies get the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }

    /// A token codec for these settings.
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(self.secret.clone()).with_ttl(self.ttl)
    }
}
