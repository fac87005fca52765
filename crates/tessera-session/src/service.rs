//! The session service: create, read and delete the session cookie.
//!
//! Every method takes the cookie store for the current request as an
//! argument. There is no ambient "current request" anywhere, so
//! concurrent requests can't see each other's cookies and tests can hand
//! in whatever store they like.

use tessera_cookie::{CookieAttributes, CookieSource, CookieStore};
use tessera_token::{SessionClaims, TokenCodec};
use time::OffsetDateTime;

use crate::verify::{RequestVerifier, resolve};
use crate::{SessionError, SessionSettings};

/// Issues, reads and revokes sessions for server-rendered pages and
/// actions.
///
/// ## Lifecycle
///
/// ```text
/// login ──→ create_session() ──→ [cookie set]
///                                     │
///              get_session() ←────────┤ (every later request)
///                                     │
/// logout ──→ delete_session() ──→ [cookie removed]
/// ```
///
/// The service holds no per-user state. Clone it freely or share it
/// behind an `Arc`; every clone signs with the same secret.
#[derive(Debug, Clone)]
pub struct SessionService {
    codec: TokenCodec,
    cookie_name: String,
    secure: bool,
}

impl SessionService {
    /// Creates a service for `settings`.
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            codec: settings.codec(),
            cookie_name: settings.cookie_name.clone(),
            secure: settings.secure_cookies(),
        }
    }

    /// A request verifier that shares this service's codec and cookie name.
    pub fn verifier(&self) -> RequestVerifier {
        RequestVerifier::from_parts(self.codec.clone(), self.cookie_name.clone())
    }

    /// The codec used to sign and verify tokens.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Starts a session for a user whose credentials were already checked.
    ///
    /// Signs a token and writes it to `store` as an `HttpOnly`,
    /// `SameSite=Lax`, `Path=/` cookie expiring with the token. Any earlier
    /// session cookie under the same name is replaced.
    ///
    /// # Errors
    /// - [`SessionError::Signing`] — the token couldn't be signed
    /// - [`SessionError::Cookie`] — the store rejected the write
    pub async fn create_session<S: CookieStore>(
        &self,
        store: &S,
        user_id: &str,
        email: &str,
    ) -> Result<(), SessionError> {
        let now = OffsetDateTime::now_utc();
        let token = self.codec.encode_at(user_id, email, now)?;
        let attributes =
            CookieAttributes::session(self.secure, now + self.codec.ttl());

        store.set(&self.cookie_name, &token, &attributes).await?;

        tracing::info!(user_id, "session created");
        Ok(())
    }

    /// The current session, if the store holds a valid one.
    ///
    /// A missing cookie and a token that fails verification both give
    /// `Ok(None)`; the two are indistinguishable to the caller.
    ///
    /// # Errors
    /// Returns [`SessionError::Cookie`] only if the store itself fails.
    pub async fn get_session<S: CookieSource>(
        &self,
        store: &S,
    ) -> Result<Option<SessionClaims>, SessionError> {
        Ok(resolve(&self.codec, store, &self.cookie_name).await?)
    }

    /// Ends the session by removing its cookie.
    ///
    /// Succeeds (doing nothing) when there is no session to end.
    ///
    /// # Errors
    /// Returns [`SessionError::Cookie`] if the store rejects the removal.
    pub async fn delete_session<S: CookieStore>(
        &self,
        store: &S,
    ) -> Result<(), SessionError> {
        store.delete(&self.cookie_name).await?;
        tracing::info!(cookie = %self.cookie_name, "session deleted");
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionService`, run against a real `ResponseJar`
    //! plus a store that always fails.

    use tessera_cookie::{CookieError, ResponseJar, SameSite};
    use tessera_token::SigningSecret;
    use time::Duration;

    use super::*;
    use crate::Environment;

    // -- Helpers ----------------------------------------------------------

    fn settings() -> SessionSettings {
        SessionSettings::new(
            SigningSecret::new("development-secret-key").expect("valid secret"),
        )
    }

    fn service() -> SessionService {
        SessionService::new(&settings())
    }

    /// A store whose backing jar is gone.
    struct BrokenStore;

    impl CookieSource for BrokenStore {
        async fn get(&self, _name: &str) -> Result<Option<String>, CookieError> {
            Err(CookieError::Unavailable("jar closed".into()))
        }
    }

    impl CookieStore for BrokenStore {
        async fn set(
            &self,
            _name: &str,
            _value: &str,
            _attributes: &CookieAttributes,
        ) -> Result<(), CookieError> {
            Err(CookieError::Unavailable("jar closed".into()))
        }

        async fn delete(&self, _name: &str) -> Result<(), CookieError> {
            Err(CookieError::Unavailable("jar closed".into()))
        }
    }

    // =====================================================================
    // create_session()
    // =====================================================================

    #[tokio::test]
    async fn test_create_session_sets_http_only_lax_root_cookie() {
        let jar = ResponseJar::new();
        service()
            .create_session(&jar, "user-1", "test@example.com")
            .await
            .expect("should succeed");

        let cookie = jar.outgoing("auth-token").await.expect("cookie set");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[tokio::test]
    async fn test_create_session_cookie_holds_verifiable_token() {
        let svc = service();
        let jar = ResponseJar::new();
        svc.create_session(&jar, "user-1", "test@example.com")
            .await
            .expect("should succeed");

        let cookie = jar.outgoing("auth-token").await.expect("cookie set");
        let claims = svc.codec().decode(cookie.value()).expect("valid token");
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_create_session_expires_seven_days_from_now() {
        let jar = ResponseJar::new();
        let before = OffsetDateTime::now_utc();
        service()
            .create_session(&jar, "user-1", "test@example.com")
            .await
            .expect("should succeed");
        let after = OffsetDateTime::now_utc();

        let expires = jar
            .outgoing("auth-token")
            .await
            .and_then(|c| c.expires_datetime())
            .expect("cookie has expiry");
        let seven_days = Duration::days(7);
        assert!(expires.unix_timestamp() >= (before + seven_days).unix_timestamp());
        assert!(expires.unix_timestamp() <= (after + seven_days).unix_timestamp());
    }

    #[tokio::test]
    async fn test_create_session_development_cookie_not_secure() {
        let jar = ResponseJar::new();
        service()
            .create_session(&jar, "user-1", "test@example.com")
            .await
            .expect("should succeed");

        let cookie = jar.outgoing("auth-token").await.expect("cookie set");
        assert_eq!(cookie.secure(), Some(false));
    }

    #[tokio::test]
    async fn test_create_session_production_cookie_secure() {
        let svc = SessionService::new(
            &settings().with_environment(Environment::Production),
        );
        let jar = ResponseJar::new();
        svc.create_session(&jar, "user-1", "test@example.com")
            .await
            .expect("should succeed");

        let cookie = jar.outgoing("auth-token").await.expect("cookie set");
        assert_eq!(cookie.secure(), Some(true));
    }

    #[tokio::test]
    async fn test_create_session_replaces_previous_session() {
        let svc = service();
        let jar = ResponseJar::new();
        svc.create_session(&jar, "user-1", "one@example.com")
            .await
            .expect("first");
        svc.create_session(&jar, "user-2", "two@example.com")
            .await
            .expect("second");

        let session = svc.get_session(&jar).await.expect("ok").expect("session");
        assert_eq!(session.user_id, "user-2");
        assert_eq!(jar.set_cookie_headers().await.expect("headers").len(), 1);
    }

    #[tokio::test]
    async fn test_create_session_store_failure_propagates() {
        let result = service()
            .create_session(&BrokenStore, "user-1", "a@b.com")
            .await;
        assert!(matches!(result, Err(SessionError::Cookie(_))));
    }

    // =====================================================================
    // get_session()
    // =====================================================================

    #[tokio::test]
    async fn test_get_session_after_create_returns_claims() {
        let svc = service();
        let jar = ResponseJar::new();
        svc.create_session(&jar, "user-1", "a@b.com")
            .await
            .expect("should succeed");

        let session = svc.get_session(&jar).await.expect("ok").expect("session");
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_get_session_no_cookie_returns_none() {
        let session = service().get_session(&ResponseJar::new()).await;
        assert!(matches!(session, Ok(None)));
    }

    #[tokio::test]
    async fn test_get_session_zero_ttl_returns_none() {
        let svc = SessionService::new(&settings().with_ttl(Duration::ZERO));
        let jar = ResponseJar::new();
        svc.create_session(&jar, "user-1", "a@b.com")
            .await
            .expect("signing still succeeds");

        assert!(matches!(svc.get_session(&jar).await, Ok(None)));
    }

    #[tokio::test]
    async fn test_get_session_store_failure_is_error() {
        let result = service().get_session(&BrokenStore).await;
        assert!(matches!(result, Err(SessionError::Cookie(_))));
    }

    // =====================================================================
    // delete_session()
    // =====================================================================

    #[tokio::test]
    async fn test_delete_session_removes_cookie() {
        let svc = service();
        let jar = ResponseJar::new();
        svc.create_session(&jar, "user-1", "a@b.com")
            .await
            .expect("should succeed");

        svc.delete_session(&jar).await.expect("delete");
        assert!(matches!(svc.get_session(&jar).await, Ok(None)));
    }

    #[tokio::test]
    async fn test_delete_session_without_cookie_is_noop() {
        let svc = service();
        let jar = ResponseJar::new();
        svc.delete_session(&jar).await.expect("first delete");
        svc.delete_session(&jar).await.expect("second delete");

        assert!(jar.get("auth-token").await.expect("ok").is_none());
    }

    #[tokio::test]
    async fn test_delete_session_store_failure_propagates() {
        let result = service().delete_session(&BrokenStore).await;
        assert!(matches!(result, Err(SessionError::Cookie(_))));
    }

    // =====================================================================
    // verifier()
    // =====================================================================

    #[tokio::test]
    async fn test_verifier_accepts_cookie_written_by_service() {
        let svc = service();
        let jar = ResponseJar::new();
        svc.create_session(&jar, "user-9", "n@b.com")
            .await
            .expect("should succeed");
        let token = jar.outgoing("auth-token").await.expect("cookie set");

        let request = http::Request::builder()
            .header(http::header::COOKIE, format!("auth-token={}", token.value()))
            .body(())
            .expect("valid request");
        let claims = svc.verifier().verify_session(&request).await.expect("session");
        assert_eq!(claims.user_id, "user-9");
    }
}
