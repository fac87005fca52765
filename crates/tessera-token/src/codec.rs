//! Encoding and verification of compact `HS256` session tokens.
//!
//! A token is three base64url segments joined by dots:
//!
//! ```text
//! base64url(header) . base64url(claims) . base64url(HMAC-SHA256(header.claims))
//! ```
//!
//! This is the standard compact serialization for signed tokens, so a
//! reverse proxy or any off-the-shelf `HS256` verifier holding the same
//! secret can check our tokens, and we can check theirs.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::Sha256;
use time::{Duration, OffsetDateTime};

use crate::{SessionClaims, SigningSecret, TokenError};

/// How long a freshly issued token stays valid: 7 days.
pub const DEFAULT_TTL: Duration = Duration::days(7);

/// The only algorithm we issue or accept.
const ALGORITHM: &str = "HS256";

type HmacSha256 = Hmac<Sha256>;

/// The token's protected header.
///
/// `typ` is optional on the way in: many issuers only send `alg`.
#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

/// Signs and verifies session tokens with a single process-wide secret.
///
/// The codec is immutable after construction, so one instance can be
/// shared by every request handler (usually behind an `Arc`) without any
/// locking.
///
/// # Example
///
/// ```rust
/// use tessera_token::{SigningSecret, TokenCodec};
///
/// let codec = TokenCodec::new(SigningSecret::new("s3cret").unwrap());
/// let token = codec.encode("user-1", "a@b.com").unwrap();
/// let claims = codec.decode(&token).unwrap();
/// assert_eq!(claims.user_id, "user-1");
/// ```
#[derive(Debug, Clone)]
pub struct TokenCodec {
    secret: Arc<SigningSecret>,
    ttl: Duration,
}

impl TokenCodec {
    /// Creates a codec that issues tokens valid for [`DEFAULT_TTL`].
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret: Arc::new(secret),
            ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the token lifetime.
    ///
    /// This is a deployment setting, not a per-call one. A zero TTL yields
    /// tokens that are already expired when issued.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The lifetime given to every token this codec issues.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `user_id`/`email`, valid from now.
    ///
    /// # Errors
    /// Only configuration faults: see [`encode_at`](Self::encode_at).
    pub fn encode(
        &self,
        user_id: &str,
        email: &str,
    ) -> Result<String, TokenError> {
        self.encode_at(user_id, email, OffsetDateTime::now_utc())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// # Errors
    /// Returns [`TokenError::Encode`] if serialization fails, or
    /// [`TokenError::MissingSecret`] if the key can't initialise the MAC.
    pub fn encode_at(
        &self,
        user_id: &str,
        email: &str,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let claims = SessionClaims {
            user_id: user_id.to_owned(),
            email: email.to_owned(),
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: Some("JWT".to_owned()),
        };

        let signing_input =
            format!("{}.{}", encode_json(&header)?, encode_json(&claims)?);
        let signature = self.sign(signing_input.as_bytes())?;

        Ok(format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verifies `token` against the current time.
    ///
    /// # Errors
    /// See [`decode_at`](Self::decode_at).
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.decode_at(token, OffsetDateTime::now_utc())
    }

    /// Verifies `token` as if the current time were `now`.
    ///
    /// Checks run in this order, and the first failure wins:
    ///
    /// 1. exactly three segments, header decodes and names `HS256`
    /// 2. signature matches (constant-time comparison)
    /// 3. payload decodes into [`SessionClaims`]
    /// 4. `now < exp`
    ///
    /// The payload is never parsed before its signature has been checked.
    ///
    /// # Errors
    /// - [`TokenError::Malformed`] — structure, encoding or algorithm
    /// - [`TokenError::SignatureMismatch`] — wrong signature or secret
    /// - [`TokenError::Expired`] — valid but past `exp`
    pub fn decode_at(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<SessionClaims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed("expected 3 segments".into()));
        };

        let header: Header = decode_json(header_b64, "header")?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Malformed(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
            TokenError::Malformed(format!("signature: {e}"))
        })?;

        // The signed bytes are the first two segments exactly as received,
        // dot included.
        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::SignatureMismatch)?;

        let claims: SessionClaims = decode_json(payload_b64, "payload")?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| TokenError::MissingSecret)
    }

    fn sign(&self, input: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = self.mac()?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let bytes = serde_json::to_vec(value).map_err(TokenError::Encode)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn decode_json<T: DeserializeOwned>(
    segment: &str,
    what: &str,
) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Malformed(format!("{what}: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("{what}: {e}")))
}

// =========================================================================
// Tests
// =========================================================================
