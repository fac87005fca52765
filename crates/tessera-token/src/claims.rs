//! The claim set carried inside a session token.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// What a session token asserts: who the user is, and for how long.
///
/// On the wire this is the JSON object
/// `{ "userId": ..., "email": ..., "iat": ..., "exp": ... }`, where `iat`
/// and `exp` are seconds since the Unix epoch. `serde(rename_all)` maps
/// the Rust field `user_id` to the camelCase key `userId`.
///
/// `user_id` and `email` are opaque strings. Nothing in this crate
/// inspects their format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Opaque user identifier.
    pub user_id: String,

    /// Contact/display identifier.
    pub email: String,

    /// Issued at (Unix timestamp, seconds). Some issuers omit it.
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds).
    pub exp: i64,
}

impl SessionClaims {
    /// Returns `true` if the claims are no longer valid at `now`.
    ///
    /// Expiry is strict: a token whose `exp` equals the current second is
    /// already expired.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now.unix_timestamp() >= self.exp
    }

    /// Issue time as a date-time.
    pub fn issued_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.iat)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Expiry time as a date-time.
    pub fn expires_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.exp)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat: i64, exp: i64) -> SessionClaims {
        SessionClaims {
            user_id: "user-1".into(),
            email: "a@b.com".into(),
            iat,
            exp,
        }
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let json = serde_json::to_value(claims(10, 20)).expect("serializes");
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["iat"], 10);
        assert_eq!(json["exp"], 20);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_is_expired_at_boundary_is_expired() {
        let c = claims(0, 100);
        let at = |secs| {
            OffsetDateTime::from_unix_timestamp(secs).expect("valid timestamp")
        };
        assert!(!c.is_expired_at(at(99)));
        assert!(c.is_expired_at(at(100)));
        assert!(c.is_expired_at(at(101)));
    }

    #[test]
    fn test_expires_at_matches_exp() {
        let c = claims(1_700_000_000, 1_700_604_800);
        assert_eq!(c.issued_at().unix_timestamp(), 1_700_000_000);
        assert_eq!(c.expires_at().unix_timestamp(), 1_700_604_800);
    }
}
