//! Token Service
//!
//! Stateless session tokens: HMAC-SHA256-signed claims carrying the
//! subject and expiry, encoded as `base64url(claims).base64url(mac)`.
//! Validity depends only on the signature and the clock; a password
//! change does not invalidate outstanding tokens.

use chrono::Utc;
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Signed token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id
    pub sub: i64,
    /// Issued at (ms since epoch)
    pub iat: i64,
    /// Expiry (ms since epoch)
    pub exp: i64,
}

/// Issues and verifies session tokens with a process-wide secret.
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: [u8; 32],
    ttl_ms: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.token_secret,
            ttl_ms: config.token_ttl_ms(),
        }
    }

    /// Issue a token for `user_id`, expiring after the configured TTL
    pub fn issue(&self, user_id: UserId) -> String {
        let now_ms = Utc::now().timestamp_millis();
        let claims = Claims {
            sub: user_id.as_i64(),
            iat: now_ms,
            exp: now_ms + self.ttl_ms,
        };
        self.encode(&claims)
    }

    /// Verify a token and return its subject.
    ///
    /// `TokenExpired` is only reachable once the signature checks out, so
    /// a forged expiry cannot steer the error path.
    pub fn verify(&self, token: &str) -> AuthResult<UserId> {
        let claims = self.decode(token)?;

        if Utc::now().timestamp_millis() > claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(UserId::from_i64(claims.sub))
    }

    fn encode(&self, claims: &Claims) -> String {
        // Serializing a plain struct of integers cannot fail
        let payload = serde_json::to_vec(claims).expect("claims serialize");
        let payload_b64 = platform::crypto::to_base64_url(&payload);

        let mac = platform::crypto::hmac_sha256(&self.secret, payload_b64.as_bytes());
        let mac_b64 = platform::crypto::to_base64_url(&mac);

        format!("{}.{}", payload_b64, mac_b64)
    }

    fn decode(&self, token: &str) -> AuthResult<Claims> {
        let (payload_b64, mac_b64) = token.split_once('.').ok_or(AuthError::TokenInvalid)?;

        let supplied_mac =
            platform::crypto::from_base64_url(mac_b64).map_err(|_| AuthError::TokenInvalid)?;
        let expected_mac = platform::crypto::hmac_sha256(&self.secret, payload_b64.as_bytes());

        if !platform::crypto::constant_time_eq(&expected_mac, &supplied_mac) {
            return Err(AuthError::TokenInvalid);
        }

        let payload =
            platform::crypto::from_base64_url(payload_b64).map_err(|_| AuthError::TokenInvalid)?;
        serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::with_random_secret())
    }

    #[test]
    fn test_issue_then_verify() {
        let service = service();
        let token = service.issue(UserId::from_i64(42));

        let subject = service.verify(&token).unwrap();
        assert_eq!(subject, UserId::from_i64(42));
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let now_ms = Utc::now().timestamp_millis();
        let token = service.encode(&Claims {
            sub: 42,
            iat: now_ms - 10_000,
            exp: now_ms - 1_000,
        });

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let service = service();
        let now_ms = Utc::now().timestamp_millis();
        // Expires a minute from now; must verify
        let token = service.encode(&Claims {
            sub: 7,
            iat: now_ms,
            exp: now_ms + 60_000,
        });

        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn test_tampered_payload() {
        let service = service();
        let token = service.issue(UserId::from_i64(42));

        // Flip a character in the payload segment
        let mut chars: Vec<char> = token.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(matches!(
            service.verify(&tampered),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let token = service().issue(UserId::from_i64(42));
        let other = service();

        assert!(matches!(other.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_garbage_tokens() {
        let service = service();

        for garbage in ["", "nodot", "two.dots.here", "!!!.???", "YQ.YQ"] {
            assert!(matches!(
                service.verify(garbage),
                Err(AuthError::TokenInvalid)
            ));
        }
    }

    #[test]
    fn test_expired_takes_priority_only_after_signature() {
        // An expired claims blob signed with the wrong key must report
        // Invalid, not Expired
        let service_a = service();
        let service_b = service();

        let now_ms = Utc::now().timestamp_millis();
        let token = service_a.encode(&Claims {
            sub: 1,
            iat: now_ms - 10_000,
            exp: now_ms - 1_000,
        });

        assert!(matches!(
            service_b.verify(&token),
            Err(AuthError::TokenInvalid)
        ));
    }
}
