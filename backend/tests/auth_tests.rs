//! Authentication tests
//!
//! Tests for credential hashing and token issuance/validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

const TEST_SECRET: &str = "test-secret";

fn make_token(sub: &str, expires_in: i64) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        exp: (now + Duration::seconds(expires_in)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

// ============================================================================
// Password Hashing
// ============================================================================

#[cfg(test)]
mod password_tests {
    // Low cost keeps the tests fast; the service uses DEFAULT_COST
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = bcrypt::hash("secret123", TEST_COST).unwrap();

        assert!(bcrypt::verify("secret123", &hash).unwrap());
        assert!(!bcrypt::verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = bcrypt::hash("secret123", TEST_COST).unwrap();
        let b = bcrypt::hash("secret123", TEST_COST).unwrap();

        // Same password, different salts, different hashes
        assert_ne!(a, b);
        assert!(bcrypt::verify("secret123", &a).unwrap());
        assert!(bcrypt::verify("secret123", &b).unwrap());
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = bcrypt::hash("secret123", TEST_COST).unwrap();
        assert!(!hash.contains("secret123"));
    }
}

// ============================================================================
// Token Issuance and Validation
// ============================================================================

#[cfg(test)]
mod token_tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = make_token("b0a2f6e4-0000-0000-0000-000000000001", 3600);

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, "b0a2f6e4-0000-0000-0000-000000000001");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = make_token("user", -3600);

        let mut validation = Validation::default();
        validation.leeway = 0;

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &validation,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = make_token("user", 3600);

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"another-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let mut token = make_token("user", 3600);
        // Flip a character in the payload segment
        let tampered = token.pop().map(|c| if c == 'a' { 'b' } else { 'a' }).unwrap();
        token.push(tampered);

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
