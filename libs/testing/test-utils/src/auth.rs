//! Token issuer stand-in for auth tests
//!
//! Signs tokens with a fixture RSA key and publishes the matching JWKS, so
//! verification can be exercised end to end without a real identity provider.
//! A second, unpublished key produces tokens that must fail signature checks.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, jwk::JwkSet};
use serde_json::{Value, json};

const ISSUER_PRIVATE_KEY: &str = include_str!("../fixtures/issuer_private.pem");
const UNTRUSTED_PRIVATE_KEY: &str = include_str!("../fixtures/untrusted_private.pem");
const ISSUER_JWKS: &str = include_str!("../fixtures/issuer_jwks.json");

/// Mints bearer tokens the way the production issuer would.
///
/// # Example
///
/// ```
/// use test_utils::TestIssuer;
///
/// let issuer = TestIssuer::new();
/// let header = format!("Bearer {}", issuer.token());
/// assert!(header.starts_with("Bearer ey"));
/// assert_eq!(issuer.jwk_set().keys.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TestIssuer {
    audience: String,
    issuer: String,
}

impl Default for TestIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestIssuer {
    /// `kid` of the published fixture key
    pub const KID: &'static str = "test-signing-key";
    pub const AUDIENCE: &'static str = "https://products.test/api";
    pub const ISSUER: &'static str = "https://issuer.test/";
    pub const SUBJECT: &'static str = "auth0|test-user";

    pub fn new() -> Self {
        Self {
            audience: Self::AUDIENCE.to_string(),
            issuer: Self::ISSUER.to_string(),
        }
    }

    /// Same keys, different `iss`
    pub fn with_issuer(issuer: &str) -> Self {
        Self {
            issuer: issuer.to_string(),
            ..Self::new()
        }
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Public key set matching tokens from [`token`](Self::token).
    pub fn jwk_set(&self) -> JwkSet {
        serde_json::from_str(ISSUER_JWKS).expect("fixture JWKS is valid")
    }

    /// The claims of a valid token, for tests that tweak one field.
    pub fn claims(&self) -> Value {
        let now = Utc::now();
        json!({
            "sub": Self::SUBJECT,
            "iss": self.issuer,
            "aud": self.audience,
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
            "scope": "read:products write:products",
            "permissions": ["read:products", "write:products"],
        })
    }

    /// Valid RS256 token carrying the published `kid`.
    pub fn token(&self) -> String {
        self.sign(&self.claims(), Some(Self::KID), ISSUER_PRIVATE_KEY)
    }

    pub fn token_without_kid(&self) -> String {
        self.sign(&self.claims(), None, ISSUER_PRIVATE_KEY)
    }

    /// Valid signature, `exp` an hour in the past.
    pub fn expired_token(&self) -> String {
        let mut claims = self.claims();
        let past = Utc::now() - Duration::hours(1);
        claims["iat"] = json!((past - Duration::hours(1)).timestamp());
        claims["exp"] = json!(past.timestamp());
        self.sign(&claims, Some(Self::KID), ISSUER_PRIVATE_KEY)
    }

    pub fn token_for_audience(&self, audience: &str) -> String {
        let mut claims = self.claims();
        claims["aud"] = json!(audience);
        self.sign(&claims, Some(Self::KID), ISSUER_PRIVATE_KEY)
    }

    /// Signed by a key the issuer never published, under the published `kid`.
    pub fn untrusted_token(&self) -> String {
        self.sign(&self.claims(), Some(Self::KID), UNTRUSTED_PRIVATE_KEY)
    }

    /// HMAC-signed token, which RS256-only verification must refuse.
    pub fn hs256_token(&self) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(Self::KID.to_string());
        encode(
            &header,
            &self.claims(),
            &EncodingKey::from_secret(b"a-shared-secret-an-attacker-could-guess"),
        )
        .expect("HS256 signing succeeds")
    }

    fn sign(&self, claims: &Value, kid: Option<&str>, private_key: &str) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(str::to_string);
        let key = EncodingKey::from_rsa_pem(private_key.as_bytes()).expect("fixture key is valid");
        encode(&header, claims, &key).expect("RS256 signing succeeds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::decode_header;

    #[test]
    fn test_token_header_carries_kid_and_alg() {
        let header = decode_header(&TestIssuer::new().token()).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some(TestIssuer::KID));
    }

    #[test]
    fn test_published_key_matches_kid() {
        let keys = TestIssuer::new().jwk_set();
        assert!(keys.find(TestIssuer::KID).is_some());
    }

    #[test]
    fn test_hs256_header() {
        let header = decode_header(&TestIssuer::new().hs256_token()).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }
}
