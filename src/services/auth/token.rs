use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};

pub const ACCESS_TOKEN_TYPE: &str = "access";

// Errors returned by access-token decoding. Callers collapse all of them into one
// "invalid token" outcome; the variants exist for logs.
#[derive(Debug)]
pub enum TokenError {
    Jwt(jsonwebtoken::errors::Error),
    UnexpectedType(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::UnexpectedType(t) => write!(f, "unexpected token type '{}'", t),
        }
    }
}

impl StdError for TokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

fn default_token_type() -> String {
    ACCESS_TOKEN_TYPE.to_string()
}

/// Access token claims.
///
/// NOTE:
/// - older tokens carry the subject as `id`, newer ones as `userId`
/// - `type` is optional on the wire and defaults to `access`
/// - `exp` is only enforced when present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId", alias = "id")]
    pub subject_id: i64,

    #[serde(default)]
    pub username: String,

    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// HS256 access-token codec over a shared secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is checked when present but not required; no audience in these tokens
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature / expiry and return the claims. Pure.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::UnexpectedType(claims.token_type));
        }

        Ok(claims)
    }

    /// Sign an access token for `subject_id` valid for `ttl_seconds`.
    pub fn issue(
        &self,
        subject_id: i64,
        username: &str,
        ttl_seconds: u64,
    ) -> Result<String, TokenError> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let claims = TokenClaims {
            subject_id,
            username: username.to_string(),
            token_type: default_token_type(),
            iat: Some(now),
            exp: Some(now.saturating_add(ttl_seconds)),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "unit-test-secret";

    fn sign_raw(claims: serde_json::Value, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn now() -> u64 {
        Utc::now().timestamp() as u64
    }

    #[test]
    fn issued_token_decodes_to_same_subject() {
        let codec = TokenCodec::new(SECRET, 0);
        let token = codec.issue(42, "zhang", 600).unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.subject_id, 42);
        assert_eq!(claims.username, "zhang");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenCodec::new("other-secret", 0).issue(42, "zhang", 600).unwrap();
        let err = TokenCodec::new(SECRET, 0).decode(&token).unwrap_err();
        assert!(matches!(err, TokenError::Jwt(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign_raw(json!({"userId": 1, "exp": now() - 120}), SECRET);
        let err = TokenCodec::new(SECRET, 0).decode(&token).unwrap_err();
        assert!(matches!(err, TokenError::Jwt(_)));
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let token = sign_raw(json!({"userId": 1, "exp": now() - 5}), SECRET);
        assert!(TokenCodec::new(SECRET, 60).decode(&token).is_ok());
    }

    #[test]
    fn token_without_exp_is_accepted() {
        let token = sign_raw(json!({"id": 9, "username": "demo"}), SECRET);
        let claims = TokenCodec::new(SECRET, 0).decode(&token).unwrap();
        assert_eq!(claims.subject_id, 9);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn non_access_type_is_rejected() {
        let token = sign_raw(json!({"userId": 1, "type": "refresh"}), SECRET);
        let err = TokenCodec::new(SECRET, 0).decode(&token).unwrap_err();
        assert!(matches!(err, TokenError::UnexpectedType(t) if t == "refresh"));
    }

    #[test]
    fn garbage_and_missing_subject_are_rejected() {
        let codec = TokenCodec::new(SECRET, 0);
        assert!(codec.decode("not-a-jwt").is_err());
        assert!(codec.decode("").is_err());

        let token = sign_raw(json!({"username": "nobody"}), SECRET);
        assert!(codec.decode(&token).is_err());
    }

    #[test]
    fn debug_does_not_print_secret() {
        let codec = TokenCodec::new(SECRET, 0);
        assert!(!format!("{:?}", codec).contains(SECRET));
    }
}
