//! Bearer credential issuance and verification (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use trainlog_core::error::TrainlogResult;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: user ID (UUID string).
    pub sub: String,
    pub email: String,
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

fn signing_secret(config: &AuthConfig) -> Result<&[u8], AuthError> {
    if config.jwt_secret.is_empty() {
        return Err(AuthError::Crypto("JWT secret is not configured".into()));
    }
    Ok(config.jwt_secret.as_bytes())
}

/// Issue a signed HS256 access token for `user_id`.
pub fn issue_access_token(
    user_id: Uuid,
    email: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(signing_secret(config)?);
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an HS256 access token (signature, expiry, issuer).
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(signing_secret(config)?);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Validated JWT claims: a newtype proving the token was verified.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub AccessTokenClaims);

impl ValidatedClaims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("subject is not a UUID: {e}")))
    }
}

/// Strip an optional `Bearer ` scheme from an `Authorization` value.
pub fn bearer_token(credential: &str) -> Result<&str, AuthError> {
    let credential = credential.trim();
    let token = match credential.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return Err(AuthError::TokenInvalid("unsupported scheme".into())),
        None => credential,
    };
    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}

/// Stateless verifier the boundary layer calls on every request.
///
/// No database lookup is performed; a token stays valid for its whole
/// lifetime even if the account is erased in the meantime.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    config: AuthConfig,
}

impl TokenVerifier {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, credential: &str) -> Result<ValidatedClaims, AuthError> {
        let token = bearer_token(credential)?;
        decode_access_token(token, &self.config).map(ValidatedClaims)
    }

    /// Resolve a presented credential (raw token or `Bearer <token>`)
    /// to the authenticated user id.
    pub fn verify(&self, credential: &str) -> TrainlogResult<Uuid> {
        let claims = self.validate(credential).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer credential");
        })?;
        Ok(claims.user_id()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainlog_core::error::TrainlogError;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-with-enough-entropy".into(),
            jwt_issuer: "trainlog-test".into(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn jwt_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_access_token(user_id, "a@example.com", &config).unwrap();
        let claims = decode_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.iss, "trainlog-test");
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn jti_is_unique() {
        let config = test_config();
        let uid = Uuid::new_v4();

        let t1 = issue_access_token(uid, "a@example.com", &config).unwrap();
        let t2 = issue_access_token(uid, "a@example.com", &config).unwrap();

        let c1 = decode_access_token(&t1, &config).unwrap();
        let c2 = decode_access_token(&t2, &config).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_access_token(Uuid::new_v4(), "a@example.com", &test_config()).unwrap();
        let other = AuthConfig {
            jwt_secret: "another-secret".into(),
            ..test_config()
        };
        assert!(matches!(
            decode_access_token(&token, &other),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: Uuid::new_v4().to_string(),
            email: "a@example.com".into(),
            iss: config.jwt_issuer.clone(),
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            decode_access_token(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn missing_secret_is_a_crypto_error() {
        let config = AuthConfig::default();
        assert!(matches!(
            issue_access_token(Uuid::new_v4(), "a@example.com", &config),
            Err(AuthError::Crypto(_))
        ));
    }

    #[test]
    fn bearer_prefix_is_optional() {
        assert_eq!(bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token("bearer  abc ").unwrap(), "abc");
        assert_eq!(bearer_token("abc").unwrap(), "abc");
        assert!(matches!(bearer_token("  "), Err(AuthError::MissingCredential)));
        assert!(bearer_token("Basic abc").is_err());
    }

    #[test]
    fn verifier_resolves_user_id() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = issue_access_token(user_id, "a@example.com", &config).unwrap();
        let verifier = TokenVerifier::new(config);

        assert_eq!(
            verifier.verify(&format!("Bearer {token}")).unwrap(),
            user_id
        );
        assert!(matches!(
            verifier.verify("Bearer garbage"),
            Err(TrainlogError::InvalidCredential { .. })
        ));
    }
}
