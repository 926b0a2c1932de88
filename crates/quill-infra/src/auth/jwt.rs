//! JWT verification for the external identity provider's bearer tokens.
//!
//! This service never issues tokens; it only validates the ones presented
//! by callers.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

use quill_core::ports::{AuthError, IdentityClaims, TokenVerifier};

/// JWT verifier configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            issuer: "quill-identity".to_string(),
        }
    }
}

/// Claims layout of the provider's tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    name: Option<String>,
    exp: i64,
}

/// JWT-based token verifier.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        if secret == "change-me-in-production" {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let config = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "quill-identity".to_string()),
        };
        Self::new(config)
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(IdentityClaims {
            uid: token_data.claims.sub,
            email: token_data.claims.email,
            name: token_data.claims.name,
            exp: token_data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        email: String,
        name: Option<String>,
        exp: i64,
        iss: String,
    }

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            issuer: "test-issuer".to_string(),
        }
    }

    fn mint(config: &JwtConfig, sub: &str, exp_offset_secs: i64) -> String {
        let claims = TestClaims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
            iss: config.issuer.clone(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let config = test_config();
        let verifier = JwtVerifier::new(config.clone());
        let token = mint(&config, "uid-42", 3600);

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.uid, "uid-42");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.name.as_deref(), Some("Test User"));
    }

    #[test]
    fn test_verify_expired_token() {
        let config = test_config();
        let verifier = JwtVerifier::new(config.clone());
        let token = mint(&config, "uid-42", -3600);

        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn test_verify_garbage_token() {
        let verifier = JwtVerifier::new(test_config());

        let err = verifier.verify("not-a-token").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_verify_wrong_issuer() {
        let config = test_config();
        let verifier = JwtVerifier::new(JwtConfig {
            secret: config.secret.clone(),
            issuer: "someone-else".to_string(),
        });
        let token = mint(&config, "uid-42", 3600);

        assert!(verifier.verify(&token).is_err());
    }
}
