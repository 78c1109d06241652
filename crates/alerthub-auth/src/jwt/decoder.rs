//! Bearer token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use alerthub_core::config::AuthConfig;
use alerthub_core::error::AppError;

use super::claims::Claims;

/// Verifies HS256 tokens issued by the identity provider.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// The audience is checked only when one is configured.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        match &config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AppError::unauthorized("Token audience mismatch")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use alerthub_core::error::ErrorKind;
    use chrono::Duration;
    use uuid::Uuid;

    fn config(audience: Option<&str>) -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            audience: audience.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let cfg = config(None);
        let user = Uuid::new_v4();
        let token = JwtEncoder::new(&cfg)
            .issue(user, Some("ana@example.com"), Some("admin"), Duration::minutes(5))
            .unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.sub, user);
        assert_eq!(claims.email.as_deref(), Some("ana@example.com"));
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new(&config(None))
            .issue(Uuid::new_v4(), None, None, Duration::minutes(5))
            .unwrap();
        let other = AuthConfig {
            jwt_secret: "another-secret".to_string(),
            ..Default::default()
        };
        let err = JwtDecoder::new(&other).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_rejected() {
        let cfg = config(None);
        let token = JwtEncoder::new(&cfg)
            .issue(Uuid::new_v4(), None, None, Duration::minutes(-10))
            .unwrap();
        let err = JwtDecoder::new(&cfg).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(err.message.contains("expired"));
    }

    #[test]
    fn test_audience_checked_when_configured() {
        let minted = JwtEncoder::new(&config(Some("alerthub")))
            .issue(Uuid::new_v4(), None, None, Duration::minutes(5))
            .unwrap();
        assert!(JwtDecoder::new(&config(Some("alerthub"))).decode(&minted).is_ok());
        assert!(JwtDecoder::new(&config(Some("billing"))).decode(&minted).is_err());
        assert!(JwtDecoder::new(&config(None)).decode(&minted).is_ok());
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config(None)).decode("not-a-token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
