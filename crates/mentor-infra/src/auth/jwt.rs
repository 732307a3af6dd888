//! HS256 session tokens for the local identity provider.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentor_core::ports::{AuthError, TokenClaims, TokenService};

/// Secret used when none is configured. Fine for local development only.
pub const DEV_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Session lifetime.
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "mentor-site".to_string(),
        }
    }
}

impl JwtConfig {
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    email: String,
    iat: i64,
    exp: i64,
    iss: String,
    /// Random per token, so two sign-ins in the same second differ.
    jti: Uuid,
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: TimeDelta,
    issuer: String,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime: TimeDelta::hours(config.expiration_hours),
            issuer: config.issuer,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        let issued = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            email: email.to_string(),
            iat: issued.timestamp(),
            exp: (issued + self.lifetime).timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            },
        )?;

        Ok(TokenClaims {
            user_id: data.claims.sub,
            email: data.claims.email,
            exp: data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.lifetime.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(hours: i64, issuer: &str) -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret: "session-test-secret".to_string(),
            expiration_hours: hours,
            issuer: issuer.to_string(),
        })
    }

    #[test]
    fn test_token_carries_operator() {
        let tokens = service(1, "mentor-site");
        let operator = Uuid::new_v4();

        let token = tokens.generate_token(operator, "ops@example.com").unwrap();
        let claims = tokens.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, operator);
        assert_eq!(claims.email, "ops@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_each_sign_in_gets_a_distinct_token() {
        let tokens = service(1, "mentor-site");
        let operator = Uuid::new_v4();

        assert_ne!(
            tokens.generate_token(operator, "ops@example.com").unwrap(),
            tokens.generate_token(operator, "ops@example.com").unwrap()
        );
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let tokens = service(1, "mentor-site");
        let mut token = tokens.generate_token(Uuid::new_v4(), "ops@example.com").unwrap();
        token.push('x');

        assert!(matches!(
            tokens.validate_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            tokens.validate_token("garbage"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_lapsed_session_is_expired() {
        let tokens = service(-2, "mentor-site");
        let token = tokens.generate_token(Uuid::new_v4(), "ops@example.com").unwrap();

        assert!(matches!(
            tokens.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let ours = service(1, "mentor-site");
        let theirs = service(1, "somewhere-else");
        let token = theirs.generate_token(Uuid::new_v4(), "ops@example.com").unwrap();

        assert!(ours.validate_token(&token).is_err());
    }

    #[test]
    fn test_lifetime_in_seconds() {
        assert_eq!(service(24, "mentor-site").expiration_seconds(), 86_400);
        assert!(JwtConfig::default().uses_dev_secret());
    }
}
