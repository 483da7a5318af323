use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;

/// JWT service for token generation and validation (HS256).
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry_minutes: i64,
}

/// Claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

/// Token response returned to the client.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Result<Self, anyhow::Error> {
        if config.secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT secret must be at least 32 bytes, got {}",
                config.secret.len()
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
        })
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(
        &self,
        user_id: &str,
        email: &str,
    ) -> Result<String, anyhow::Error> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.access_token_expiry_minutes);

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))?;

        Ok(token)
    }

    /// Validate and decode an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, anyhow::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid access token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Get access token expiry in seconds (for client info).
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.access_token_expiry_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-test-secret-test-secret-1234";

    fn test_service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_minutes: 15,
        })
        .expect("Failed to create JWT service")
    }

    #[test]
    fn rejects_short_secrets() {
        let result = JwtService::new(&JwtConfig {
            secret: "short".to_string(),
            access_token_expiry_minutes: 15,
        });
        assert!(result.is_err());
    }

    #[test]
    fn access_token_round_trips() {
        let service = test_service();

        let token = service
            .generate_access_token("user_123", "test@example.com")
            .unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.email, "test@example.com");
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let service = test_service();
        let other = JwtService::new(&JwtConfig {
            secret: "another-secret-another-secret-another-12".to_string(),
            access_token_expiry_minutes: 15,
        })
        .unwrap();

        let token = other
            .generate_access_token("user_123", "test@example.com")
            .unwrap();
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let service = JwtService::new(&JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_minutes: -5,
        })
        .unwrap();

        let token = service
            .generate_access_token("user_123", "test@example.com")
            .unwrap();
        assert!(test_service().validate_access_token(&token).is_err());
    }
}
