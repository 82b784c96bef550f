//! JWT token service
//!
//! Issues and validates the access/refresh token pair. Access tokens are
//! short-lived and travel in the Authorization header; refresh tokens carry a
//! server-side session id and travel only in an httpOnly cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Access token lifetime (minutes)
    pub access_minutes: i64,
    /// Refresh token lifetime (days)
    pub refresh_days: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using generated dev key", e);
                    generate_dev_jwt_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            access_minutes: std::env::var("ACCESS_TOKEN_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            refresh_days: std::env::var("REFRESH_TOKEN_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "store-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "store-admin".to_string()),
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    /// User email
    pub email: String,
    /// "access" or "refresh"
    pub token_type: String,
    /// Session id, present only on refresh tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable secret for development use
pub fn generate_dev_jwt_secret() -> String {
    use rand::Rng;
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";
    let mut rng = rand::thread_rng();
    (0..64)
        .map(|_| ALLOWED[rng.gen_range(0..ALLOWED.len())] as char)
        .collect()
}

/// Load the JWT secret from the environment
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating a temporary development key");
                Ok(generate_dev_jwt_secret())
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ))
            }
        }
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Access token lifetime in seconds (for the `expires_in` response field)
    pub fn access_expires_in(&self) -> i64 {
        self.config.access_minutes * 60
    }

    /// Refresh token lifetime in seconds (drives the cookie Max-Age)
    pub fn refresh_expires_in(&self) -> i64 {
        self.config.refresh_days * 24 * 60 * 60
    }

    /// Generate a short-lived access token
    pub fn generate_access_token(&self, user_id: i64, email: &str) -> Result<String, JwtError> {
        self.generate(
            user_id,
            email,
            TOKEN_TYPE_ACCESS,
            None,
            Duration::minutes(self.config.access_minutes),
        )
    }

    /// Generate a refresh token carrying the session id
    pub fn generate_refresh_token(
        &self,
        user_id: i64,
        email: &str,
        session_id: &str,
    ) -> Result<String, JwtError> {
        self.generate(
            user_id,
            email,
            TOKEN_TYPE_REFRESH,
            Some(session_id.to_string()),
            Duration::days(self.config.refresh_days),
        )
    }

    fn generate(
        &self,
        user_id: i64,
        email: &str,
        token_type: &str,
        sid: Option<String>,
        lifetime: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            token_type: token_type.to_string(),
            sid,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Current user context (from validated access token claims)
///
/// Created by the auth middleware and injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl CurrentUser {
    /// Build from claims; refresh tokens are rejected so a stolen refresh
    /// cookie cannot double as an access credential
    pub fn from_claims(claims: Claims) -> Result<Self, JwtError> {
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(JwtError::InvalidToken(
                "Not an access token".to_string(),
            ));
        }
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| JwtError::InvalidToken("Invalid subject".to_string()))?;
        Ok(Self {
            id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-at-least-32-characters-long!".to_string(),
            access_minutes: 15,
            refresh_days: 7,
            issuer: "store-server".to_string(),
            audience: "store-admin".to_string(),
        })
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = test_service();
        let token = service
            .generate_access_token(42, "admin@example.com")
            .expect("Failed to generate token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.sid.is_none());
    }

    #[test]
    fn test_refresh_token_carries_session_id() {
        let service = test_service();
        let token = service
            .generate_refresh_token(42, "admin@example.com", "session-uuid")
            .expect("Failed to generate token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.token_type, TOKEN_TYPE_REFRESH);
        assert_eq!(claims.sid.as_deref(), Some("session-uuid"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = test_service().config;
        config.access_minutes = -5;
        let service = JwtService::with_config(config);

        let token = service
            .generate_access_token(42, "admin@example.com")
            .expect("Failed to generate token");

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = test_service();
        let token = service
            .generate_access_token(42, "admin@example.com")
            .expect("Failed to generate token");

        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-at-least-32-characters!!!".to_string(),
            ..test_service().config
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_current_user_rejects_refresh_token() {
        let service = test_service();
        let token = service
            .generate_refresh_token(42, "admin@example.com", "sid")
            .expect("Failed to generate token");
        let claims = service.validate_token(&token).unwrap();

        assert!(CurrentUser::from_claims(claims).is_err());
    }

    #[test]
    fn test_current_user_from_access_claims() {
        let service = test_service();
        let token = service
            .generate_access_token(42, "admin@example.com")
            .expect("Failed to generate token");
        let claims = service.validate_token(&token).unwrap();

        let user = CurrentUser::from_claims(claims).expect("Failed to build user");
        assert_eq!(user.id, 42);
        assert_eq!(user.email, "admin@example.com");
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
