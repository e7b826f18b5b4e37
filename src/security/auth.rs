//! Authentication Module
//!
//! Sessions are issued by the hosted auth service as HS256 JWTs. This module
//! only verifies them and turns the claims into a [`Session`]:
//! - Credential extraction (Authorization header or session cookie)
//! - `SessionProvider` seam with a JWT implementation
//! - Token generation for development and tests

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::{TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::config::AuthConfig;
use crate::error::{AppError, Result};
use crate::models::session::Session;

/// Credentials for authentication
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Access token (if provided)
    pub access_token: Option<String>,
}

impl Credentials {
    /// Create new credentials
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }

    /// Credentials carrying a bearer token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }

    /// Try to extract credentials from Authorization header
    pub fn from_authorization_header(auth_header: Option<&str>) -> Self {
        match auth_header {
            Some(header) if header.starts_with("Bearer ") => {
                Self::new(Some(header[7..].trim().to_string()))
            }
            _ => Self::new(None),
        }
    }

    /// Extract credentials from request headers.
    ///
    /// The Authorization header wins over the session cookie.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        let from_header = Self::from_authorization_header(
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok()),
        );
        if from_header.access_token.is_some() {
            return from_header;
        }

        let token = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == cookie_name)
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty());

        Self::new(token)
    }
}

fn default_role() -> String {
    "authenticated".to_string()
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role assigned by the auth service
    #[serde(default = "default_role")]
    pub role: String,
    /// Audience
    pub aud: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Issued at timestamp
    pub iat: usize,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Create new claims
    pub fn new(
        sub: String,
        email: Option<String>,
        role: String,
        audience: String,
        issuer: Option<String>,
        expiry_seconds: u64,
    ) -> Self {
        let iat = Utc::now().timestamp() as usize;
        Self {
            sub,
            email,
            role,
            aud: audience,
            exp: iat + expiry_seconds as usize,
            iat,
            iss: issuer,
        }
    }

    /// Turn verified claims into a session
    pub fn into_session(self) -> Session {
        let expires_at = Utc
            .timestamp_opt(self.exp as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Session {
            user_id: self.sub,
            email: self.email,
            role: self.role,
            expires_at,
        }
    }
}

/// Source of the ambient session (the auth collaborator)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The active session for these credentials, if any
    async fn get_session(&self, credentials: &Credentials) -> Option<Session>;
    /// Get the provider type
    fn provider_type(&self) -> &'static str;
}

/// JWT based session provider
#[derive(Clone)]
pub struct JwtSessionProvider {
    decoding_key: DecodingKey,
    audience: String,
    issuer: Option<String>,
}

impl std::fmt::Debug for JwtSessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionProvider")
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtSessionProvider {
    /// Create new JWT session provider
    pub fn new(secret: &str, audience: String, issuer: Option<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience,
            issuer,
        }
    }

    /// Create from auth settings
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_audience.clone(),
            config.jwt_issuer.clone(),
        )
    }

    /// Validate a token and return claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.clone()]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer.clone()]);
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| AppError::Authentication(format!("Invalid JWT token: {}", e)))
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn get_session(&self, credentials: &Credentials) -> Option<Session> {
        let token = credentials.access_token.as_deref()?;
        match self.validate_token(token) {
            Ok(claims) => Some(claims.into_session()),
            Err(e) => {
                debug!("Rejected access token: {}", e);
                None
            }
        }
    }

    fn provider_type(&self) -> &'static str {
        "JWT"
    }
}

/// JWT token generation helper
pub struct JwtTokenGenerator {
    encoding_key: EncodingKey,
    audience: String,
    issuer: Option<String>,
    expiry_seconds: u64,
}

impl JwtTokenGenerator {
    /// Create new token generator
    pub fn new(secret: &str, audience: String, issuer: Option<String>, expiry_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            audience,
            issuer,
            expiry_seconds,
        }
    }

    /// Create from auth settings
    pub fn from_config(config: &AuthConfig, expiry_seconds: u64) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_audience.clone(),
            config.jwt_issuer.clone(),
            expiry_seconds,
        )
    }

    /// Generate a new JWT token
    pub fn generate_token(&self, sub: &str, email: Option<&str>) -> Result<String> {
        let claims = Claims::new(
            sub.to_string(),
            email.map(str::to_string),
            default_role(),
            self.audience.clone(),
            self.issuer.clone(),
            self.expiry_seconds,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Authentication(format!("Failed to generate token: {}", e)))
    }
}
