//! Security Module
//!
//! Provides the security features of the caredesk API:
//! - Session verification (JWT issued by the hosted auth service)
//! - Session and admin gate extractors
//! - Security headers and CORS

pub mod auth;
pub mod gate;
pub mod middleware;

pub use auth::{Claims, Credentials, JwtSessionProvider, JwtTokenGenerator, SessionProvider};
pub use gate::{AdminSession, AuthSession, SessionGate, SessionOrRedirect};
pub use middleware::{cors_layer, security_headers_middleware};
