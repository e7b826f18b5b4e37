//! Session Gate
//!
//! Decides whether a caller may see a page and, if not, where to send them.
//! The gate is advisory: row-level policies in the store remain the real
//! access control.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use tracing::{debug, warn};

use crate::api::app_state::AppState;
use crate::config::config::AuthConfig;
use crate::models::session::Session;
use crate::security::auth::{Credentials, SessionProvider};
use crate::storage::repository::ProfileRepository;

/// Outcome of a gate check
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOrRedirect {
    /// Caller may proceed
    Session(Session),
    /// Caller must be sent to this path
    Redirect(String),
}

impl SessionOrRedirect {
    /// Convert into the extractor result
    pub fn into_result(self) -> Result<Session, Redirect> {
        match self {
            SessionOrRedirect::Session(session) => Ok(session),
            SessionOrRedirect::Redirect(path) => Err(Redirect::to(&path)),
        }
    }
}

/// Session and admin gate
#[derive(Clone)]
pub struct SessionGate {
    sessions: Arc<dyn SessionProvider>,
    profiles: Arc<dyn ProfileRepository>,
    session_cookie: String,
    login_path: String,
    home_path: String,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("sessions", &self.sessions.provider_type())
            .field("session_cookie", &self.session_cookie)
            .field("login_path", &self.login_path)
            .field("home_path", &self.home_path)
            .finish()
    }
}

impl SessionGate {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        profiles: Arc<dyn ProfileRepository>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            sessions,
            profiles,
            session_cookie: config.session_cookie.clone(),
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    /// Name of the cookie carrying the access token
    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    /// Require an active session, otherwise redirect to login
    pub async fn require_session(&self, credentials: &Credentials) -> SessionOrRedirect {
        match self.sessions.get_session(credentials).await {
            Some(session) if !session.is_expired() => SessionOrRedirect::Session(session),
            _ => {
                debug!("No active session, redirecting to {}", self.login_path);
                SessionOrRedirect::Redirect(self.login_path.clone())
            }
        }
    }

    /// Require an active session whose profile carries the admin flag.
    ///
    /// A missing profile or a failed lookup counts as "not admin".
    pub async fn require_admin(&self, credentials: &Credentials) -> SessionOrRedirect {
        let session = match self.require_session(credentials).await {
            SessionOrRedirect::Session(session) => session,
            redirect => return redirect,
        };

        match self.profiles.get_by_id(&session.user_id).await {
            Ok(Some(profile)) if profile.is_admin() => SessionOrRedirect::Session(session),
            Ok(Some(_)) => {
                warn!(user_id = %session.user_id, "Non-admin user denied admin surface");
                SessionOrRedirect::Redirect(self.home_path.clone())
            }
            Ok(None) => {
                warn!(user_id = %session.user_id, "No profile found, denying admin surface");
                SessionOrRedirect::Redirect(self.home_path.clone())
            }
            Err(e) => {
                warn!(user_id = %session.user_id, "Profile lookup failed, denying admin surface: {}", e);
                SessionOrRedirect::Redirect(self.home_path.clone())
            }
        }
    }
}

/// Extractor for routes that need any signed-in user
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

/// Extractor for admin-only routes
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = Credentials::from_headers(&parts.headers, state.gate.session_cookie());
        state
            .gate
            .require_session(&credentials)
            .await
            .into_result()
            .map(AuthSession)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = Credentials::from_headers(&parts.headers, state.gate.session_cookie());
        state
            .gate
            .require_admin(&credentials)
            .await
            .into_result()
            .map(AdminSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;
    use crate::error::AppError;
    use crate::models::profile::Profile;
    use crate::security::auth::MockSessionProvider;
    use crate::storage::repository::MockProfileRepository;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn session(user_id: &str) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: None,
            role: "authenticated".into(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    fn signed_in(user_id: &'static str) -> MockSessionProvider {
        let mut sessions = MockSessionProvider::new();
        sessions
            .expect_get_session()
            .returning(move |_| Some(session(user_id)));
        sessions.expect_provider_type().return_const("mock");
        sessions
    }

    fn gate(sessions: MockSessionProvider, profiles: MockProfileRepository) -> SessionGate {
        SessionGate::new(
            Arc::new(sessions),
            Arc::new(profiles),
            &AppConfig::development().auth,
        )
    }

    fn credentials() -> Credentials {
        Credentials::bearer("token")
    }

    #[tokio::test]
    async fn test_no_session_redirects_to_login() {
        let mut sessions = MockSessionProvider::new();
        sessions.expect_get_session().returning(|_| None);
        let mut profiles = MockProfileRepository::new();
        profiles.expect_get_by_id().never();

        let gate = gate(sessions, profiles);
        assert_eq!(
            gate.require_session(&credentials()).await,
            SessionOrRedirect::Redirect("/login".into())
        );
        assert_eq!(
            gate.require_admin(&credentials()).await,
            SessionOrRedirect::Redirect("/login".into())
        );
    }

    #[tokio::test]
    async fn test_expired_session_redirects_to_login() {
        let mut sessions = MockSessionProvider::new();
        sessions.expect_get_session().returning(|_| {
            let mut s = session("user-1");
            s.expires_at = Utc::now() - Duration::minutes(1);
            Some(s)
        });

        let gate = gate(sessions, MockProfileRepository::new());
        assert_eq!(
            gate.require_session(&credentials()).await,
            SessionOrRedirect::Redirect("/login".into())
        );
    }

    #[tokio::test]
    async fn test_admin_flag_grants_access() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_get_by_id().returning(|id| {
            Ok(Some(Profile::new(id).with_preference("is_admin", json!(true))))
        });

        let gate = gate(signed_in("admin-1"), profiles);
        match gate.require_admin(&credentials()).await {
            SessionOrRedirect::Session(s) => assert_eq!(s.user_id, "admin-1"),
            other => panic!("expected session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_admin_redirects_home() {
        for flag in [json!(false), json!("true"), json!(1)] {
            let mut profiles = MockProfileRepository::new();
            let flag = flag.clone();
            profiles.expect_get_by_id().returning(move |id| {
                Ok(Some(Profile::new(id).with_preference("is_admin", flag.clone())))
            });

            let gate = gate(signed_in("user-1"), profiles);
            assert_eq!(
                gate.require_admin(&credentials()).await,
                SessionOrRedirect::Redirect("/".into())
            );
        }
    }

    #[tokio::test]
    async fn test_missing_profile_redirects_home() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_get_by_id().returning(|_| Ok(None));

        let gate = gate(signed_in("user-1"), profiles);
        assert_eq!(
            gate.require_admin(&credentials()).await,
            SessionOrRedirect::Redirect("/".into())
        );
    }

    #[tokio::test]
    async fn test_profile_lookup_failure_fails_closed() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_get_by_id()
            .returning(|_| Err(AppError::Database("connection reset".into())));

        let gate = gate(signed_in("user-1"), profiles);
        assert_eq!(
            gate.require_admin(&credentials()).await,
            SessionOrRedirect::Redirect("/".into())
        );
    }
}
