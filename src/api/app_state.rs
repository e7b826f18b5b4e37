use std::sync::Arc;

use crate::config::config::AppConfig;
use crate::security::auth::{JwtSessionProvider, SessionProvider};
use crate::security::gate::SessionGate;
use crate::services::dashboard::{DashboardService, create_dashboard_service};
use crate::services::diagnosis::{DiagnosisService, create_diagnosis_service};
use crate::services::post::{PostService, create_post_service};
use crate::storage::factory::Store;

/// Application state containing all shared services and security components
#[derive(Clone)]
pub struct AppState {
    /// Store handles, created once at startup
    pub store: Store,
    /// Post service for the admin CRUD surface and the public listing
    pub post_service: Arc<dyn PostService>,
    /// Diagnosis history service
    pub diagnosis_service: Arc<dyn DiagnosisService>,
    /// Admin dashboard counts
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Session and admin gate
    pub gate: Arc<SessionGate>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("post_service", &"Arc<dyn PostService>")
            .field("diagnosis_service", &"Arc<dyn DiagnosisService>")
            .field("dashboard_service", &"Arc<dyn DashboardService>")
            .field("gate", &self.gate)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(store: Store, sessions: Arc<dyn SessionProvider>, config: &AppConfig) -> Self {
        let gate = SessionGate::new(sessions, store.profiles.clone(), &config.auth);

        Self {
            post_service: Arc::from(create_post_service(store.posts.clone())),
            diagnosis_service: Arc::from(create_diagnosis_service(store.history.clone())),
            dashboard_service: Arc::from(create_dashboard_service(
                store.posts.clone(),
                store.profiles.clone(),
            )),
            gate: Arc::new(gate),
            store,
        }
    }

    /// Create application state that verifies JWTs with the configured secret
    pub fn from_config(store: Store, config: &AppConfig) -> Self {
        let sessions = Arc::new(JwtSessionProvider::from_config(&config.auth));
        Self::new(store, sessions, config)
    }
}
