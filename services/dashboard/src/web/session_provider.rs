//! services/dashboard/src/web/session_provider.rs
//!
//! The single-slot session: who is signed in, persisted under one key in the
//! `SessionStorage` port. Created once at startup and shared through `AppState`.

use chrono::{DateTime, Utc};
use legalvision_core::{
    domain::UserSession,
    identity,
    ports::{PortError, SessionStorage},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// The storage key holding the serialized session.
pub const SESSION_KEY: &str = "legalvision_user";

/// `uninitialized → loading → {authenticated, unauthenticated}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Uninitialized,
    Loading,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter both email and password.")]
    MissingCredentials,
    #[error("The session has not been restored yet.")]
    NotReady,
    #[error("Failed to persist the session: {0}")]
    Storage(#[from] PortError),
}

//=========================================================================================
// Persisted Record
//=========================================================================================

/// The on-storage shape of a session: one flat JSON object.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    firm: String,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
}

impl SessionRecord {
    fn from_domain(session: &UserSession) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            email: session.email.clone(),
            role: session.role.clone(),
            firm: session.firm.clone(),
            avatar: session.avatar.clone(),
            created_at: session.created_at,
        }
    }

    fn to_domain(self) -> UserSession {
        UserSession {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            firm: self.firm,
            avatar: self.avatar,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// SessionProvider
//=========================================================================================

struct ProviderState {
    status: SessionStatus,
    current: Option<UserSession>,
}

pub struct SessionProvider {
    storage: Arc<dyn SessionStorage>,
    login_latency: Duration,
    state: RwLock<ProviderState>,
    // Held by every operation that reads or writes storage, so a restore and
    // a login or logout never interleave.
    lifecycle: Mutex<()>,
}

impl SessionProvider {
    pub fn new(storage: Arc<dyn SessionStorage>, login_latency: Duration) -> Self {
        Self {
            storage,
            login_latency,
            state: RwLock::new(ProviderState {
                status: SessionStatus::Uninitialized,
                current: None,
            }),
            lifecycle: Mutex::new(()),
        }
    }

    /// Reads the persisted session, if any, and makes it active.
    ///
    /// Callers observe `Loading` until this returns. Any storage or parse
    /// failure leaves the provider unauthenticated.
    pub async fn initialize(&self) -> SessionStatus {
        let _lifecycle = self.lifecycle.lock().await;
        self.state.write().await.status = SessionStatus::Loading;

        let restored = self.read_persisted().await;

        let mut state = self.state.write().await;
        state.status = if restored.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        };
        if let Some(session) = &restored {
            info!("Restored session for {}", session.email);
        }
        state.current = restored;
        state.status
    }

    async fn read_persisted(&self) -> Option<UserSession> {
        let raw = match self.storage.get(SESSION_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read persisted session: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) => Some(record.to_domain()),
            Err(e) => {
                warn!("Ignoring malformed persisted session: {}", e);
                None
            }
        }
    }

    /// Signs in with any non-empty email and password.
    ///
    /// The identity is derived from the email after a simulated network
    /// delay; the password is not checked against anything. A login that
    /// overlaps a restore waits for it; before any restore it is rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserSession, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        tokio::time::sleep(self.login_latency).await;

        let _lifecycle = self.lifecycle.lock().await;
        match self.status().await {
            SessionStatus::Uninitialized | SessionStatus::Loading => {
                return Err(AuthError::NotReady)
            }
            SessionStatus::Authenticated | SessionStatus::Unauthenticated => {}
        }

        let session = identity::session_for_email(email, Utc::now());
        let raw = serde_json::to_string(&SessionRecord::from_domain(&session))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.storage.set(SESSION_KEY, &raw).await?;

        let mut state = self.state.write().await;
        state.current = Some(session.clone());
        state.status = SessionStatus::Authenticated;
        info!("Signed in as {} ({})", session.name, session.email);
        Ok(session)
    }

    /// Clears the active session and its persisted copy. Never fails.
    pub async fn logout(&self) {
        let _lifecycle = self.lifecycle.lock().await;
        {
            let mut state = self.state.write().await;
            state.current = None;
            state.status = SessionStatus::Unauthenticated;
        }
        if let Err(e) = self.storage.remove(SESSION_KEY).await {
            warn!("Could not clear persisted session: {}", e);
        }
        info!("Signed out.");
    }

    /// Drops in-memory state without touching storage.
    pub async fn teardown(&self) {
        let _lifecycle = self.lifecycle.lock().await;
        let mut state = self.state.write().await;
        state.current = None;
        state.status = SessionStatus::Uninitialized;
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    pub async fn current_user(&self) -> Option<UserSession> {
        self.state.read().await.current.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.status().await == SessionStatus::Authenticated
    }
}
