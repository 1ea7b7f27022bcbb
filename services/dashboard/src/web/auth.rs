//! services/dashboard/src/web/auth.rs
//!
//! Authentication endpoints for the demo sign-in, sign-out and session lookup.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use legalvision_core::{
    domain::UserSession,
    ports::{Navigator, Notification, Notifier},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::adapters::{EffectRecorder, UiEffect};
use crate::web::{
    session_provider::{AuthError, SessionProvider, SessionStatus},
    state::AppState,
};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub firm: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserSession> for SessionUser {
    fn from(session: UserSession) -> Self {
        Self {
            id: session.id,
            name: session.name,
            email: session.email,
            role: session.role,
            firm: session.firm,
            avatar: session.avatar,
            created_at: session.created_at,
        }
    }
}

/// The outcome of a sign-in or sign-out, with what the UI should do next.
#[derive(Serialize, ToSchema, Debug)]
pub struct AuthResponse {
    pub user: Option<SessionUser>,
    pub effects: Vec<UiEffect>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SessionResponse {
    pub status: SessionStatus,
    pub user: Option<SessionUser>,
}

type AuthFailure = (StatusCode, Json<AuthResponse>);

//=========================================================================================
// Sign-in Flow
//=========================================================================================

/// Runs the sign-in and reports the outcome through the notification and
/// navigation ports.
pub async fn sign_in(
    sessions: &SessionProvider,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    email: &str,
    password: &str,
) -> Result<UserSession, AuthError> {
    match sessions.login(email, password).await {
        Ok(session) => {
            notifier.notify(Notification::info(
                "Welcome back!",
                "You've successfully signed in to LegalVision.",
            ));
            navigator.navigate_to("/dashboard");
            Ok(session)
        }
        Err(AuthError::MissingCredentials) => {
            notifier.notify(Notification::destructive(
                "Missing credentials",
                "Please enter both email and password.",
            ));
            Err(AuthError::MissingCredentials)
        }
        Err(e) => {
            error!("Sign in failed: {}", e);
            notifier.notify(Notification::destructive(
                "Sign in failed",
                "An error occurred. Please try again.",
            ));
            Err(e)
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/login - Sign in with any non-empty email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Email or password missing", body = AuthResponse),
        (status = 503, description = "Session is still being restored", body = AuthResponse),
        (status = 500, description = "Session could not be persisted", body = AuthResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthFailure> {
    let effects = EffectRecorder::new();
    let outcome = sign_in(&state.sessions, &effects, &effects, &req.email, &req.password).await;

    match outcome {
        Ok(session) => Ok(Json(AuthResponse {
            user: Some(session.into()),
            effects: effects.drain(),
        })),
        Err(e) => {
            let status = match e {
                AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
                AuthError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
                AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((
                status,
                Json(AuthResponse {
                    user: None,
                    effects: effects.drain(),
                }),
            ))
        }
    }
}

/// POST /auth/logout - Sign out and clear the persisted session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = AuthResponse)
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> Json<AuthResponse> {
    let effects = EffectRecorder::new();
    state.sessions.logout().await;
    effects.navigate_to("/login");
    Json(AuthResponse {
        user: None,
        effects: effects.drain(),
    })
}

/// GET /auth/session - Current session status and user
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Session status", body = SessionResponse)
    )
)]
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    Json(SessionResponse {
        status: state.sessions.status().await,
        user: state.sessions.current_user().await.map(SessionUser::from),
    })
}
