use axum::{extract::State, http::StatusCode, Json};
use dashboard_lib::adapters::{FsExporter, InMemorySessionStorage, UiEffect};
use dashboard_lib::config::Config;
use dashboard_lib::web::auth::{login_handler, logout_handler, session_handler, LoginRequest};
use dashboard_lib::web::session_provider::{SessionProvider, SessionStatus};
use dashboard_lib::web::state::AppState;
use std::sync::Arc;

fn app_state(dir: &tempfile::TempDir) -> Arc<AppState> {
    let config = Config::from_lookup(|_| None).expect("default config");
    let sessions = Arc::new(SessionProvider::new(
        Arc::new(InMemorySessionStorage::new()),
        config.login_latency,
    ));
    Arc::new(AppState {
        sessions,
        exporter: Arc::new(FsExporter::new(dir.path())),
        timings: config.pipeline_timings(),
    })
}

fn login(email: &str, password: &str) -> Json<LoginRequest> {
    Json(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[tokio::test(start_paused = true)]
async fn successful_login_greets_and_navigates_to_dashboard() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = app_state(&dir);
    state.sessions.initialize().await;

    let Json(body) = login_handler(State(state.clone()), login("jane.doe@example.com", "secret"))
        .await
        .expect("login succeeds");

    let user = body.user.expect("user");
    assert_eq!(user.name, "Jane Doe");
    assert_eq!(user.role, "Legal Analyst");
    assert_eq!(
        body.effects,
        vec![
            UiEffect::Notify {
                title: "Welcome back!".into(),
                description: "You've successfully signed in to LegalVision.".into(),
                severity: "default".into(),
            },
            UiEffect::Navigate {
                path: "/dashboard".into()
            },
        ]
    );

    let Json(session) = session_handler(State(state)).await;
    assert_eq!(session.status, SessionStatus::Authenticated);

    // Same field names as the persisted record.
    let value = serde_json::to_value(&session).expect("serialize");
    assert_eq!(value["status"], "authenticated");
    assert_eq!(value["user"]["email"], "jane.doe@example.com");
    assert!(value["user"]["createdAt"].is_string());
    assert!(value["user"].get("created_at").is_none());
}

#[tokio::test(start_paused = true)]
async fn login_before_the_session_is_restored_is_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = app_state(&dir);

    let (status, Json(body)) = login_handler(State(state.clone()), login("jane@example.com", "pw"))
        .await
        .expect_err("login rejected");

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.user.is_none());
    assert_eq!(state.sessions.status().await, SessionStatus::Uninitialized);
}

#[tokio::test(start_paused = true)]
async fn missing_password_is_a_bad_request_with_a_destructive_notice() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = app_state(&dir);
    state.sessions.initialize().await;

    let (status, Json(body)) = login_handler(State(state.clone()), login("jane@example.com", ""))
        .await
        .expect_err("login rejected");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.user.is_none());
    assert!(matches!(
        body.effects.as_slice(),
        [UiEffect::Notify { title, severity, .. }] if title == "Missing credentials" && severity == "destructive"
    ));
    assert_eq!(state.sessions.status().await, SessionStatus::Unauthenticated);
}

#[tokio::test(start_paused = true)]
async fn logout_navigates_to_login_and_clears_the_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = app_state(&dir);
    state.sessions.initialize().await;
    login_handler(State(state.clone()), login("a@b.com", "pw"))
        .await
        .expect("login succeeds");

    let Json(body) = logout_handler(State(state.clone())).await;
    assert_eq!(
        body.effects,
        vec![UiEffect::Navigate {
            path: "/login".into()
        }]
    );

    let Json(session) = session_handler(State(state)).await;
    assert_eq!(session.status, SessionStatus::Unauthenticated);
    assert!(session.user.is_none());
}

#[tokio::test]
async fn session_reports_uninitialized_before_startup_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = app_state(&dir);
    let Json(session) = session_handler(State(state)).await;
    assert_eq!(session.status, SessionStatus::Uninitialized);
}
