//! services/dashboard/src/web/rest.rs
//!
//! Contains the master definition for the OpenAPI specification and assembles
//! the dashboard router.

use crate::adapters::UiEffect;
use crate::web::{
    auth::{
        login_handler, logout_handler, session_handler, AuthResponse, LoginRequest,
        SessionResponse, SessionUser,
    },
    middleware::require_auth,
    session_provider::SessionStatus,
    state::AppState,
    ws_handler::analyzer_ws_handler,
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        crate::web::auth::session_handler,
    ),
    components(
        schemas(LoginRequest, AuthResponse, SessionResponse, SessionUser, SessionStatus, UiEffect)
    ),
    tags(
        (name = "LegalVision Dashboard API", description = "Demo sign-in and the document analyzer.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the complete application: public auth routes, the gated analyzer
/// socket, and the Swagger UI.
pub fn app_router(app_state: Arc<AppState>, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/session", get(session_handler));

    // Gated routes (session required)
    let protected_routes = Router::new()
        .route("/analyzer/ws", get(analyzer_ws_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
