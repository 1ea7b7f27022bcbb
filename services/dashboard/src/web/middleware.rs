//! services/dashboard/src/web/middleware.rs
//!
//! Gate for routes that need a signed-in user.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::web::{session_provider::SessionStatus, state::AppState};

/// Maps the session status to the response a gated route should give.
///
/// While the session is still being restored the answer is 503, never a
/// false 401.
pub fn gate(status: SessionStatus) -> Result<(), StatusCode> {
    match status {
        SessionStatus::Authenticated => Ok(()),
        SessionStatus::Unauthenticated => Err(StatusCode::UNAUTHORIZED),
        SessionStatus::Uninitialized | SessionStatus::Loading => {
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Middleware that lets a request through only when a session is active,
/// inserting the signed-in user into the request extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let status = state.sessions.status().await;
    if let Err(code) = gate(status) {
        debug!("Rejecting {} with {} ({:?})", req.uri().path(), code, status);
        return Err(code);
    }

    // The session may have ended between the two reads.
    let user = state
        .sessions
        .current_user()
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_authenticated_passes() {
        assert_eq!(gate(SessionStatus::Authenticated), Ok(()));
        assert_eq!(gate(SessionStatus::Unauthenticated), Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn pending_session_is_not_reported_as_signed_out() {
        assert_eq!(gate(SessionStatus::Loading), Err(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(
            gate(SessionStatus::Uninitialized),
            Err(StatusCode::SERVICE_UNAVAILABLE)
        );
    }
}
