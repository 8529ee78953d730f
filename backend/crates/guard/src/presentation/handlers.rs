//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use kernel::SessionVerdict;

use crate::error::{GuardError, GuardResult};
use crate::presentation::dto::SessionStatusResponse;
use crate::presentation::middleware::{EdgeGuardState, read_session_cookie};

/// GET /api/session
///
/// Reports the session the cookie carries. The token itself is never
/// echoed back.
pub async fn session_status(
    State(state): State<EdgeGuardState>,
    headers: HeaderMap,
) -> GuardResult<Json<SessionStatusResponse>> {
    match read_session_cookie(&headers, state.config.cookie_name()) {
        SessionVerdict::Valid(session) => Ok(Json(SessionStatusResponse::from(&session))),
        SessionVerdict::Invalid(reason) => Err(GuardError::Unauthenticated(reason)),
    }
}
