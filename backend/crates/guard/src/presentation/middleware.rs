//! Edge Request Guard
//!
//! Runs before any page logic. Looks only at the session cookie and sends
//! unauthenticated navigations under the protected prefix back to the
//! root. Anything unreadable counts as unauthenticated.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::{InvalidSession, SessionVerdict, parse_session};
use platform::cookie::{decode_cookie_value, extract_cookie};
use platform::matcher::PathMatcher;

use crate::application::config::GuardConfig;
use crate::error::GuardResult;

/// Middleware state; immutable and shared across requests
#[derive(Clone)]
pub struct EdgeGuardState {
    pub config: Arc<GuardConfig>,
    pub matcher: Arc<PathMatcher>,
}

impl EdgeGuardState {
    pub fn new(config: Arc<GuardConfig>) -> GuardResult<Self> {
        let matcher = config.path_matcher()?;
        Ok(Self {
            config,
            matcher: Arc::new(matcher),
        })
    }
}

/// What to do with one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Pass through unmodified
    Forward,
    Redirect {
        location: String,
        reason: InvalidSession,
    },
}

/// Read and judge the session cookie. The value is URL-decoded before
/// parsing; undecodable values are malformed.
pub fn read_session_cookie(headers: &HeaderMap, name: &str) -> SessionVerdict {
    match extract_cookie(headers, name) {
        None => parse_session(None),
        Some(raw) => match decode_cookie_value(&raw) {
            Some(decoded) => parse_session(Some(&decoded)),
            None => SessionVerdict::Invalid(InvalidSession::Malformed),
        },
    }
}

/// Decide for `path`: excluded and non-protected paths always forward.
pub fn evaluate_request(state: &EdgeGuardState, path: &str, headers: &HeaderMap) -> EdgeDecision {
    if state.matcher.is_excluded(path) || !state.config.routes.is_protected(path) {
        return EdgeDecision::Forward;
    }

    match read_session_cookie(headers, state.config.cookie_name()) {
        SessionVerdict::Valid(_) => EdgeDecision::Forward,
        SessionVerdict::Invalid(reason) => EdgeDecision::Redirect {
            location: state.config.routes.root.clone(),
            reason,
        },
    }
}

/// Middleware gating the protected prefix
pub async fn edge_guard(
    State(state): State<EdgeGuardState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    match evaluate_request(&state, &path, req.headers()) {
        EdgeDecision::Forward => next.run(req).await,
        EdgeDecision::Redirect { location, reason } => {
            tracing::debug!(path = %path, reason = %reason, "Redirecting unauthenticated request");
            Redirect::temporary(&location).into_response()
        }
    }
}
