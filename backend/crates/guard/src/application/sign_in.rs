//! Sign In Use Case
//!
//! Completes a login: the hospital API has already accepted the
//! credentials and answered with the session JSON.

use std::sync::Arc;

use kernel::{AuthSession, SessionVerdict, parse_session};

use crate::application::auth_store::AuthStateStore;
use crate::application::config::GuardConfig;
use crate::domain::navigation::Navigator;
use crate::error::{GuardError, GuardResult};

/// Sign in use case
pub struct SignInUseCase {
    store: Arc<AuthStateStore>,
    config: Arc<GuardConfig>,
}

impl SignInUseCase {
    pub fn new(store: Arc<AuthStateStore>, config: Arc<GuardConfig>) -> Self {
        Self { store, config }
    }

    /// Validate the login response, persist it and move to the landing
    /// path. A response without a usable token persists nothing.
    pub fn execute<N: Navigator>(
        &self,
        response_body: &str,
        navigator: &N,
    ) -> GuardResult<AuthSession> {
        let session = match parse_session(Some(response_body)) {
            SessionVerdict::Valid(session) => session,
            SessionVerdict::Invalid(reason) => {
                tracing::warn!(reason = %reason, "Login response carried no usable session");
                return Err(GuardError::Unauthenticated(reason));
            }
        };

        self.store.set(session.clone())?;
        navigator.replace(&self.config.routes.landing);

        let user = session.display_name();
        tracing::info!(user = user.as_deref().unwrap_or("unknown"), "User signed in");
        Ok(session)
    }
}
