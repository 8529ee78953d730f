//! Sign Out Use Case

use std::sync::Arc;

use crate::application::auth_store::AuthStateStore;
use crate::application::config::GuardConfig;
use crate::domain::navigation::Navigator;
use crate::error::GuardResult;

/// Sign out use case
pub struct SignOutUseCase {
    store: Arc<AuthStateStore>,
    config: Arc<GuardConfig>,
}

impl SignOutUseCase {
    pub fn new(store: Arc<AuthStateStore>, config: Arc<GuardConfig>) -> Self {
        Self { store, config }
    }

    /// Clear every tier and return to the entry route. The navigation
    /// happens even if a mirror fails to clear; memory is already empty.
    pub fn execute<N: Navigator>(&self, navigator: &N) -> GuardResult<()> {
        let result = self.store.clear();
        navigator.replace(&self.config.routes.root);

        if result.is_ok() {
            tracing::info!("User signed out");
        }
        result
    }
}
