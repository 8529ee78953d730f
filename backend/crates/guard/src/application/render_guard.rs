//! Client Render Guard
//!
//! Wraps the rendered tree. Covers the window after hydration in which the
//! edge guard's cookie snapshot may be stale relative to the store, and
//! moves signed-in users off the login screen.

use std::sync::Arc;

use kernel::AuthSession;

use crate::application::auth_store::AuthStateStore;
use crate::application::config::GuardConfig;
use crate::domain::navigation::{LogNotifier, Navigator, Notice, Notifier, RenderDecision};

/// Stateless check of (path, session), run on every render.
///
/// - Protected path without a valid session: notice, replace to root,
///   render the placeholder.
/// - Root with a valid session: replace to the landing path, render the
///   placeholder.
/// - Anything else renders the children.
pub struct ClientRenderGuard<N, T>
where
    N: Navigator,
    T: Notifier,
{
    config: Arc<GuardConfig>,
    navigator: N,
    notifier: T,
}

impl<N: Navigator> ClientRenderGuard<N, LogNotifier> {
    /// Guard whose notices only go to the log
    pub fn logging(config: Arc<GuardConfig>, navigator: N) -> Self {
        Self::new(config, navigator, LogNotifier)
    }
}

impl<N, T> ClientRenderGuard<N, T>
where
    N: Navigator,
    T: Notifier,
{
    pub fn new(config: Arc<GuardConfig>, navigator: N, notifier: T) -> Self {
        Self {
            config,
            navigator,
            notifier,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn notifier(&self) -> &T {
        &self.notifier
    }

    /// Decide what to render for `path` given `session`.
    ///
    /// The notice is only shown when the navigator actually moved, so
    /// re-rendering with unchanged inputs stays quiet.
    pub fn evaluate(&self, path: &str, session: Option<&AuthSession>) -> RenderDecision {
        let routes = &self.config.routes;
        let authenticated = session.is_some_and(AuthSession::is_valid);

        if routes.is_protected(path) && !authenticated {
            if self.navigator.replace(&routes.root) {
                tracing::info!(path = %path, to = %routes.root, "Protected page without session");
                self.notifier.notify(Notice::error(self.config.login_notice.clone()));
            }
            return RenderDecision::Loading;
        }

        if routes.is_root(path) && authenticated {
            if self.navigator.replace(&routes.landing) {
                tracing::debug!(to = %routes.landing, "Signed-in user on entry route");
            }
            return RenderDecision::Loading;
        }

        RenderDecision::Render
    }

    /// [`evaluate`](Self::evaluate) against the navigator's location and
    /// the store's current session.
    pub fn check(&self, store: &AuthStateStore) -> RenderDecision {
        let path = self.navigator.current();
        self.evaluate(&path, store.get().as_ref())
    }
}
