//! Guard - Authentication gate of the hospital console
//!
//! Clean Architecture structure:
//! - `domain/` - Navigation and notice seams, render decisions
//! - `application/` - Config, auth state store, client render guard,
//!   sign-in / sign-out flows
//! - `presentation/` - Edge request guard middleware, session status
//!   handler, router
//!
//! ## Enforcement points
//! - The edge guard reads only the `authentications` cookie and redirects
//!   unauthenticated navigations under the protected prefix to the root.
//! - The client render guard reads the [`AuthStateStore`] and withholds
//!   protected content (or leaves the login screen) after hydration.
//!
//! Both go through [`kernel::parse_session`], so they can never disagree
//! about what malformed session data means.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;


// Re-exports for convenience
pub use application::auth_store::{AuthStateStore, AuthStateStoreBuilder};
pub use application::config::GuardConfig;
pub use application::render_guard::ClientRenderGuard;
pub use application::{SignInUseCase, SignOutUseCase};
pub use domain::navigation::{
    HistoryNavigator, LogNotifier, Navigator, Notice, Notifier, RecordingNotifier, RenderDecision,
};
pub use error::{GuardError, GuardResult};
pub use presentation::middleware::{EdgeDecision, EdgeGuardState, edge_guard, evaluate_request};
pub use presentation::router::{session_router, with_edge_guard};

// Re-export kernel types used in this crate's public API
pub use kernel::{AuthSession, InvalidSession, RouteScope, SessionVerdict, parse_session};
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
