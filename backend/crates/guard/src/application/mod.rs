//! Application Layer
//!
//! Configuration, the client-side state and guard, and the flows that
//! mutate the session.

pub mod auth_store;
pub mod config;
pub mod render_guard;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use auth_store::AuthStateStore;
pub use config::GuardConfig;
pub use render_guard::ClientRenderGuard;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
