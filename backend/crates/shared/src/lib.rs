//! Shared Kernel - Vocabulary shared by both guard tiers
//!
//! This crate contains the pieces whose meaning must never differ between
//! the edge tier and the client tier:
//! - The session model and its single parser ([`session::parse_session`])
//! - The route scope (public root, protected prefix, landing path)
//! - Common error types and result aliases

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod route;
pub mod session;

pub use route::RouteScope;
pub use session::{AuthSession, InvalidSession, SessionVerdict, parse_session};
