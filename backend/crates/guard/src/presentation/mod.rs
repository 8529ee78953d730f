//! Presentation Layer
//!
//! Edge request guard, session status handler, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use middleware::{EdgeDecision, EdgeGuardState, edge_guard, evaluate_request};
pub use router::{session_router, with_edge_guard};
