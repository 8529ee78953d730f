//! Domain Layer
//!
//! The seams the client tier is built against. The session model itself
//! lives in `kernel` because the edge tier shares it.

pub mod navigation;

// Re-exports
pub use navigation::{
    HistoryNavigator, LogNotifier, Navigator, Notice, Notifier, RecordingNotifier, RenderDecision,
};
