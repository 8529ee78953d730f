//! Navigation and notices
//!
//! What the client render guard needs from its host UI: a way to replace
//! the current location and a way to show a transient notice.

use std::sync::{Mutex, PoisonError};

/// What the guarded subtree shows for the current render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDecision {
    /// Render the children unmodified
    Render,
    /// Render the loading placeholder; a redirect is under way
    Loading,
}

impl RenderDecision {
    pub fn renders_children(&self) -> bool {
        matches!(self, RenderDecision::Render)
    }
}

/// Client-side router handle.
pub trait Navigator: Send + Sync {
    /// Current location path
    fn current(&self) -> String;

    /// Replace the current location. Returns `false` when already there,
    /// in which case nothing happens.
    fn replace(&self, to: &str) -> bool;
}

/// A transient, user-visible error message (toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(message = %notice.message, "Notice");
    }
}

/// In-memory history stack.
///
/// `replace` overwrites the top entry and is ignored when the target is
/// already the current location, so a guard evaluated on every render
/// navigates at most once per change.
#[derive(Debug)]
pub struct HistoryNavigator {
    state: Mutex<HistoryState>,
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    /// Every replace that actually moved the location
    redirects: Vec<String>,
}

impl HistoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![initial.into()],
                redirects: Vec::new(),
            }),
        }
    }

    /// User-initiated navigation (link click)
    pub fn push(&self, to: impl Into<String>) {
        self.lock().entries.push(to.into());
    }

    pub fn redirects(&self) -> Vec<String> {
        self.lock().redirects.clone()
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn current(&self) -> String {
        self.lock().entries.last().cloned().unwrap_or_default()
    }

    fn replace(&self, to: &str) -> bool {
        let mut state = self.lock();
        if state.entries.last().is_some_and(|current| current == to) {
            return false;
        }
        match state.entries.last_mut() {
            Some(current) => *current = to.to_string(),
            None => state.entries.push(to.to_string()),
        }
        state.redirects.push(to.to_string());
        true
    }
}

/// Collects notices instead of showing them
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
