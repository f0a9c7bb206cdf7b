use serde::Serialize;

use crate::models::ViewId;

/// Current view plus the views that were current before it, oldest first.
///
/// `go_back` only ever undoes one step: it pops the most recent entry and does
/// not keep a forward stack, so two backs in a row do not retrace the path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationStack {
    current: ViewId,
    history: Vec<ViewId>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStack {
    /// Starts on the landing view with the landing view as the single root entry.
    pub fn new() -> Self {
        Self {
            current: ViewId::landing(),
            history: vec![ViewId::landing()],
        }
    }

    pub fn current(&self) -> &ViewId {
        &self.current
    }

    pub fn history(&self) -> &[ViewId] {
        &self.history
    }

    pub fn navigate(&mut self, target: impl Into<ViewId>) -> &ViewId {
        let previous = std::mem::replace(&mut self.current, target.into());
        self.history.push(previous);
        &self.current
    }

    pub fn go_back(&mut self) -> &ViewId {
        self.current = self.history.pop().unwrap_or_else(ViewId::landing);
        &self.current
    }

    /// Back to the state of a fresh page: landing, with only the root entry.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
