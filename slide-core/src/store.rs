//! The page store: sole owner of the page state.
//!
//! [`PageStore`] is constructed explicitly and handed (by `&mut`) to whatever
//! needs to change the page. Readers take [`Arc`] snapshots that never change
//! underneath them; every dispatch swaps in a new snapshot.

use std::sync::Arc;

use crate::state::reduce;
use crate::{Action, Clock, Element, IdGenerator, PageState};

/// Single-writer store over [`PageState`].
///
/// # Example
///
/// ```
/// use slide_core::{Action, Mode, PageStore, TextDraft};
///
/// let mut store = PageStore::new();
/// store.dispatch(Action::AddText(TextDraft {
///     x: 100.0,
///     y: 100.0,
///     font_size: 20.0,
///     width: 200.0,
///     line_height: 1.4,
///     text: "hello".to_string(),
///     is_bold: false,
/// }));
///
/// let element = store.state().elements().next().unwrap();
/// store.dispatch(Action::select(&element));
/// assert_eq!(store.state().mode, Mode::Preview);
/// ```
#[derive(Debug)]
pub struct PageStore {
    state: Arc<PageState>,
    ids: IdGenerator,
    revision: u64,
}

impl PageStore {
    /// Create a store with an empty page and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(IdGenerator::new())
    }

    /// Create a store whose ids come from the given clock.
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::with_ids(IdGenerator::with_clock(clock))
    }

    /// Create a store around an existing id generator.
    #[must_use]
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            state: Arc::new(PageState::new()),
            ids,
            revision: 0,
        }
    }

    /// Apply an action and return the resulting state.
    ///
    /// Actions are processed one at a time to completion.
    pub fn dispatch(&mut self, action: Action) -> &PageState {
        tracing::trace!(action = action.name(), revision = self.revision, "dispatch");
        let next = reduce(&self.state, action, &mut self.ids);
        if next != *self.state {
            self.state = Arc::new(next);
            self.revision += 1;
        }
        &self.state
    }

    /// Borrow the current state.
    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Take a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PageState> {
        Arc::clone(&self.state)
    }

    /// Number of dispatches that changed the state.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The selected element with its current values.
    #[must_use]
    pub fn selected_element(&self) -> Option<Element> {
        self.state.selected_element()
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageDraft, Mode};

    fn image() -> ImageDraft {
        ImageDraft {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 100.0,
            src: "lion.png".to_string(),
        }
    }

    #[test]
    fn snapshots_are_not_affected_by_later_dispatches() {
        let mut store = PageStore::new();
        let before = store.snapshot();
        store.dispatch(Action::AddImage(image()));
        assert!(before.is_empty());
        assert_eq!(store.state().images.len(), 1);
    }

    #[test]
    fn revision_counts_only_effective_dispatches() {
        let mut store = PageStore::new();
        store.dispatch(Action::ReleaseSelected);
        assert_eq!(store.revision(), 0);

        store.dispatch(Action::AddImage(image()));
        assert_eq!(store.revision(), 1);

        let element = store.state().elements().next().expect("image");
        store.dispatch(Action::start_transforming(&element));
        store.dispatch(Action::start_transforming(&element));
        assert_eq!(store.revision(), 2);
        assert_eq!(store.state().mode, Mode::Transforming);
    }
}
