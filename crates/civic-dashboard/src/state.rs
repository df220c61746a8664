//! Per-page view state.
//!
//! # Design
//! - A page's snapshot is replaced wholesale; there is no partial merge.
//! - Only the orchestrator mutates the container, through one transition per load.

/// Fetched snapshot of a page plus its loading flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState<S> {
    loading: bool,
    loaded: bool,
    data: S,
}

impl<S> ViewState<S> {
    /// Container seeded with `data`, not yet loaded.
    #[must_use]
    pub const fn new(data: S) -> Self {
        Self {
            loading: false,
            loaded: false,
            data,
        }
    }

    /// Whether a load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether at least one load has committed.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current snapshot.
    #[must_use]
    pub const fn data(&self) -> &S {
        &self.data
    }

    pub(crate) const fn begin(&mut self) {
        self.loading = true;
    }

    pub(crate) fn commit(&mut self, data: S) {
        self.data = data;
        self.loading = false;
        self.loaded = true;
    }

    pub(crate) const fn abandon(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_replaces_snapshot_and_clears_loading() {
        let mut state = ViewState::new(vec![1, 2, 3]);
        state.begin();
        assert!(state.is_loading());
        state.commit(vec![9]);
        assert_eq!(state.data(), &vec![9]);
        assert!(!state.is_loading());
        assert!(state.is_loaded());
    }

    #[test]
    fn abandon_keeps_previous_snapshot() {
        let mut state = ViewState::new(vec!["kept"]);
        state.begin();
        state.abandon();
        assert_eq!(state.data(), &vec!["kept"]);
        assert!(!state.is_loading());
        assert!(!state.is_loaded());
    }
}
