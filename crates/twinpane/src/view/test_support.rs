//! Fixtures shared by the view tests.

use super::{DiffView, ViewOptions};
use crate::model::{
    Comparison, ContentState, DiffStats, Endpoint, Item, ItemStatus, Revision,
};
use crate::traits::{ChangedItemProvider, ProviderError};
use std::cell::Cell;
use std::path::Path;

pub(crate) use crate::memory::{ContentCall, MemoryHost, MemoryPanel, PaneContent};

pub(crate) type TestView = DiffView<MemoryHost, MemoryPanel, StaticProvider>;

pub(crate) const HEAD_OID: &str = "c0ffee0000000000000000000000000000000000";

/// Provider returning a configurable listing.
#[derive(Debug, Default)]
pub(crate) struct StaticProvider {
    entries: Vec<(String, ItemStatus, DiffStats)>,
    head: String,
    failure: Option<String>,
    list_calls: Cell<usize>,
}

impl StaticProvider {
    pub(crate) fn new(paths: &[&str]) -> Self {
        let mut provider = Self {
            head: HEAD_OID.to_string(),
            ..Self::default()
        };
        provider.set_paths(paths);
        provider
    }

    pub(crate) fn set_paths(&mut self, paths: &[&str]) {
        self.entries = paths
            .iter()
            .map(|path| (path.to_string(), ItemStatus::Modified, DiffStats::new(1, 1)))
            .collect();
    }

    pub(crate) fn set_entries(&mut self, entries: &[(&str, ItemStatus, DiffStats)]) {
        self.entries = entries
            .iter()
            .map(|(path, status, stats)| (path.to_string(), *status, *stats))
            .collect();
    }

    pub(crate) fn set_head(&mut self, oid: &str) {
        self.head = oid.to_string();
    }

    pub(crate) fn fail_with(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.get()
    }
}

impl ChangedItemProvider for StaticProvider {
    fn list(&self, _comparison: &Comparison) -> Result<Vec<Item>, ProviderError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(message) = &self.failure {
            return Err(ProviderError::Unavailable(message.clone()));
        }
        Ok(self
            .entries
            .iter()
            .map(|(path, status, stats)| Item::new(path.as_str(), *status).with_stats(*stats))
            .collect())
    }

    fn resolve_reference(&self, _root: &Path, _reference: &str) -> Result<String, ProviderError> {
        Ok(self.head.clone())
    }
}

pub(crate) fn left_revision() -> Revision {
    Revision::Commit(HEAD_OID.to_string())
}

/// `HEAD` tracked against the working tree.
pub(crate) fn comparison() -> Comparison {
    Comparison::new(
        "/repo",
        Endpoint::tracking("HEAD", HEAD_OID),
        Endpoint::working_tree(),
    )
}

pub(crate) fn new_view(paths: &[&str]) -> TestView {
    DiffView::new(
        comparison(),
        MemoryHost::new(),
        MemoryPanel::default(),
        StaticProvider::new(paths),
        ViewOptions::default(),
    )
}

pub(crate) fn open_view(paths: &[&str]) -> TestView {
    let mut view = new_view(paths);
    view.open();
    view
}

pub(crate) fn active_path(view: &TestView) -> String {
    view.current_item()
        .map(|item| item.path.clone())
        .unwrap_or_default()
}

pub(crate) fn paths(view: &TestView) -> Vec<String> {
    view.items().iter().map(|item| item.path.clone()).collect()
}

/// Exactly one item is attached and it is the active one.
pub(crate) fn assert_single_attached(view: &TestView) {
    let attached: Vec<usize> = view
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.content_state() == ContentState::Attached)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(attached, vec![view.active_index().unwrap()]);
}
