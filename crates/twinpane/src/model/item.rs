//! Changed items and their content lifecycle.

use crate::model::{Comparison, WindowId};
use crate::traits::ContentLoader;
use std::fmt;
use uuid::Uuid;

/// Opaque handle identifying one `Item` instance.
///
/// Unlike the path, the handle is never shared between two instances: an
/// item rebuilt by the provider for the same path gets a fresh handle, so a
/// stale handle to a destroyed item can never match a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Change status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Unmerged,
    Untracked,
    Unknown,
}

impl ItemStatus {
    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            ItemStatus::Added => 'A',
            ItemStatus::Modified => 'M',
            ItemStatus::Deleted => 'D',
            ItemStatus::Renamed => 'R',
            ItemStatus::Copied => 'C',
            ItemStatus::TypeChanged => 'T',
            ItemStatus::Unmerged => 'U',
            ItemStatus::Untracked => '?',
            ItemStatus::Unknown => 'X',
        }
    }

    /// Parse the status letter git prints in `--name-status` output.
    pub fn from_git_letter(letter: char) -> Self {
        match letter {
            'A' => ItemStatus::Added,
            'M' => ItemStatus::Modified,
            'D' => ItemStatus::Deleted,
            'R' => ItemStatus::Renamed,
            'C' => ItemStatus::Copied,
            'T' => ItemStatus::TypeChanged,
            'U' => ItemStatus::Unmerged,
            '?' => ItemStatus::Untracked,
            _ => ItemStatus::Unknown,
        }
    }
}

/// Line statistics of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
}

impl DiffStats {
    pub fn new(additions: usize, deletions: usize) -> Self {
        Self {
            additions,
            deletions,
        }
    }
}

/// Where an item's content currently lives.
///
/// There is no `Destroyed` variant: [`Item::destroy`] consumes the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentState {
    /// Nothing loaded yet.
    #[default]
    Unloaded,
    /// Loaded and shown in the panes.
    Attached,
    /// Loaded but released from its panes; can be reused.
    Detached,
}

/// One changed entry of the comparison.
///
/// Deliberately not `Clone`: a copy would share the instance handle.
#[derive(Debug)]
pub struct Item {
    id: ItemId,
    /// Path relative to the repository root. Identity within the list.
    pub path: String,
    /// Previous path (if renamed or copied).
    pub old_path: Option<String>,
    pub status: ItemStatus,
    pub stats: Option<DiffStats>,
    content: ContentState,
    panes: Option<(WindowId, WindowId)>,
}

impl Item {
    /// Create a new, unloaded item.
    pub fn new(path: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            id: ItemId::new(),
            path: path.into(),
            old_path: None,
            status,
            stats: None,
            content: ContentState::Unloaded,
            panes: None,
        }
    }

    pub fn with_stats(mut self, stats: DiffStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_old_path(mut self, old_path: impl Into<String>) -> Self {
        self.old_path = Some(old_path.into());
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn content_state(&self) -> ContentState {
        self.content
    }

    /// Whether the item is loaded and attached to exactly these panes.
    pub fn is_shown_in(&self, left: WindowId, right: WindowId) -> bool {
        self.content == ContentState::Attached && self.panes == Some((left, right))
    }

    /// Two items are the same entity iff their paths are equal.
    pub fn same_entity(&self, other: &Item) -> bool {
        self.path == other.path
    }

    /// Copy the mutable metadata of `other` onto this item, keeping identity
    /// and content state.
    pub fn update_from(&mut self, other: &Item) {
        self.status = other.status;
        self.stats = other.stats;
        self.old_path = other.old_path.clone();
    }

    /// Load the content into the given panes and attach it.
    pub fn load<L: ContentLoader + ?Sized>(
        &mut self,
        loader: &mut L,
        comparison: &Comparison,
        left: WindowId,
        right: WindowId,
    ) {
        loader.load(self, comparison, left, right);
        self.content = ContentState::Attached;
        self.panes = Some((left, right));
    }

    /// Release the panes without dropping the content. Safe to repeat.
    pub fn detach<L: ContentLoader + ?Sized>(&mut self, loader: &mut L) {
        if self.content == ContentState::Attached {
            loader.detach(self);
            self.content = ContentState::Detached;
        }
    }

    /// Re-attach previously detached content. Safe to repeat.
    pub fn attach<L: ContentLoader + ?Sized>(&mut self, loader: &mut L) {
        if self.content == ContentState::Detached {
            loader.attach(self);
            self.content = ContentState::Attached;
        }
    }

    /// Release everything the item holds. Terminal.
    pub fn destroy<L: ContentLoader + ?Sized>(self, loader: &mut L) {
        if self.content != ContentState::Unloaded {
            loader.destroy(&self);
        }
        log::trace!("destroyed item {} ({})", self.path, self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Endpoint;

    fn comparison() -> Comparison {
        Comparison::new("/repo", Endpoint::commit("abc"), Endpoint::working_tree())
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl ContentLoader for Recorder {
        fn load(&mut self, item: &Item, _cmp: &Comparison, left: WindowId, right: WindowId) {
            self.calls
                .push(format!("load {} {} {}", item.path, left.0, right.0));
        }

        fn detach(&mut self, item: &Item) {
            self.calls.push(format!("detach {}", item.path));
        }

        fn attach(&mut self, item: &Item) {
            self.calls.push(format!("attach {}", item.path));
        }

        fn destroy(&mut self, item: &Item) {
            self.calls.push(format!("destroy {}", item.path));
        }
    }

    #[test]
    fn test_identity_is_per_instance() {
        let a = Item::new("src/lib.rs", ItemStatus::Modified);
        let b = Item::new("src/lib.rs", ItemStatus::Added);
        assert!(a.same_entity(&b));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_update_from_keeps_identity_and_content() {
        let mut loader = Recorder::default();
        let mut a = Item::new("a.rs", ItemStatus::Modified);
        a.load(&mut loader, &comparison(), WindowId(1), WindowId(2));
        let id = a.id();

        let fresh = Item::new("a.rs", ItemStatus::Added).with_stats(DiffStats::new(3, 1));
        a.update_from(&fresh);

        assert_eq!(a.id(), id);
        assert_eq!(a.status, ItemStatus::Added);
        assert_eq!(a.stats, Some(DiffStats::new(3, 1)));
        assert_eq!(a.content_state(), ContentState::Attached);
    }

    #[test]
    fn test_lifecycle() {
        let mut loader = Recorder::default();
        let mut item = Item::new("a.rs", ItemStatus::Modified);

        // Detach/attach on unloaded content does nothing
        item.detach(&mut loader);
        item.attach(&mut loader);
        assert!(loader.calls.is_empty());

        item.load(&mut loader, &comparison(), WindowId(1), WindowId(2));
        assert!(item.is_shown_in(WindowId(1), WindowId(2)));

        item.detach(&mut loader);
        item.detach(&mut loader);
        assert_eq!(item.content_state(), ContentState::Detached);
        assert!(!item.is_shown_in(WindowId(1), WindowId(2)));

        item.attach(&mut loader);
        item.attach(&mut loader);
        assert_eq!(item.content_state(), ContentState::Attached);

        item.destroy(&mut loader);
        assert_eq!(
            loader.calls,
            vec!["load a.rs 1 2", "detach a.rs", "attach a.rs", "destroy a.rs"]
        );
    }

    #[test]
    fn test_destroy_unloaded_skips_loader() {
        let mut loader = Recorder::default();
        Item::new("a.rs", ItemStatus::Added).destroy(&mut loader);
        assert!(loader.calls.is_empty());
    }

    #[test]
    fn test_status_letters() {
        assert_eq!(ItemStatus::from_git_letter('M'), ItemStatus::Modified);
        assert_eq!(ItemStatus::from_git_letter('R'), ItemStatus::Renamed);
        assert_eq!(ItemStatus::from_git_letter('Z'), ItemStatus::Unknown);
        assert_eq!(ItemStatus::Deleted.as_char(), 'D');
    }
}
