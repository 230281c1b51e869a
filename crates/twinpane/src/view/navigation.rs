//! Selection, cycling and the empty-list safeguard.

use super::DiffView;
use crate::event::ViewEvent;
use crate::model::{ContentState, Item, ItemId};
use crate::traits::{ChangedItemProvider, ContentLoader, EditorHost, SidePanel};

/// Result of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The item is now active and loaded.
    Selected(ItemId),
    /// Nothing to do: the target was already shown, or there is only one item.
    Unchanged,
    /// The list is empty; the placeholder is shown instead.
    Placeholder,
    /// No live item matches the request.
    NotFound,
}

impl<H, S, P> DiffView<H, S, P>
where
    H: EditorHost + ContentLoader,
    S: SidePanel,
    P: ChangedItemProvider,
{
    /// The active item, if the list is non-empty.
    pub fn current_item(&self) -> Option<&Item> {
        self.items.get(self.clamped_active())
    }

    /// Move to the next item, wrapping from the last to the first.
    pub fn select_next(&mut self) -> SelectOutcome {
        self.cycle(1)
    }

    /// Move to the previous item, wrapping from the first to the last.
    pub fn select_previous(&mut self) -> SelectOutcome {
        self.cycle(-1)
    }

    /// Select an item by its handle.
    ///
    /// Handles of destroyed items never match. With `focus`, input focus moves
    /// to the right pane after loading.
    pub fn select(&mut self, id: ItemId, focus: bool) -> SelectOutcome {
        self.ensure();
        if self.guard_empty(false) {
            return SelectOutcome::Placeholder;
        }

        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => self.set_active(index, focus, false),
            None => {
                log::debug!("No live item with handle {}", id);
                SelectOutcome::NotFound
            }
        }
    }

    /// Select an item by path.
    pub fn select_path(&mut self, path: &str, focus: bool) -> SelectOutcome {
        self.ensure();
        if self.guard_empty(false) {
            return SelectOutcome::Placeholder;
        }

        match self.items.iter().position(|item| item.path == path) {
            Some(index) => self.set_active(index, focus, false),
            None => {
                log::debug!("No item with path {}", path);
                SelectOutcome::NotFound
            }
        }
    }

    fn cycle(&mut self, step: isize) -> SelectOutcome {
        self.ensure();
        if self.guard_empty(false) {
            return SelectOutcome::Placeholder;
        }

        let len = self.items.len();
        if len < 2 && !self.showing_placeholder {
            return SelectOutcome::Unchanged;
        }

        let current = self.clamped_active() as isize;
        let target = (current + step).rem_euclid(len as isize) as usize;
        self.set_active(target, false, false)
    }

    /// Empty-list safeguard.
    ///
    /// Returns `true` when the list is empty, after making sure the placeholder
    /// is shown. `force` reloads the placeholder even if it is already up.
    pub(super) fn guard_empty(&mut self, force: bool) -> bool {
        if !self.items.is_empty() {
            return false;
        }
        if self.showing_placeholder && !force {
            return true;
        }

        for pane in [self.left_pane, self.right_pane].into_iter().flatten() {
            if self.host.window_is_valid(pane) {
                self.host.load_placeholder(pane);
            }
        }
        self.panel.highlight(None);

        if !self.showing_placeholder {
            log::debug!("No items in {}, showing placeholder", self.comparison);
            self.showing_placeholder = true;
            self.emit(ViewEvent::PlaceholderShown);
        }
        true
    }

    /// Show whatever is active: the active item, or the placeholder.
    pub(super) fn show_active(&mut self, force: bool) {
        if self.guard_empty(force) {
            return;
        }
        let index = self.clamped_active();
        self.set_active(index, false, force);
    }

    /// Make `index` the active item and load it into the panes.
    ///
    /// Re-selecting the item that is already shown in the current panes only
    /// refreshes the highlight, unless `force` is set.
    pub(super) fn set_active(&mut self, index: usize, focus: bool, force: bool) -> SelectOutcome {
        let index = index.min(self.items.len().saturating_sub(1));
        let Some((left, right)) = self.panes() else {
            log::warn!("Cannot select without panes in {}", self.comparison);
            return SelectOutcome::Unchanged;
        };

        let already_shown =
            !self.showing_placeholder && self.items[index].is_shown_in(left, right);
        if already_shown && !force {
            self.active = index;
            self.panel.highlight(Some(&self.items[index]));
            if focus {
                self.host.focus_window(right);
            }
            return SelectOutcome::Unchanged;
        }

        if let Some(previous) = self
            .items
            .iter_mut()
            .find(|item| item.content_state() == ContentState::Attached)
        {
            previous.detach(&mut self.host);
        }
        for pane in [left, right] {
            if self.host.window_is_valid(pane) {
                self.host.clear_diff_mode(pane);
            }
        }

        self.active = index;
        self.items[index].load(&mut self.host, &self.comparison, left, right);
        self.panel.highlight(Some(&self.items[index]));
        self.showing_placeholder = false;

        if focus && !self.host.focus_window(right) {
            log::debug!("Could not focus {}", right);
        }

        let item = &self.items[index];
        let (id, path) = (item.id(), item.path.clone());
        log::debug!("Selected {}", path);
        self.emit(ViewEvent::SelectionChanged { id, path });
        SelectOutcome::Selected(id)
    }
}
