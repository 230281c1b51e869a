//! View Actions
//!
//! Tagged actions the view can process. The orchestrating application maps
//! host events (key presses, tab switches, buffer writes) to these actions
//! and dispatches them with [`DiffView::handle_action`](crate::DiffView::handle_action).

use crate::model::{ItemId, WindowId};

/// Actions that can be performed on the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    // === Navigation ===
    /// Move to the next item, wrapping at the end
    SelectNext,
    /// Move to the previous item, wrapping at the start
    SelectPrevious,
    /// Select an item by handle
    Select { id: ItemId, focus: bool },
    /// Select an item by path
    SelectPath { path: String, focus: bool },

    // === Refresh & Layout ===
    /// Reconcile the item list with the provider
    Refresh,
    /// Validate the layout and rebuild what is missing
    EnsureLayout,

    // === Host Events ===
    /// The view's tab container was entered
    Enter,
    /// The view's tab container was left
    Leave,
    /// Content was written to disk somewhere in the editor
    ContentSaved,
    /// A window inside the view's tab container was entered
    WindowEntered(WindowId),
}

impl ViewAction {
    /// Whether this action originates from the host rather than the user.
    pub fn is_host_event(&self) -> bool {
        matches!(
            self,
            ViewAction::Enter
                | ViewAction::Leave
                | ViewAction::ContentSaved
                | ViewAction::WindowEntered(_)
        )
    }
}
