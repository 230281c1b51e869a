//! Events emitted by the view for the parent application to handle.

use crate::model::{ItemId, LayoutState, Revision};
use crate::view::ReconcileSummary;

/// Events emitted by the view.
///
/// The view performs its own side effects through the collaborator traits;
/// events only tell the orchestrator what happened, e.g. to update a status
/// line or schedule a redraw.
///
/// # Example
///
/// ```ignore
/// for event in view.handle_action(ViewAction::Refresh) {
///     match event {
///         ViewEvent::RefreshFailed(message) => status.error(message),
///         ViewEvent::SelectionChanged { path, .. } => status.info(path),
///         _ => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A different item is now shown in the panes.
    SelectionChanged {
        /// Handle of the newly active item.
        id: ItemId,
        /// Its path.
        path: String,
    },

    /// The list is empty and the placeholder is shown.
    PlaceholderShown,

    /// The item list was reconciled with the provider.
    ItemsReconciled(ReconcileSummary),

    /// The left side follows a reference that moved.
    LeftRevisionMoved {
        from: Revision,
        to: Revision,
    },

    /// The layout was found degraded and rebuilt.
    LayoutRecovered(LayoutState),

    /// The provider could not list the items.
    RefreshFailed(String),
}
