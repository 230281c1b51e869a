//! Traits for the host editor surface.

use crate::model::{Comparison, Item, Placement, TabpageId, WindowId};

/// Container and window operations of the host editor.
///
/// Commands that can fail as a matter of course (focus switches, closing)
/// report success as a `bool`. The view treats these as best-effort and
/// proceeds regardless of the result.
///
/// # Example
///
/// ```ignore
/// struct NvimHost { client: Neovim }
///
/// impl EditorHost for NvimHost {
///     fn window_is_valid(&self, window: WindowId) -> bool {
///         self.client.call("nvim_win_is_valid", (window.0,)).unwrap_or(false)
///     }
///     // ...
/// }
/// ```
pub trait EditorHost {
    /// Whether the tab container still exists.
    fn tabpage_is_valid(&self, tabpage: TabpageId) -> bool;

    /// Whether the window still exists.
    fn window_is_valid(&self, window: WindowId) -> bool;

    /// The focused tab container, if any.
    fn current_tabpage(&self) -> Option<TabpageId>;

    /// The focused window, if any.
    fn current_window(&self) -> Option<WindowId>;

    /// Windows of a tab container in layout order.
    fn tabpage_windows(&self, tabpage: TabpageId) -> Vec<WindowId>;

    /// Create and focus a new tab container holding a single window.
    fn create_tabpage(&mut self) -> TabpageId;

    /// Focus a tab container.
    fn set_current_tabpage(&mut self, tabpage: TabpageId) -> bool;

    /// Close a tab container and every window in it.
    fn close_tabpage(&mut self, tabpage: TabpageId) -> bool;

    /// Focus a window (and its tab container).
    fn focus_window(&mut self, window: WindowId) -> bool;

    /// Split `anchor`, returning the new window. The new window gets focus.
    fn split_window(&mut self, anchor: WindowId, placement: Placement) -> Option<WindowId>;

    /// Close a single window.
    fn close_window(&mut self, window: WindowId) -> bool;

    /// Show the synthetic "no items" content in a window.
    fn load_placeholder(&mut self, window: WindowId);

    /// Strip diff-mode decorations and scroll binding from a window.
    fn clear_diff_mode(&mut self, window: WindowId);
}

/// Mechanics of moving an item's content in and out of the panes.
///
/// The [`Item`] keeps the lifecycle bookkeeping; implementors only perform
/// the side effects.
pub trait ContentLoader {
    /// Show both sides of `item` in the left and right panes.
    ///
    /// The comparison supplies the repository root and the revisions each
    /// side is read from.
    fn load(&mut self, item: &Item, comparison: &Comparison, left: WindowId, right: WindowId);

    /// Release the panes, keeping the loaded content for reuse.
    fn detach(&mut self, item: &Item);

    /// Restore editing affordances (e.g. live-update tracking) on the panes.
    fn attach(&mut self, item: &Item);

    /// Drop all loaded content. Called at most once per item.
    fn destroy(&mut self, item: &Item);
}
