//! Trait for the panel listing all items.

use crate::model::{Item, TabpageId, WindowId};
use crate::traits::EditorHost;

/// The auxiliary panel listing the items and marking the active one.
///
/// The panel owns a window of its own, so opening and closing go through the
/// host. All operations are synchronous and have no result beyond completion.
pub trait SidePanel {
    /// Open the panel inside `tabpage`. Opening an open panel is a no-op.
    fn open(&mut self, host: &mut dyn EditorHost, tabpage: TabpageId);

    /// Close the panel if it is open.
    fn close(&mut self, host: &mut dyn EditorHost);

    /// The panel's window while open.
    fn window(&self) -> Option<WindowId>;

    /// Rebuild the rows from the item list.
    fn render(&mut self, items: &[Item]);

    /// Push the rendered rows to the screen.
    fn redraw(&mut self);

    /// Mark `item` as the active entry (`None` clears the mark).
    fn highlight(&mut self, item: Option<&Item>);
}
