//! Headless editor host and side panel.
//!
//! [`MemoryHost`] models tab containers holding ordered windows, what each
//! window displays and its diff-mode flag. [`MemoryPanel`] keeps the rows it
//! was asked to render. Both record enough bookkeeping for tests to assert on,
//! and the terminal adapter draws its screen straight from them.

use crate::model::{
    Comparison, DiffStats, Item, ItemStatus, Placement, Revision, TabpageId, WindowId,
};
use crate::traits::{ContentLoader, EditorHost, SidePanel};
use std::collections::HashMap;

/// What a window displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaneContent {
    #[default]
    Empty,
    Placeholder,
    /// One side of an item: `path` as of `revision`.
    Item { path: String, revision: Revision },
}

impl PaneContent {
    pub fn item(path: impl Into<String>, revision: Revision) -> Self {
        PaneContent::Item {
            path: path.into(),
            revision,
        }
    }
}

/// A content lifecycle call received by the host, by item path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCall {
    Load(String),
    Detach(String),
    Attach(String),
    Destroy(String),
}

#[derive(Debug)]
struct Window {
    tabpage: TabpageId,
    content: PaneContent,
    diff_mode: bool,
    diff_mode_cleared: usize,
}

/// In-memory editor host.
///
/// Creating a tabpage creates its first window, like an editor opening an
/// empty tab. Closing the last window of a tabpage closes the tabpage.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_id: u64,
    tabpages: Vec<(TabpageId, Vec<WindowId>)>,
    windows: HashMap<WindowId, Window>,
    current_tabpage: Option<TabpageId>,
    current_window: Option<WindowId>,
    content_calls: Vec<ContentCall>,
    tabpages_created: usize,
    windows_created: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn windows_of_mut(&mut self, tabpage: TabpageId) -> Option<&mut Vec<WindowId>> {
        self.tabpages
            .iter_mut()
            .find(|(id, _)| *id == tabpage)
            .map(|(_, windows)| windows)
    }

    fn new_window(&mut self, tabpage: TabpageId) -> WindowId {
        let window = WindowId(self.next_id());
        self.windows.insert(
            window,
            Window {
                tabpage,
                content: PaneContent::Empty,
                diff_mode: false,
                diff_mode_cleared: 0,
            },
        );
        self.windows_created += 1;
        window
    }

    /// Move focus to some surviving window after `tabpage` lost its current one.
    fn refocus(&mut self) {
        if self
            .current_window
            .is_some_and(|window| self.windows.contains_key(&window))
        {
            return;
        }
        let tabpage = self
            .current_tabpage
            .filter(|tab| self.tabpage_is_valid(*tab))
            .or_else(|| self.tabpages.last().map(|(id, _)| *id));
        self.current_tabpage = tabpage;
        self.current_window = tabpage.and_then(|tab| self.tabpage_windows(tab).first().copied());
    }

    /// What `window` displays, if it exists.
    pub fn content(&self, window: WindowId) -> Option<&PaneContent> {
        self.windows.get(&window).map(|w| &w.content)
    }

    pub fn diff_mode(&self, window: WindowId) -> bool {
        self.windows.get(&window).is_some_and(|w| w.diff_mode)
    }

    /// How often diff mode was cleared on `window`.
    pub fn diff_mode_cleared(&self, window: WindowId) -> usize {
        self.windows.get(&window).map_or(0, |w| w.diff_mode_cleared)
    }

    /// Turn diff mode on or off, e.g. to simulate a user `:diffthis`.
    pub fn set_diff_mode(&mut self, window: WindowId, on: bool) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.diff_mode = on;
        }
    }

    pub fn content_calls(&self) -> &[ContentCall] {
        &self.content_calls
    }

    pub fn clear_content_calls(&mut self) {
        self.content_calls.clear();
    }

    pub fn load_count(&self) -> usize {
        self.content_calls
            .iter()
            .filter(|call| matches!(call, ContentCall::Load(_)))
            .count()
    }

    pub fn tabpages_created(&self) -> usize {
        self.tabpages_created
    }

    pub fn windows_created(&self) -> usize {
        self.windows_created
    }

    pub fn tabpage_of(&self, window: WindowId) -> Option<TabpageId> {
        self.windows.get(&window).map(|w| w.tabpage)
    }

    /// Live tabpages in creation order.
    pub fn tabpages(&self) -> Vec<TabpageId> {
        self.tabpages.iter().map(|(id, _)| *id).collect()
    }
}

impl EditorHost for MemoryHost {
    fn tabpage_is_valid(&self, tabpage: TabpageId) -> bool {
        self.tabpages.iter().any(|(id, _)| *id == tabpage)
    }

    fn window_is_valid(&self, window: WindowId) -> bool {
        self.windows.contains_key(&window)
    }

    fn current_tabpage(&self) -> Option<TabpageId> {
        self.current_tabpage
    }

    fn current_window(&self) -> Option<WindowId> {
        self.current_window
    }

    fn tabpage_windows(&self, tabpage: TabpageId) -> Vec<WindowId> {
        self.tabpages
            .iter()
            .find(|(id, _)| *id == tabpage)
            .map(|(_, windows)| windows.clone())
            .unwrap_or_default()
    }

    fn create_tabpage(&mut self) -> TabpageId {
        let tabpage = TabpageId(self.next_id());
        let window = self.new_window(tabpage);
        self.tabpages.push((tabpage, vec![window]));
        self.tabpages_created += 1;

        self.current_tabpage = Some(tabpage);
        self.current_window = Some(window);
        tabpage
    }

    fn set_current_tabpage(&mut self, tabpage: TabpageId) -> bool {
        if !self.tabpage_is_valid(tabpage) {
            return false;
        }
        self.current_tabpage = Some(tabpage);
        self.current_window = self.tabpage_windows(tabpage).first().copied();
        true
    }

    fn close_tabpage(&mut self, tabpage: TabpageId) -> bool {
        let Some(position) = self.tabpages.iter().position(|(id, _)| *id == tabpage) else {
            return false;
        };
        let (_, windows) = self.tabpages.remove(position);
        for window in windows {
            self.windows.remove(&window);
        }
        self.refocus();
        true
    }

    fn focus_window(&mut self, window: WindowId) -> bool {
        match self.tabpage_of(window) {
            Some(tabpage) => {
                self.current_tabpage = Some(tabpage);
                self.current_window = Some(window);
                true
            }
            None => false,
        }
    }

    fn split_window(&mut self, anchor: WindowId, placement: Placement) -> Option<WindowId> {
        let tabpage = self.tabpage_of(anchor)?;
        let window = self.new_window(tabpage);

        let windows = self.windows_of_mut(tabpage)?;
        let position = windows.iter().position(|w| *w == anchor)?;
        let at = if placement.is_before() {
            position
        } else {
            position + 1
        };
        windows.insert(at, window);

        self.current_tabpage = Some(tabpage);
        self.current_window = Some(window);
        Some(window)
    }

    fn close_window(&mut self, window: WindowId) -> bool {
        let Some(removed) = self.windows.remove(&window) else {
            return false;
        };

        let now_empty = match self.windows_of_mut(removed.tabpage) {
            Some(windows) => {
                windows.retain(|w| *w != window);
                windows.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.tabpages.retain(|(id, _)| *id != removed.tabpage);
        }

        self.refocus();
        true
    }

    fn load_placeholder(&mut self, window: WindowId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.content = PaneContent::Placeholder;
            w.diff_mode = false;
        }
    }

    fn clear_diff_mode(&mut self, window: WindowId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.diff_mode = false;
            w.diff_mode_cleared += 1;
        }
    }
}

impl ContentLoader for MemoryHost {
    fn load(&mut self, item: &Item, comparison: &Comparison, left: WindowId, right: WindowId) {
        let left_path = item.old_path.as_deref().unwrap_or(&item.path);
        let sides = [
            (left, PaneContent::item(left_path, comparison.left.revision.clone())),
            (right, PaneContent::item(&item.path, comparison.right.revision.clone())),
        ];
        for (window, content) in sides {
            if let Some(w) = self.windows.get_mut(&window) {
                w.content = content;
                w.diff_mode = true;
            }
        }
        self.content_calls.push(ContentCall::Load(item.path.clone()));
    }

    fn detach(&mut self, item: &Item) {
        self.content_calls.push(ContentCall::Detach(item.path.clone()));
    }

    fn attach(&mut self, item: &Item) {
        self.content_calls.push(ContentCall::Attach(item.path.clone()));
    }

    fn destroy(&mut self, item: &Item) {
        self.content_calls.push(ContentCall::Destroy(item.path.clone()));
    }
}

/// One rendered row of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub status: ItemStatus,
    pub path: String,
    pub old_path: Option<String>,
    pub stats: Option<DiffStats>,
}

/// In-memory side panel.
#[derive(Debug)]
pub struct MemoryPanel {
    position: Placement,
    window: Option<WindowId>,
    rows: Vec<PanelRow>,
    highlighted: Option<String>,
    render_count: usize,
    redraw_count: usize,
    open_count: usize,
}

impl Default for MemoryPanel {
    fn default() -> Self {
        Self::new(Placement::Left)
    }
}

impl MemoryPanel {
    /// A panel that opens at `position` relative to the tabpage's windows.
    pub fn new(position: Placement) -> Self {
        Self {
            position,
            window: None,
            rows: Vec::new(),
            highlighted: None,
            render_count: 0,
            redraw_count: 0,
            open_count: 0,
        }
    }

    pub fn position(&self) -> Placement {
        self.position
    }

    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    /// Path of the highlighted row.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        let path = self.highlighted.as_deref()?;
        self.rows.iter().position(|row| row.path == path)
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn redraw_count(&self) -> usize {
        self.redraw_count
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }
}

impl SidePanel for MemoryPanel {
    fn open(&mut self, host: &mut dyn EditorHost, tabpage: TabpageId) {
        if self.window.is_some_and(|w| host.window_is_valid(w)) {
            return;
        }

        let windows = host.tabpage_windows(tabpage);
        let anchor = if self.position.is_before() {
            windows.first()
        } else {
            windows.last()
        };
        let Some(&anchor) = anchor else {
            log::warn!("Cannot open panel: {} has no windows", tabpage);
            return;
        };

        self.window = host.split_window(anchor, self.position);
        self.open_count += 1;
    }

    fn close(&mut self, host: &mut dyn EditorHost) {
        if let Some(window) = self.window.take() {
            if host.window_is_valid(window) {
                host.close_window(window);
            }
        }
    }

    fn window(&self) -> Option<WindowId> {
        self.window
    }

    fn render(&mut self, items: &[Item]) {
        self.rows = items
            .iter()
            .map(|item| PanelRow {
                status: item.status,
                path: item.path.clone(),
                old_path: item.old_path.clone(),
                stats: item.stats,
            })
            .collect();
        self.render_count += 1;
    }

    fn redraw(&mut self) {
        self.redraw_count += 1;
    }

    fn highlight(&mut self, item: Option<&Item>) {
        self.highlighted = item.map(|item| item.path.clone());
    }
}
