//! The comparison view controller.
//!
//! A [`DiffView`] owns the item list, the active index and the two content
//! panes of one comparison. It is split over a few files:
//!
//! - `reconcile`: applying a fresh provider listing to the list
//! - `navigation`: selection and the empty-list safeguard
//! - `layout`: validating and rebuilding the window layout
//! - `handlers`: host event handlers

mod handlers;
mod layout;
mod navigation;
mod reconcile;

#[cfg(test)]
mod test_support;

pub use navigation::SelectOutcome;
pub use reconcile::{ReconcileOutcome, ReconcileSummary};

use crate::action::ViewAction;
use crate::event::ViewEvent;
use crate::model::{Comparison, Item, LayoutAxis, TabpageId, WindowId};
use crate::traits::{ChangedItemProvider, ContentLoader, EditorHost, ProviderError, SidePanel};

/// Behaviour switches of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// How the two panes are arranged.
    pub axis: LayoutAxis,
    /// Refresh the list when content is saved (working-tree comparisons only).
    pub refresh_on_save: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            axis: LayoutAxis::Vertical,
            refresh_on_save: true,
        }
    }
}

/// Controller for one two-pane comparison.
///
/// One instance per comparison; instances share nothing. All methods run to
/// completion synchronously. Operations that would act on half-built state
/// (during [`DiffView::open`] or a layout recovery) are suppressed by the
/// ready gate.
pub struct DiffView<H, S, P>
where
    H: EditorHost + ContentLoader,
    S: SidePanel,
    P: ChangedItemProvider,
{
    comparison: Comparison,
    host: H,
    panel: S,
    provider: P,
    options: ViewOptions,

    tabpage: Option<TabpageId>,
    left_pane: Option<WindowId>,
    right_pane: Option<WindowId>,

    /// Display order.
    items: Vec<Item>,
    /// 0-based; meaningful only while `items` is non-empty.
    active: usize,
    showing_placeholder: bool,
    ready: bool,
    update_needed: bool,

    events: Vec<ViewEvent>,
}

impl<H, S, P> DiffView<H, S, P>
where
    H: EditorHost + ContentLoader,
    S: SidePanel,
    P: ChangedItemProvider,
{
    /// Create a view. Nothing is shown until [`DiffView::open`].
    pub fn new(
        comparison: Comparison,
        host: H,
        panel: S,
        provider: P,
        options: ViewOptions,
    ) -> Self {
        Self {
            comparison,
            host,
            panel,
            provider,
            options,
            tabpage: None,
            left_pane: None,
            right_pane: None,
            items: Vec::new(),
            active: 0,
            showing_placeholder: false,
            ready: false,
            update_needed: false,
            events: Vec::new(),
        }
    }

    /// Build the layout, fetch the initial list and show the first item.
    ///
    /// The view becomes ready only once all of this is done.
    pub fn open(&mut self) {
        if self.tabpage.is_some() {
            log::debug!("view {} is already open", self.comparison);
            return;
        }

        log::info!("Opening view {}", self.comparison);
        self.ready = false;

        let tabpage = self.host.create_tabpage();
        self.tabpage = Some(tabpage);
        self.build_panes(tabpage);

        match self.provider.list(&self.comparison) {
            Ok(items) => self.items = items,
            Err(err) => self.report_refresh_failure(err),
        }
        self.render_panel();

        self.active = 0;
        self.show_active(true);
        self.ready = true;
    }

    /// Tear the view down.
    ///
    /// Best-effort: failing to focus the tab container does not stop it from
    /// being closed. Every item is destroyed exactly once. The collaborators
    /// are handed back to the caller.
    pub fn close(mut self) -> (H, S, P) {
        self.ready = false;
        self.panel.close(&mut self.host);

        for item in self.items.drain(..) {
            item.destroy(&mut self.host);
        }

        if let Some(tabpage) = self.tabpage.take() {
            if self.host.tabpage_is_valid(tabpage) {
                if !self.host.set_current_tabpage(tabpage) {
                    log::debug!("Could not focus {} before closing it", tabpage);
                }
                if !self.host.close_tabpage(tabpage) {
                    log::warn!("Failed to close {}", tabpage);
                }
            }
        }

        log::info!("Closed view {}", self.comparison);
        (self.host, self.panel, self.provider)
    }

    /// Process an action and return the events it produced.
    pub fn handle_action(&mut self, action: ViewAction) -> Vec<ViewEvent> {
        if action.is_host_event() {
            log::trace!("Host event: {:?}", action);
        } else {
            log::debug!("Action: {:?}", action);
        }

        match action {
            ViewAction::SelectNext => {
                self.select_next();
            }
            ViewAction::SelectPrevious => {
                self.select_previous();
            }
            ViewAction::Select { id, focus } => {
                self.select(id, focus);
            }
            ViewAction::SelectPath { path, focus } => {
                self.select_path(&path, focus);
            }
            ViewAction::Refresh => {
                if let Err(err) = self.reconcile() {
                    self.report_refresh_failure(err);
                }
            }
            ViewAction::EnsureLayout => {
                self.ensure();
            }
            ViewAction::Enter => self.on_enter(),
            ViewAction::Leave => self.on_leave(),
            ViewAction::ContentSaved => self.on_content_saved(),
            ViewAction::WindowEntered(window) => self.on_window_entered(window),
        }

        self.drain_events()
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    // === Accessors ===

    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// 0-based index of the active item; `None` while the list is empty.
    pub fn active_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.clamped_active())
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_showing_placeholder(&self) -> bool {
        self.showing_placeholder
    }

    /// Whether a save happened that the list has not caught up with yet.
    pub fn needs_update(&self) -> bool {
        self.update_needed
    }

    pub fn tabpage(&self) -> Option<TabpageId> {
        self.tabpage
    }

    pub fn left_pane(&self) -> Option<WindowId> {
        self.left_pane
    }

    pub fn right_pane(&self) -> Option<WindowId> {
        self.right_pane
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. for the adapter to forward user commands.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn panel(&self) -> &S {
        &self.panel
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    // === Internal helpers ===

    fn emit(&mut self, event: ViewEvent) {
        self.events.push(event);
    }

    fn clamped_active(&self) -> usize {
        self.active.min(self.items.len().saturating_sub(1))
    }

    fn panes(&self) -> Option<(WindowId, WindowId)> {
        self.left_pane.zip(self.right_pane)
    }

    /// Re-render the panel rows and push them to the screen.
    fn render_panel(&mut self) {
        self.panel.render(&self.items);
        self.panel.redraw();
    }

    fn report_refresh_failure(&mut self, err: ProviderError) {
        log::warn!("Failed to refresh {}: {}", self.comparison, err);
        self.emit(ViewEvent::RefreshFailed(err.to_string()));
    }
}
