//! Layout validation and recovery.
//!
//! Anything outside the view may close its windows or its whole tab
//! container. Before the layout is used it is validated, and whatever is
//! missing is rebuilt in place.

use super::DiffView;
use crate::event::ViewEvent;
use crate::model::{LayoutState, TabpageId, WindowId};
use crate::traits::{ChangedItemProvider, ContentLoader, EditorHost, SidePanel};

impl<H, S, P> DiffView<H, S, P>
where
    H: EditorHost + ContentLoader,
    S: SidePanel,
    P: ChangedItemProvider,
{
    /// Classify the current layout.
    pub fn validate(&self) -> LayoutState {
        let tabpage = self
            .tabpage
            .is_some_and(|tab| self.host.tabpage_is_valid(tab));
        let left = self
            .left_pane
            .is_some_and(|win| self.host.window_is_valid(win));
        let right = self
            .right_pane
            .is_some_and(|win| self.host.window_is_valid(win));
        LayoutState::classify(tabpage, left, right)
    }

    /// Validate the layout and recover it if needed.
    ///
    /// Returns `true` when something was rebuilt. A view that was never
    /// opened has no layout to ensure.
    pub fn ensure(&mut self) -> bool {
        if self.tabpage.is_none() {
            return false;
        }

        let state = self.validate();
        if state.is_valid() {
            return false;
        }
        self.recover(state);
        true
    }

    /// Rebuild the parts of the layout `state` reports missing, then reload
    /// the active content. Does nothing on a view that was never opened.
    pub fn recover(&mut self, state: LayoutState) {
        if state.is_valid() {
            return;
        }
        if self.tabpage.is_none() {
            log::debug!("Not recovering {}: view was never opened", self.comparison);
            return;
        }

        log::info!("Recovering layout of {}: {:?}", self.comparison, state);
        self.ready = false;

        match state {
            LayoutState::Valid => {}
            LayoutState::TabpageGone => {
                let tabpage = self.host.create_tabpage();
                self.tabpage = Some(tabpage);
                self.build_panes(tabpage);
            }
            LayoutState::BothPanesGone => {
                if let Some(tabpage) = self.tabpage {
                    self.rebuild_both_panes(tabpage);
                }
            }
            LayoutState::LeftPaneGone => {
                if let (Some(tabpage), Some(right)) = (self.tabpage, self.right_pane) {
                    self.left_pane = self.split_pane(right, true);
                    self.reopen_panel(tabpage);
                }
            }
            LayoutState::RightPaneGone => {
                if let (Some(tabpage), Some(left)) = (self.tabpage, self.left_pane) {
                    self.right_pane = self.split_pane(left, false);
                    self.reopen_panel(tabpage);
                }
            }
        }

        self.ready = true;
        self.show_active(true);
        self.emit(ViewEvent::LayoutRecovered(state));
    }

    /// First-time layout construction inside a fresh tabpage: its initial
    /// window becomes the right pane and the left pane is split off it.
    pub(super) fn build_panes(&mut self, tabpage: TabpageId) -> bool {
        let Some(right) = self.host.tabpage_windows(tabpage).first().copied() else {
            log::warn!("{} has no window to build panes from", tabpage);
            return false;
        };
        self.install_panes(tabpage, right)
    }

    /// Both panes are gone but the tabpage survives (with the panel or
    /// foreign windows): open a new right pane after the last window.
    fn rebuild_both_panes(&mut self, tabpage: TabpageId) -> bool {
        let anchor = self.host.tabpage_windows(tabpage).last().copied();
        let Some(right) = anchor.and_then(|anchor| {
            self.host
                .split_window(anchor, self.options.axis.after())
        }) else {
            log::warn!("Could not open a new pane in {}", tabpage);
            return false;
        };
        self.install_panes(tabpage, right)
    }

    fn install_panes(&mut self, tabpage: TabpageId, right: WindowId) -> bool {
        self.right_pane = Some(right);
        self.left_pane = self.split_pane(right, true);
        self.reopen_panel(tabpage);

        if !self.host.focus_window(right) {
            log::debug!("Could not focus {}", right);
        }
        self.left_pane.is_some()
    }

    /// Open a new pane next to `survivor`, before it for the left side.
    fn split_pane(&mut self, survivor: WindowId, before: bool) -> Option<WindowId> {
        let placement = if before {
            self.options.axis.before()
        } else {
            self.options.axis.after()
        };

        self.host.focus_window(survivor);
        let pane = self.host.split_window(survivor, placement);
        if pane.is_none() {
            log::warn!("Failed to split {} ({:?})", survivor, placement);
        }
        pane
    }

    /// Close and reopen the panel so it sits at its configured edge again.
    fn reopen_panel(&mut self, tabpage: TabpageId) {
        self.panel.close(&mut self.host);
        self.panel.open(&mut self.host, tabpage);
        self.render_panel();

        let active = if self.showing_placeholder {
            None
        } else {
            self.items.get(self.clamped_active())
        };
        self.panel.highlight(active);
    }
}
