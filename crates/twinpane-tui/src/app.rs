//! Application state: the view plus what the screen needs around it.

use crate::git::{self, GitProvider};
use crate::keymap::Command;
use std::collections::HashMap;
use twinpane::memory::{MemoryHost, MemoryPanel, PaneContent};
use twinpane::{
    ChangedItemProvider, DiffView, EditorHost, LayoutAxis, Placement, Revision, ViewAction,
    ViewEvent, ViewOptions,
};
use twinpane_config::{AppConfig, LayoutSetting, PanelPosition};

pub type TerminalView<P = GitProvider> = DiffView<MemoryHost, MemoryPanel, P>;

pub struct App<P: ChangedItemProvider = GitProvider> {
    pub view: TerminalView<P>,
    pub config: AppConfig,
    /// Description of the last thing that happened.
    pub status: String,
    pub running: bool,
    /// File text per (path, revision), filled before drawing.
    content: HashMap<(String, Revision), String>,
}

/// Map the file configuration onto the view's options.
pub fn view_options(config: &AppConfig) -> ViewOptions {
    ViewOptions {
        axis: match config.layout {
            LayoutSetting::Vertical => LayoutAxis::Vertical,
            LayoutSetting::Horizontal => LayoutAxis::Horizontal,
        },
        refresh_on_save: config.refresh_on_save,
    }
}

/// Panel placement for the configured edge and pane axis.
pub fn panel_placement(config: &AppConfig) -> Placement {
    match (config.panel_position, config.layout) {
        (PanelPosition::Left, LayoutSetting::Vertical) => Placement::Left,
        (PanelPosition::Right, LayoutSetting::Vertical) => Placement::Right,
        (PanelPosition::Left, LayoutSetting::Horizontal) => Placement::Above,
        (PanelPosition::Right, LayoutSetting::Horizontal) => Placement::Below,
    }
}

impl<P: ChangedItemProvider> App<P> {
    pub fn new(view: TerminalView<P>, config: AppConfig) -> Self {
        Self {
            view,
            config,
            status: String::from("Ready"),
            running: true,
            content: HashMap::new(),
        }
    }

    /// Hand the view back, e.g. to close it.
    pub fn into_view(self) -> TerminalView<P> {
        self.view
    }

    /// Open the view and report what happened while doing so.
    pub fn open(&mut self) {
        self.view.open();
        let events = self.view.drain_events();
        self.record(&events);
    }

    pub fn execute(&mut self, command: Command) {
        log::debug!("Command: {:?}", command);

        let action = match command {
            Command::Quit => {
                self.running = false;
                return;
            }
            Command::NextItem => Some(ViewAction::SelectNext),
            Command::PreviousItem => Some(ViewAction::SelectPrevious),
            Command::FirstItem => self.select_path_action(|items| items.first()),
            Command::LastItem => self.select_path_action(|items| items.last()),
            Command::Refresh => {
                self.content.clear();
                Some(ViewAction::Refresh)
            }
            Command::SimulateSave => {
                self.content.clear();
                Some(ViewAction::ContentSaved)
            }
            Command::CycleWindow => self.cycle_window(),
            Command::CloseLeftPane => {
                self.close_window(self.view.left_pane(), "left pane");
                None
            }
            Command::CloseRightPane => {
                self.close_window(self.view.right_pane(), "right pane");
                None
            }
            Command::CloseTabpage => {
                if let Some(tabpage) = self.view.tabpage() {
                    self.view.host_mut().close_tabpage(tabpage);
                    self.status = format!("Closed {}", tabpage);
                }
                None
            }
            Command::EnsureLayout => Some(ViewAction::EnsureLayout),
        };

        if let Some(action) = action {
            let events = self.view.handle_action(action);
            self.record(&events);
        }
    }

    fn select_path_action<F>(&self, pick: F) -> Option<ViewAction>
    where
        F: FnOnce(&[twinpane::Item]) -> Option<&twinpane::Item>,
    {
        let path = pick(self.view.items())?.path.clone();
        Some(ViewAction::SelectPath {
            path,
            focus: self.config.focus_on_select,
        })
    }

    fn cycle_window(&mut self) -> Option<ViewAction> {
        let tabpage = self.view.tabpage()?;
        let host = self.view.host_mut();
        let windows = host.tabpage_windows(tabpage);
        if windows.is_empty() {
            return None;
        }

        let next = host
            .current_window()
            .and_then(|current| windows.iter().position(|w| *w == current))
            .map_or(0, |index| (index + 1) % windows.len());
        let window = windows[next];
        host.focus_window(window);
        Some(ViewAction::WindowEntered(window))
    }

    fn close_window(&mut self, window: Option<twinpane::WindowId>, what: &str) {
        let Some(window) = window else {
            return;
        };
        if self.view.host_mut().close_window(window) {
            self.status = format!("Closed {} ({})", what, window);
        }
    }

    fn record(&mut self, events: &[ViewEvent]) {
        if let Some(event) = events.last() {
            self.status = describe(event);
        }
        for event in events {
            if let ViewEvent::RefreshFailed(message) = event {
                self.status = format!("Refresh failed: {}", message);
            }
        }
    }

    /// Fetch the text of every item side currently on screen.
    pub fn prepare_content(&mut self) {
        let Some(tabpage) = self.view.tabpage() else {
            return;
        };
        let root = self.view.comparison().root.clone();

        for window in self.view.host().tabpage_windows(tabpage) {
            let Some(PaneContent::Item { path, revision }) = self.view.host().content(window)
            else {
                continue;
            };
            let key = (path.clone(), revision.clone());
            if self.content.contains_key(&key) {
                continue;
            }

            let text = git::read_content(&root, revision, path).unwrap_or_else(|e| {
                log::warn!("Failed to read {} at {}: {}", path, revision, e);
                String::new()
            });
            self.content.insert(key, text);
        }
    }

    /// Text of `path` at `revision`, if fetched.
    pub fn text(&self, path: &str, revision: &Revision) -> Option<&str> {
        self.content
            .get(&(path.to_string(), revision.clone()))
            .map(String::as_str)
    }
}

/// Status line text for an event.
pub fn describe(event: &ViewEvent) -> String {
    match event {
        ViewEvent::SelectionChanged { path, .. } => format!("Showing {}", path),
        ViewEvent::PlaceholderShown => "No changes".to_string(),
        ViewEvent::ItemsReconciled(summary) => format!(
            "Refreshed: {} kept, {} added, {} removed",
            summary.kept, summary.added, summary.removed
        ),
        ViewEvent::LeftRevisionMoved { from, to } => format!("Left side moved {} -> {}", from, to),
        ViewEvent::LayoutRecovered(state) => format!("Layout recovered ({:?})", state),
        ViewEvent::RefreshFailed(message) => format!("Refresh failed: {}", message),
    }
}
