//! Window and container identities plus the layout state machine states.

use std::fmt;

/// Identity of a tab container in the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabpageId(pub u64);

/// Identity of a window in the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for TabpageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win#{}", self.0)
    }
}

/// Where a new window opens relative to the window it splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Left,
    Right,
    Above,
    Below,
}

impl Placement {
    /// Whether the new window is ordered before its anchor.
    pub fn is_before(&self) -> bool {
        matches!(self, Placement::Left | Placement::Above)
    }
}

/// How the two content panes are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAxis {
    /// Left and right pane side by side.
    #[default]
    Vertical,
    /// Left pane stacked above the right pane.
    Horizontal,
}

impl LayoutAxis {
    /// Placement that puts a new pane before its anchor on this axis.
    pub fn before(&self) -> Placement {
        match self {
            LayoutAxis::Vertical => Placement::Left,
            LayoutAxis::Horizontal => Placement::Above,
        }
    }

    /// Placement that puts a new pane after its anchor on this axis.
    pub fn after(&self) -> Placement {
        match self {
            LayoutAxis::Vertical => Placement::Right,
            LayoutAxis::Horizontal => Placement::Below,
        }
    }
}

/// Result of validating the view's layout.
///
/// `TabpageGone` subsumes the pane states: once the container is gone the
/// panes are necessarily gone with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Valid,
    TabpageGone,
    LeftPaneGone,
    RightPaneGone,
    BothPanesGone,
}

impl LayoutState {
    /// Classify the layout from the three validity checks.
    pub fn classify(tabpage_valid: bool, left_valid: bool, right_valid: bool) -> Self {
        match (tabpage_valid, left_valid, right_valid) {
            (false, _, _) => LayoutState::TabpageGone,
            (true, true, true) => LayoutState::Valid,
            (true, false, true) => LayoutState::LeftPaneGone,
            (true, true, false) => LayoutState::RightPaneGone,
            (true, false, false) => LayoutState::BothPanesGone,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, LayoutState::Valid)
    }
}
