//! # twinpane
//!
//! The controller behind a two-pane comparison view embedded in an editor.
//! It keeps an ordered list of changed items in sync with live editor state
//! and keeps the window layout self-healing when something tears it down.
//!
//! ## Design Principles
//!
//! This crate is **host-agnostic**. It never talks to an editor directly:
//! every side effect goes through one of the collaborator traits in
//! [`traits`]. This enables:
//!
//! - Testability with the in-memory host in [`memory`]
//! - Reuse behind different front ends (terminal, GUI, editor plugin)
//! - A plain synchronous method-call contract instead of event subscriptions
//!
//! ## Action-Based Architecture
//!
//! The orchestrating application translates host events (tab entered, buffer
//! saved, key pressed) into [`ViewAction`] variants and dispatches them to the
//! [`DiffView`]. The view answers with [`ViewEvent`]s describing what changed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use twinpane::{Comparison, DiffView, Endpoint, ViewAction, ViewOptions};
//!
//! let comparison = Comparison::new(root, Endpoint::tracking("HEAD", oid), Endpoint::working_tree());
//! let mut view = DiffView::new(comparison, host, panel, provider, ViewOptions::default());
//! view.open();
//!
//! for event in view.handle_action(ViewAction::SelectNext) {
//!     // Update status line, redraw, ...
//! }
//!
//! let (host, panel, provider) = view.close();
//! ```

pub mod action;
pub mod edit_script;
pub mod event;
pub mod memory;
pub mod model;
pub mod traits;
pub mod view;

// Re-export commonly used types
pub use action::ViewAction;
pub use edit_script::{edit_script, EditOp};
pub use event::ViewEvent;
pub use model::{
    Comparison, ContentState, DiffStats, Endpoint, Item, ItemId, ItemStatus, LayoutAxis,
    LayoutState, Placement, Revision, TabpageId, WindowId,
};
pub use traits::{ChangedItemProvider, ContentLoader, EditorHost, ProviderError, SidePanel};
pub use view::{DiffView, ReconcileOutcome, ReconcileSummary, SelectOutcome, ViewOptions};
