//! Data models for the comparison view.

mod item;
mod layout;
mod revision;

pub use item::{ContentState, DiffStats, Item, ItemId, ItemStatus};
pub use layout::{LayoutAxis, LayoutState, Placement, TabpageId, WindowId};
pub use revision::{Comparison, Endpoint, Revision};
