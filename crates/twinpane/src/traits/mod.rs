//! Collaborator traits the view drives.

mod editor_host;
mod item_provider;
mod side_panel;

pub use editor_host::{ContentLoader, EditorHost};
pub use item_provider::{ChangedItemProvider, ProviderError};
pub use side_panel::SidePanel;
