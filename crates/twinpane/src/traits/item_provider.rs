//! Trait for computing the list of changed items.

use crate::model::{Comparison, Item};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when listing changed items.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An external command exited unsuccessfully.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The output could not be parsed.
    #[error("Invalid output: {0}")]
    InvalidOutput(String),

    /// The provider cannot serve this comparison.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Computes the ordered list of changed items for a comparison.
///
/// `list` must be a pure function of the comparison: calling it twice without
/// repository changes yields the same paths in the same order. Items are
/// ordered by path.
///
/// # Example
///
/// ```ignore
/// struct GitProvider;
///
/// impl ChangedItemProvider for GitProvider {
///     fn list(&self, comparison: &Comparison) -> Result<Vec<Item>, ProviderError> {
///         let output = run_git(&comparison.root, &["diff", "--name-status", "-z"])?;
///         parse_name_status(&output)
///     }
///
///     fn resolve_reference(&self, root: &Path, reference: &str) -> Result<String, ProviderError> {
///         run_git(root, &["rev-parse", reference]).map(|s| s.trim().to_string())
///     }
/// }
/// ```
pub trait ChangedItemProvider {
    /// Fetch the current list of changed items.
    fn list(&self, comparison: &Comparison) -> Result<Vec<Item>, ProviderError>;

    /// Resolve a symbolic reference (e.g. `HEAD`) to a commit id.
    fn resolve_reference(&self, root: &Path, reference: &str) -> Result<String, ProviderError>;
}
