//! Revision endpoints and the comparison they bound.

use std::fmt;
use std::path::PathBuf;

/// A concrete state of the repository content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Revision {
    /// A fixed commit, by object id.
    Commit(String),
    /// The staging area.
    Index,
    /// The live files on disk.
    WorkingTree,
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Commit(oid) => write!(f, "{}", short_oid(oid)),
            Revision::Index => write!(f, "INDEX"),
            Revision::WorkingTree => write!(f, "WORKING TREE"),
        }
    }
}

fn short_oid(oid: &str) -> &str {
    oid.get(..10).unwrap_or(oid)
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// The revision currently compared.
    pub revision: Revision,
    /// Symbolic reference this endpoint follows (e.g. `HEAD`), if any.
    pub tracks: Option<String>,
}

impl Endpoint {
    /// A fixed commit.
    pub fn commit(oid: impl Into<String>) -> Self {
        Self {
            revision: Revision::Commit(oid.into()),
            tracks: None,
        }
    }

    /// A commit that follows a moving reference.
    pub fn tracking(reference: impl Into<String>, oid: impl Into<String>) -> Self {
        Self {
            revision: Revision::Commit(oid.into()),
            tracks: Some(reference.into()),
        }
    }

    pub fn index() -> Self {
        Self {
            revision: Revision::Index,
            tracks: None,
        }
    }

    pub fn working_tree() -> Self {
        Self {
            revision: Revision::WorkingTree,
            tracks: None,
        }
    }

    /// Whether this endpoint denotes the live working state.
    pub fn is_live(&self) -> bool {
        self.revision == Revision::WorkingTree
    }

    /// The commit id, for commit endpoints.
    pub fn oid(&self) -> Option<&str> {
        match &self.revision {
            Revision::Commit(oid) => Some(oid),
            _ => None,
        }
    }
}

/// The pair of endpoints a view compares, plus optional path filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Repository root the item paths are relative to.
    pub root: PathBuf,
    pub left: Endpoint,
    pub right: Endpoint,
    /// Restrict the listing to these paths (empty = everything).
    pub path_filters: Vec<String>,
}

impl Comparison {
    pub fn new(root: impl Into<PathBuf>, left: Endpoint, right: Endpoint) -> Self {
        Self {
            root: root.into(),
            left,
            right,
            path_filters: Vec::new(),
        }
    }

    pub fn with_path_filters(mut self, filters: Vec<String>) -> Self {
        self.path_filters = filters;
        self
    }

    /// Whether the left side must be re-resolved before each refresh.
    ///
    /// True when the left side follows a reference and the right side is the
    /// working tree, i.e. "diff against the current branch tip".
    pub fn tracks_moving_head(&self) -> bool {
        self.left.tracks.is_some() && self.right.is_live()
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.left.revision, self.right.revision)
    }
}
