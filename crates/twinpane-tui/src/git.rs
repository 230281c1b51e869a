//! Changed-file listing and file content through the `git` command line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use twinpane::{
    ChangedItemProvider, Comparison, DiffStats, Item, ItemStatus, ProviderError, Revision,
};

/// Lists the files that differ between the two endpoints of a comparison.
#[derive(Debug, Default)]
pub struct GitProvider;

impl GitProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ChangedItemProvider for GitProvider {
    fn list(&self, comparison: &Comparison) -> Result<Vec<Item>, ProviderError> {
        let range = diff_range(&comparison.left.revision, &comparison.right.revision)?;
        let root = &comparison.root;

        let name_status = run_git(root, &diff_args("--name-status", &range, comparison))?;
        let numstat = run_git(root, &diff_args("--numstat", &range, comparison))?;

        let mut entries: BTreeMap<String, Item> = parse_name_status(&name_status)?
            .into_iter()
            .map(|item| (item.path.clone(), item))
            .collect();

        for (path, stats) in parse_numstat(&numstat)? {
            if let Some(item) = entries.get_mut(&path) {
                item.stats = stats;
            }
        }

        if comparison.right.is_live() {
            let mut args = vec!["ls-files", "--others", "--exclude-standard", "-z", "--"];
            args.extend(comparison.path_filters.iter().map(String::as_str));
            let untracked = run_git(root, &args)?;

            for path in split_nul(&untracked) {
                entries
                    .entry(path.to_string())
                    .or_insert_with(|| Item::new(path, ItemStatus::Untracked));
            }
        }

        log::debug!("git listed {} changed files for {}", entries.len(), comparison);
        Ok(entries.into_values().collect())
    }

    fn resolve_reference(&self, root: &Path, reference: &str) -> Result<String, ProviderError> {
        let object = format!("{}^{{commit}}", reference);
        let output = run_git(root, &["rev-parse", "--verify", "--quiet", &object])?;
        let oid = output.trim();
        if oid.is_empty() {
            return Err(ProviderError::InvalidOutput(format!(
                "{} does not name a commit",
                reference
            )));
        }
        Ok(oid.to_string())
    }
}

/// Which pair of trees `git diff` compares.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DiffRange {
    /// `git diff [<commit>]`: against the working tree.
    WorkingTree(Option<String>),
    /// `git diff --cached <commit>`: against the index.
    Index(String),
    /// `git diff <a> <b>`
    Commits(String, String),
}

fn diff_range(left: &Revision, right: &Revision) -> Result<DiffRange, ProviderError> {
    match (left, right) {
        (Revision::Commit(oid), Revision::WorkingTree) => {
            Ok(DiffRange::WorkingTree(Some(oid.clone())))
        }
        (Revision::Index, Revision::WorkingTree) => Ok(DiffRange::WorkingTree(None)),
        (Revision::Commit(oid), Revision::Index) => Ok(DiffRange::Index(oid.clone())),
        (Revision::Commit(a), Revision::Commit(b)) => Ok(DiffRange::Commits(a.clone(), b.clone())),
        (left, right) => Err(ProviderError::Unavailable(format!(
            "cannot compare {} against {}",
            left, right
        ))),
    }
}

fn diff_args<'a>(
    format: &'a str,
    range: &'a DiffRange,
    comparison: &'a Comparison,
) -> Vec<&'a str> {
    let mut args = vec!["diff", format, "-z", "-M"];
    match range {
        DiffRange::WorkingTree(None) => {}
        DiffRange::WorkingTree(Some(oid)) => args.push(oid),
        DiffRange::Index(oid) => args.extend(["--cached", oid.as_str()]),
        DiffRange::Commits(a, b) => args.extend([a.as_str(), b.as_str()]),
    }
    args.push("--");
    args.extend(comparison.path_filters.iter().map(String::as_str));
    args
}

fn run_git(root: &Path, args: &[&str]) -> Result<String, ProviderError> {
    log::trace!("git {}", args.join(" "));
    let output = Command::new("git").args(args).current_dir(root).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProviderError::CommandFailed(format!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| ProviderError::InvalidOutput(format!("git output is not UTF-8: {}", e)))
}

/// Top level of the repository containing `dir`.
pub fn repository_root(dir: &Path) -> Result<PathBuf, ProviderError> {
    let output = run_git(dir, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(output.trim()))
}

/// Content of `path` as of `revision`. Files missing on that side read as
/// empty.
pub fn read_content(root: &Path, revision: &Revision, path: &str) -> Result<String, ProviderError> {
    let object = match revision {
        Revision::WorkingTree => {
            return match std::fs::read(root.join(path)) {
                Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
                Err(e) => Err(e.into()),
            };
        }
        Revision::Index => format!(":{}", path),
        Revision::Commit(oid) => format!("{}:{}", oid, path),
    };

    match run_git(root, &["show", &object]) {
        Ok(content) => Ok(content),
        // Added or deleted on the other side
        Err(ProviderError::CommandFailed(message)) => {
            log::debug!("No content for {}: {}", object, message);
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

fn split_nul(output: &str) -> impl Iterator<Item = &str> {
    output.split('\0').filter(|field| !field.is_empty())
}

/// Parse `git diff --name-status -z`.
///
/// Records are `STATUS\0PATH\0`, or `STATUS\0OLD\0NEW\0` for renames and
/// copies, whose status letter carries a similarity score (`R087`).
fn parse_name_status(output: &str) -> Result<Vec<Item>, ProviderError> {
    let mut fields = split_nul(output);
    let mut items = Vec::new();

    while let Some(status) = fields.next() {
        let letter = status
            .chars()
            .next()
            .ok_or_else(|| ProviderError::InvalidOutput("empty status".to_string()))?;
        let status = ItemStatus::from_git_letter(letter);

        let path = fields
            .next()
            .ok_or_else(|| ProviderError::InvalidOutput(format!("missing path after {}", letter)))?;

        let item = if matches!(status, ItemStatus::Renamed | ItemStatus::Copied) {
            let new_path = fields.next().ok_or_else(|| {
                ProviderError::InvalidOutput(format!("missing new path for {}", path))
            })?;
            Item::new(new_path, status).with_old_path(path)
        } else {
            Item::new(path, status)
        };
        items.push(item);
    }

    Ok(items)
}

/// Parse `git diff --numstat -z` into per-path stats.
///
/// Records are `ADD\tDEL\tPATH\0`, or `ADD\tDEL\t\0OLD\0NEW\0` for renames.
/// Binary files report `-` for both counts and get no stats.
fn parse_numstat(output: &str) -> Result<Vec<(String, Option<DiffStats>)>, ProviderError> {
    let mut fields = output.split('\0');
    let mut stats = Vec::new();

    while let Some(record) = fields.next() {
        if record.is_empty() {
            continue;
        }

        let mut parts = record.splitn(3, '\t');
        let (Some(additions), Some(deletions), Some(path)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(ProviderError::InvalidOutput(format!(
                "malformed numstat record: {:?}",
                record
            )));
        };

        let path = if path.is_empty() {
            // Rename: the old and new paths follow as separate fields
            let _old = fields.next();
            fields
                .next()
                .ok_or_else(|| ProviderError::InvalidOutput("missing rename target".to_string()))?
        } else {
            path
        };

        let counts = match (additions.parse(), deletions.parse()) {
            (Ok(additions), Ok(deletions)) => Some(DiffStats::new(additions, deletions)),
            _ => None,
        };
        stats.push((path.to_string(), counts));
    }

    Ok(stats)
}
