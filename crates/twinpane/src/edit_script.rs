//! Minimal edit scripts between two ordered lists.
//!
//! This is the list-diff primitive the view reconciles with. The script is
//! consumed left to right with one cursor into each list:
//!
//! | op        | old cursor | new cursor |
//! |-----------|------------|------------|
//! | `Keep`    | +1         | +1         |
//! | `Delete`  | +1         |            |
//! | `Insert`  |            | +1         |
//! | `Replace` | +1         | +1         |

use similar::{capture_diff_slices_deadline, Algorithm, DiffOp};
use std::hash::Hash;
use std::iter;
use std::time::{Duration, Instant};

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Both lists hold the same entity here.
    Keep,
    /// The old entry is gone.
    Delete,
    /// A new entry appears.
    Insert,
    /// The old entry is gone and a new one takes its position.
    Replace,
}

/// Longest time spent looking for a minimal script. Past it, the remaining
/// middle section is treated as fully replaced.
const DIFF_DEADLINE: Duration = Duration::from_millis(100);

/// Compute an edit script turning `old` into `new`, comparing entries by key.
///
/// Within every run of changes between two `Keep`s, paired deletions and
/// insertions are emitted as `Replace` first, then the remaining deletions,
/// then the remaining insertions. An `Insert` is therefore never directly
/// followed by a `Delete`.
pub fn edit_script<K>(old: &[K], new: &[K]) -> Vec<EditOp>
where
    K: Eq + Hash + Ord,
{
    let deadline = Instant::now() + DIFF_DEADLINE;
    let ops = capture_diff_slices_deadline(Algorithm::Myers, old, new, Some(deadline));

    let mut raw = Vec::with_capacity(old.len().max(new.len()));
    for op in ops {
        match op {
            DiffOp::Equal { len, .. } => raw.extend(iter::repeat(EditOp::Keep).take(len)),
            DiffOp::Delete { old_len, .. } => {
                raw.extend(iter::repeat(EditOp::Delete).take(old_len))
            }
            DiffOp::Insert { new_len, .. } => {
                raw.extend(iter::repeat(EditOp::Insert).take(new_len))
            }
            DiffOp::Replace {
                old_len, new_len, ..
            } => {
                raw.extend(iter::repeat(EditOp::Delete).take(old_len));
                raw.extend(iter::repeat(EditOp::Insert).take(new_len));
            }
        }
    }

    pair_replacements(&raw)
}

/// Normalize every run of changes into Replace*, Delete*, Insert*.
fn pair_replacements(raw: &[EditOp]) -> Vec<EditOp> {
    let mut out = Vec::with_capacity(raw.len());
    let (mut deletes, mut inserts) = (0usize, 0usize);

    let flush = |out: &mut Vec<EditOp>, deletes: &mut usize, inserts: &mut usize| {
        let replaces = (*deletes).min(*inserts);
        out.extend(iter::repeat(EditOp::Replace).take(replaces));
        out.extend(iter::repeat(EditOp::Delete).take(*deletes - replaces));
        out.extend(iter::repeat(EditOp::Insert).take(*inserts - replaces));
        *deletes = 0;
        *inserts = 0;
    };

    for op in raw {
        match op {
            EditOp::Delete => deletes += 1,
            EditOp::Insert => inserts += 1,
            EditOp::Replace => {
                deletes += 1;
                inserts += 1;
            }
            EditOp::Keep => {
                flush(&mut out, &mut deletes, &mut inserts);
                out.push(EditOp::Keep);
            }
        }
    }
    flush(&mut out, &mut deletes, &mut inserts);
    out
}
