//! Applying a fresh provider listing to the item list.
//!
//! The listing is diffed against the current list by path and the resulting
//! edit script is applied in a single left-to-right pass. Items that survive
//! keep their identity and loaded content; selection only moves when the
//! active entity itself is gone.

use super::DiffView;
use crate::edit_script::{edit_script, EditOp};
use crate::event::ViewEvent;
use crate::model::{Item, ItemId, Revision};
use crate::traits::{ChangedItemProvider, ContentLoader, EditorHost, ProviderError, SidePanel};
use std::collections::HashSet;

/// Counts of what a reconcile pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileSummary {
    /// Items present before and after (metadata refreshed in place).
    pub kept: usize,
    /// Items that entered the list.
    pub added: usize,
    /// Items that left the list and were destroyed.
    pub removed: usize,
}

impl ReconcileSummary {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Result of [`DiffView::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The view was not ready; nothing was done.
    Skipped,
    Applied(ReconcileSummary),
}

impl<H, S, P> DiffView<H, S, P>
where
    H: EditorHost + ContentLoader,
    S: SidePanel,
    P: ChangedItemProvider,
{
    /// Bring the item list up to date with the provider.
    ///
    /// Suppressed while the view is not ready. On provider failure the list
    /// is left untouched.
    pub fn reconcile(&mut self) -> Result<ReconcileOutcome, ProviderError> {
        if !self.ready {
            log::debug!("Skipping reconcile of {}: not ready", self.comparison);
            return Ok(ReconcileOutcome::Skipped);
        }

        let left_moved = self.refresh_left_endpoint();
        let fresh = self.provider.list(&self.comparison)?;
        let summary = self.apply_listing(fresh);
        self.update_needed = false;

        log::info!(
            "Reconciled {}: {} kept, {} added, {} removed",
            self.comparison,
            summary.kept,
            summary.added,
            summary.removed
        );
        self.emit(ViewEvent::ItemsReconciled(summary));

        // Re-select the (possibly shifted) active item. Content from a moved
        // left revision is stale, so it is reloaded.
        self.ensure();
        if !self.guard_empty(false) {
            let index = self.clamped_active();
            self.set_active(index, false, left_moved);
        }

        Ok(ReconcileOutcome::Applied(summary))
    }

    /// Re-resolve a left side that follows a moving reference.
    ///
    /// Returns whether the left revision changed.
    fn refresh_left_endpoint(&mut self) -> bool {
        if !self.comparison.tracks_moving_head() {
            return false;
        }
        let Some(reference) = self.comparison.left.tracks.clone() else {
            return false;
        };

        let oid = match self
            .provider
            .resolve_reference(&self.comparison.root, &reference)
        {
            Ok(oid) => oid,
            Err(err) => {
                log::warn!("Failed to resolve {}: {}", reference, err);
                return false;
            }
        };

        if self.comparison.left.oid() == Some(oid.as_str()) {
            return false;
        }

        let to = Revision::Commit(oid);
        let from = std::mem::replace(&mut self.comparison.left.revision, to.clone());
        log::info!("{} moved from {} to {}", reference, from, to);
        self.emit(ViewEvent::LeftRevisionMoved { from, to });
        true
    }

    /// Apply `fresh` to the current list and re-render the panel.
    fn apply_listing(&mut self, fresh: Vec<Item>) -> ReconcileSummary {
        let script = {
            let current: Vec<&str> = self.items.iter().map(|item| item.path.as_str()).collect();
            let listed: Vec<&str> = fresh.iter().map(|item| item.path.as_str()).collect();
            edit_script(&current, &listed)
        };
        let inserted: HashSet<ItemId> = fresh.iter().map(Item::id).collect();

        let mut follow = self.current_item().map(Item::id);
        let mut incoming = fresh.into_iter();
        let mut index = 0;
        let mut summary = ReconcileSummary::default();

        for op in script {
            match op {
                EditOp::Keep => {
                    if let Some(new_item) = incoming.next() {
                        self.items[index].update_from(&new_item);
                    }
                    index += 1;
                    summary.kept += 1;
                }
                EditOp::Delete => {
                    self.remove_item(index, &inserted, &mut follow);
                    summary.removed += 1;
                }
                EditOp::Insert => {
                    if let Some(new_item) = incoming.next() {
                        self.items.insert(index, new_item);
                        index += 1;
                        summary.added += 1;
                    }
                }
                EditOp::Replace => {
                    self.remove_item(index, &inserted, &mut follow);
                    summary.removed += 1;
                    if let Some(new_item) = incoming.next() {
                        self.items.insert(index, new_item);
                        index += 1;
                        summary.added += 1;
                    }
                }
            }
        }

        // A removed first entry hands selection to whatever now sits at the front
        self.active = follow
            .and_then(|id| self.items.iter().position(|item| item.id() == id))
            .unwrap_or(0);

        self.render_panel();
        summary
    }

    /// Destroy the item at `index`. If `follow` pointed at it, move it to the
    /// nearest earlier item that was already listed before this pass.
    fn remove_item(
        &mut self,
        index: usize,
        inserted: &HashSet<ItemId>,
        follow: &mut Option<ItemId>,
    ) {
        let mut removed = self.items.remove(index);

        if *follow == Some(removed.id()) {
            *follow = self.items[..index]
                .iter()
                .rev()
                .map(Item::id)
                .find(|id| !inserted.contains(id));
            log::debug!("Active item {} removed", removed.path);
        }

        removed.detach(&mut self.host);
        removed.destroy(&mut self.host);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::model::{ContentState, DiffStats, ItemStatus};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn destroyed(view: &TestView) -> Vec<String> {
        view.host()
            .content_calls()
            .iter()
            .filter_map(|call| match call {
                ContentCall::Destroy(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_reconcile_example() {
        let mut view = open_view(&["A", "B", "C"]);
        view.select_next();
        assert_eq!(active_path(&view), "B");

        let renders = view.panel().render_count();
        view.provider_mut().set_paths(&["A", "C", "D"]);
        let outcome = view.reconcile().unwrap();
        assert_eq!(view.panel().render_count(), renders + 1);
        assert_eq!(view.panel().redraw_count(), view.panel().render_count());

        assert_eq!(
            outcome,
            ReconcileOutcome::Applied(ReconcileSummary {
                kept: 2,
                added: 1,
                removed: 1,
            })
        );
        assert_eq!(paths(&view), vec!["A", "C", "D"]);
        assert_eq!(active_path(&view), "A");
        assert_eq!(destroyed(&view), vec!["B"]);
        assert_single_attached(&view);
    }

    #[test]
    fn test_active_entity_follows_index_shift() {
        let mut view = open_view(&["b", "c"]);
        view.select_next();
        let active_id = view.current_item().unwrap().id();
        let loads = view.host().load_count();

        view.provider_mut().set_paths(&["a", "b", "c"]);
        view.reconcile().unwrap();

        assert_eq!(view.active_index(), Some(2));
        assert_eq!(view.current_item().unwrap().id(), active_id);
        // Still loaded: no reload for an entity that survived
        assert_eq!(view.host().load_count(), loads);
        assert_eq!(view.panel().highlighted(), Some("c"));
    }

    #[test]
    fn test_removed_first_entry_hands_selection_to_front() {
        let mut view = open_view(&["a", "b"]);

        view.provider_mut().set_paths(&["x", "b"]);
        view.reconcile().unwrap();
        assert_eq!(active_path(&view), "x");

        view.provider_mut().set_paths(&["b"]);
        view.reconcile().unwrap();
        assert_eq!(active_path(&view), "b");
        assert_single_attached(&view);
    }

    #[test]
    fn test_removed_active_with_removed_predecessor() {
        let mut view = open_view(&["a", "b", "c", "d"]);
        view.select_path("c", false);

        view.provider_mut().set_paths(&["a", "d"]);
        view.reconcile().unwrap();

        assert_eq!(paths(&view), vec!["a", "d"]);
        assert_eq!(active_path(&view), "a");
    }

    #[test]
    fn test_removed_active_skips_items_added_in_same_pass() {
        let mut view = open_view(&["a", "c", "d", "e"]);
        view.select_path("d", false);

        view.provider_mut().set_paths(&["a", "b"]);
        view.reconcile().unwrap();
        assert_eq!(paths(&view), vec!["a", "b"]);
        assert_eq!(active_path(&view), "a");

        let mut view = open_view(&["a", "b", "d", "e"]);
        view.select_path("e", false);

        view.provider_mut().set_paths(&["a", "b", "c"]);
        view.reconcile().unwrap();
        assert_eq!(active_path(&view), "b");
        assert_single_attached(&view);
    }

    #[test]
    fn test_keep_refreshes_metadata_in_place() {
        let mut view = open_view(&["a", "b"]);
        let ids: Vec<_> = view.items().iter().map(Item::id).collect();

        view.provider_mut().set_entries(&[
            ("a", ItemStatus::Added, DiffStats::new(10, 0)),
            ("b", ItemStatus::Deleted, DiffStats::new(0, 4)),
        ]);
        let outcome = view.reconcile().unwrap();

        assert!(matches!(outcome, ReconcileOutcome::Applied(s) if s.is_unchanged()));
        let after: Vec<_> = view.items().iter().map(Item::id).collect();
        assert_eq!(after, ids);
        assert_eq!(view.items()[0].status, ItemStatus::Added);
        assert_eq!(view.items()[1].stats, Some(DiffStats::new(0, 4)));
        assert_eq!(view.items()[0].content_state(), ContentState::Attached);
        assert_eq!(view.panel().rows()[1].status, ItemStatus::Deleted);
    }

    #[test]
    fn test_order_follows_new_listing() {
        let cases: [(&[&str], &[&str]); 3] = [
            (&["a", "b", "c", "d"], &["d", "c", "b", "a"]),
            (&["a", "c", "e"], &["b", "c", "d", "e", "f"]),
            (&["a", "b", "c"], &["c"]),
        ];
        for (old, new) in cases {
            let mut view = open_view(old);
            view.provider_mut().set_paths(new);
            view.reconcile().unwrap();

            assert_eq!(paths(&view), new.to_vec());
            assert_single_attached(&view);
        }
    }

    #[test]
    fn test_every_removed_item_destroyed_once() {
        let mut view = open_view(&["a", "b", "c"]);
        view.provider_mut().set_paths(&["b"]);
        view.reconcile().unwrap();
        view.provider_mut().set_paths(&[]);
        view.reconcile().unwrap();

        // c was never loaded, so its destroy does not reach the loader
        assert_eq!(destroyed(&view), vec!["a", "b"]);
        assert!(view.items().is_empty());
    }

    #[test]
    fn test_emptied_list_shows_placeholder() {
        let mut view = open_view(&["a"]);
        view.drain_events();

        view.provider_mut().set_paths(&[]);
        view.reconcile().unwrap();

        assert!(view.is_showing_placeholder());
        assert_eq!(view.active_index(), None);
        let right = view.right_pane().unwrap();
        assert_eq!(view.host().content(right), Some(&PaneContent::Placeholder));
        assert!(view.drain_events().contains(&ViewEvent::PlaceholderShown));
    }

    #[test]
    fn test_skipped_until_ready() {
        let mut view = new_view(&["a"]);

        assert_eq!(view.reconcile().unwrap(), ReconcileOutcome::Skipped);
        assert_eq!(view.provider().list_calls(), 0);
    }

    #[test]
    fn test_left_revision_follows_head() {
        let mut view = open_view(&["a", "b"]);
        let loads = view.host().load_count();
        view.drain_events();

        view.provider_mut().set_head("feedface");
        view.reconcile().unwrap();

        assert_eq!(view.comparison().left.oid(), Some("feedface"));
        let events = view.drain_events();
        assert!(events.contains(&ViewEvent::LeftRevisionMoved {
            from: left_revision(),
            to: Revision::Commit("feedface".into()),
        }));
        // Active content came from the old revision and is reloaded
        assert_eq!(view.host().load_count(), loads + 1);
        let left = view.left_pane().unwrap();
        assert_eq!(
            view.host().content(left),
            Some(&PaneContent::item("a", Revision::Commit("feedface".into())))
        );

        // Unchanged head: nothing moves
        view.reconcile().unwrap();
        assert!(!view
            .drain_events()
            .iter()
            .any(|event| matches!(event, ViewEvent::LeftRevisionMoved { .. })));
    }

    #[test]
    fn test_provider_failure_leaves_list_untouched() {
        let mut view = open_view(&["a", "b"]);
        view.drain_events();
        view.provider_mut().fail_with("repository locked");

        assert!(view.reconcile().is_err());
        assert_eq!(paths(&view), vec!["a", "b"]);

        let events = view.handle_action(crate::ViewAction::Refresh);
        assert_eq!(
            events,
            vec![ViewEvent::RefreshFailed(
                "Provider unavailable: repository locked".into()
            )]
        );
    }

    const PATHS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

    fn listing() -> impl Strategy<Value = Vec<&'static str>> {
        prop::sample::subsequence(PATHS.to_vec(), 0..=PATHS.len()).prop_shuffle()
    }

    proptest! {
        #[test]
        fn prop_reconcile_follows_listing_and_selection(
            old in listing(),
            new in listing(),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut view = open_view(&old);
            if !old.is_empty() {
                view.select_path(*pick.get::<&str>(&old), false);
            }
            let before: Vec<ItemId> = view.items().iter().map(Item::id).collect();
            let active = view.current_item().map(Item::id);

            view.provider_mut().set_paths(&new);
            view.reconcile().unwrap();

            prop_assert_eq!(paths(&view), new.clone());
            if new.is_empty() {
                prop_assert!(view.is_showing_placeholder());
                prop_assert_eq!(view.active_index(), None);
                return Ok(());
            }
            assert_single_attached(&view);

            let after: Vec<ItemId> = view.items().iter().map(Item::id).collect();
            let expected = match active.and_then(|id| before.iter().position(|b| *b == id)) {
                Some(position) => before[..=position]
                    .iter()
                    .rev()
                    .find(|id| after.contains(id))
                    .copied()
                    .unwrap_or(after[0]),
                None => after[0],
            };
            prop_assert_eq!(view.current_item().map(Item::id), Some(expected));
        }
    }
}
