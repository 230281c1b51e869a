//! Host event handlers.

use super::DiffView;
use crate::model::WindowId;
use crate::traits::{ChangedItemProvider, ContentLoader, EditorHost, SidePanel};

impl<H, S, P> DiffView<H, S, P>
where
    H: EditorHost + ContentLoader,
    S: SidePanel,
    P: ChangedItemProvider,
{
    /// The view's tabpage was entered.
    ///
    /// The active item is re-attached before reconciling so the reconcile
    /// sees it as still shown and does not reload it.
    pub fn on_enter(&mut self) {
        if !self.showing_placeholder {
            let index = self.clamped_active();
            if let Some(item) = self.items.get_mut(index) {
                item.attach(&mut self.host);
            }
        }

        if self.ready {
            if let Err(err) = self.reconcile() {
                self.report_refresh_failure(err);
            }
        }
    }

    /// The view's tabpage was left.
    pub fn on_leave(&mut self) {
        let index = self.clamped_active();
        if let Some(item) = self.items.get_mut(index) {
            item.detach(&mut self.host);
        }
    }

    /// Content was written somewhere in the editor.
    ///
    /// Only comparisons against the working tree can go stale this way. The
    /// list is reconciled right away while the view's tabpage is current, and
    /// on the next enter otherwise.
    pub fn on_content_saved(&mut self) {
        if !self.comparison.right.is_live() || !self.options.refresh_on_save {
            return;
        }

        self.update_needed = true;
        if self.tabpage.is_some() && self.host.current_tabpage() == self.tabpage {
            if let Err(err) = self.reconcile() {
                self.report_refresh_failure(err);
            }
        } else {
            log::debug!("Deferring refresh of {} until entered", self.comparison);
        }
    }

    /// A window was entered. Foreign windows opened inside the view's tabpage
    /// lose the diff decorations they inherited.
    pub fn on_window_entered(&mut self, window: WindowId) {
        if !self.ready {
            return;
        }
        let ours = self.panel.window() == Some(window)
            || self.left_pane == Some(window)
            || self.right_pane == Some(window);
        if ours {
            return;
        }

        log::debug!("Clearing diff mode of foreign {}", window);
        self.host.clear_diff_mode(window);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::ViewOptions;
    use crate::action::ViewAction;
    use crate::event::ViewEvent;
    use crate::model::{ContentState, Endpoint, Placement};
    use crate::traits::EditorHost;
    use crate::DiffView;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leave_then_enter_reattaches() {
        let mut view = open_view(&["a.rs", "b.rs"]);
        view.host_mut().clear_content_calls();

        view.handle_action(ViewAction::Leave);
        assert_eq!(view.items()[0].content_state(), ContentState::Detached);

        view.handle_action(ViewAction::Enter);
        assert_eq!(view.items()[0].content_state(), ContentState::Attached);
        assert_eq!(
            view.host().content_calls(),
            &[
                ContentCall::Detach("a.rs".into()),
                ContentCall::Attach("a.rs".into()),
            ]
        );
    }

    #[test]
    fn test_enter_reconciles() {
        let mut view = open_view(&["a.rs"]);
        view.provider_mut().set_paths(&["a.rs", "b.rs"]);

        let events = view.handle_action(ViewAction::Enter);

        assert_eq!(paths(&view), vec!["a.rs", "b.rs"]);
        assert!(events
            .iter()
            .any(|event| matches!(event, ViewEvent::ItemsReconciled(s) if s.added == 1)));
    }

    #[test]
    fn test_enter_with_placeholder_attaches_nothing() {
        let mut view = open_view(&[]);
        view.host_mut().clear_content_calls();

        view.on_leave();
        view.on_enter();

        assert!(view.host().content_calls().is_empty());
    }

    #[test]
    fn test_save_reconciles_when_current() {
        let mut view = open_view(&["a.rs"]);
        view.provider_mut().set_paths(&["a.rs", "new.rs"]);

        view.handle_action(ViewAction::ContentSaved);

        assert_eq!(paths(&view), vec!["a.rs", "new.rs"]);
        assert!(!view.needs_update());
    }

    #[test]
    fn test_save_deferred_while_elsewhere() {
        let mut view = open_view(&["a.rs"]);
        view.host_mut().create_tabpage();
        view.provider_mut().set_paths(&["a.rs", "new.rs"]);

        view.on_content_saved();
        assert!(view.needs_update());
        assert_eq!(paths(&view), vec!["a.rs"]);

        let tab = view.tabpage().unwrap();
        view.host_mut().set_current_tabpage(tab);
        view.on_enter();
        assert!(!view.needs_update());
        assert_eq!(paths(&view), vec!["a.rs", "new.rs"]);
    }

    #[test]
    fn test_save_ignored_for_fixed_revisions() {
        let comparison = crate::Comparison::new(
            "/repo",
            Endpoint::commit(HEAD_OID),
            Endpoint::index(),
        );
        let mut view = DiffView::new(
            comparison,
            MemoryHost::new(),
            MemoryPanel::default(),
            StaticProvider::new(&["a.rs"]),
            ViewOptions::default(),
        );
        view.open();
        let calls = view.provider().list_calls();

        view.on_content_saved();

        assert!(!view.needs_update());
        assert_eq!(view.provider().list_calls(), calls);
    }

    #[test]
    fn test_save_ignored_when_disabled() {
        let mut view = DiffView::new(
            comparison(),
            MemoryHost::new(),
            MemoryPanel::new(Placement::Right),
            StaticProvider::new(&["a.rs"]),
            ViewOptions {
                refresh_on_save: false,
                ..ViewOptions::default()
            },
        );
        view.open();

        view.on_content_saved();

        assert!(!view.needs_update());
        assert_eq!(view.provider().list_calls(), 1);
    }

    #[test]
    fn test_foreign_window_loses_diff_mode() {
        let mut view = open_view(&["a.rs"]);
        let right = view.right_pane().unwrap();
        let foreign = view
            .host_mut()
            .split_window(right, Placement::Below)
            .unwrap();
        view.host_mut().set_diff_mode(foreign, true);

        view.handle_action(ViewAction::WindowEntered(foreign));
        assert!(!view.host().diff_mode(foreign));

        // Own panes keep theirs
        view.handle_action(ViewAction::WindowEntered(right));
        assert!(view.host().diff_mode(right));
        assert_eq!(view.host().diff_mode_cleared(foreign), 1);
    }

    #[test]
    fn test_window_entered_ignored_until_ready() {
        let mut view = new_view(&["a.rs"]);
        view.on_window_entered(crate::WindowId(99));
        assert_eq!(view.host().diff_mode_cleared(crate::WindowId(99)), 0);
    }

    #[test]
    fn test_open_is_ready_and_idempotent() {
        let mut view = new_view(&["a.rs", "b.rs"]);
        assert!(!view.is_ready());

        view.open();
        assert!(view.is_ready());
        assert_eq!(view.active_index(), Some(0));
        assert_eq!(view.panel().rows().len(), 2);
        assert_eq!(view.panel().highlighted(), Some("a.rs"));

        view.open();
        assert_eq!(view.host().tabpages_created(), 1);
        assert_eq!(view.provider().list_calls(), 1);
    }

    #[test]
    fn test_open_with_failing_provider_shows_placeholder() {
        let mut view = new_view(&["a.rs"]);
        view.provider_mut().fail_with("not a repository");

        view.open();

        assert!(view.is_ready());
        assert!(view.is_showing_placeholder());
        let events = view.drain_events();
        assert!(matches!(events.first(), Some(ViewEvent::RefreshFailed(_))));
        assert!(events.contains(&ViewEvent::PlaceholderShown));
    }

    #[test]
    fn test_close_destroys_everything_once() {
        let mut view = open_view(&["a.rs", "b.rs"]);
        view.select_next();
        let tab = view.tabpage().unwrap();

        let (host, panel, _) = view.close();

        let destroyed: Vec<_> = host
            .content_calls()
            .iter()
            .filter(|call| matches!(call, ContentCall::Destroy(_)))
            .cloned()
            .collect();
        assert_eq!(
            destroyed,
            vec![
                ContentCall::Destroy("a.rs".into()),
                ContentCall::Destroy("b.rs".into()),
            ]
        );
        assert!(!host.tabpage_is_valid(tab));
        assert_eq!(crate::SidePanel::window(&panel), None);
    }

    #[test]
    fn test_close_survives_missing_tabpage() {
        let mut view = open_view(&["a.rs"]);
        let tab = view.tabpage().unwrap();
        view.host_mut().close_tabpage(tab);

        let (host, _, _) = view.close();

        assert!(host.tabpages().is_empty());
        assert_eq!(
            host.content_calls().last(),
            Some(&ContentCall::Destroy("a.rs".into()))
        );
    }
}
