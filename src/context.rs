//! Panel Context
//!
//! Shared state of the list panel provided via Leptos Context API, together
//! with the actions rows and forms trigger against the injected store.

use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use futures::StreamExt;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;

use todo_core::{DomainError, DomainResult, EditSession, ItemId, PanelAction, PanelState, TodoStore};

/// Store handle injected by the app; lives on the UI thread only
pub type SharedStore = Rc<dyn TodoStore>;

/// Panel signals and store handle provided to the panel's children
#[derive(Clone, Copy)]
pub struct PanelContext {
    /// View-model of the panel
    pub state: RwSignal<PanelState>,
    store: StoredValue<SharedStore, LocalStorage>,
}

impl PanelContext {
    pub fn new(state: RwSignal<PanelState>, store: StoredValue<SharedStore, LocalStorage>) -> Self {
        Self { state, store }
    }

    fn fail(&self, action: PanelAction, error: DomainError) {
        let _ = self.state.try_update(|s| s.report_failure(action, &error));
    }

    /// Run a store request in the background, reporting a failure to the panel
    fn run<F, Fut>(&self, action: PanelAction, op: F)
    where
        F: FnOnce(SharedStore) -> Fut + 'static,
        Fut: Future<Output = DomainResult<()>> + 'static,
    {
        let ctx = *self;
        let store = self.store.get_value();
        spawn_local(async move {
            if let Err(e) = op(store).await {
                ctx.fail(action, e);
            }
        });
    }

    /// Subscribe to snapshots until the returned handle is aborted
    pub fn watch(&self) -> AbortHandle {
        let (handle, registration) = AbortHandle::new_pair();
        let ctx = *self;
        let store = self.store.get_value();

        let task = async move {
            let mut subscription = match store.subscribe().await {
                Ok(subscription) => subscription,
                Err(e) => {
                    ctx.fail(PanelAction::Subscribe, e);
                    return;
                }
            };
            while let Some(snapshot) = subscription.next().await {
                log::debug!("[PANEL] Snapshot with {} items", snapshot.len());
                if ctx.state.try_update(|s| s.apply_snapshot(snapshot)).is_none() {
                    break;
                }
            }
        };
        spawn_local(async move {
            let _ = Abortable::new(task, registration).await;
        });
        handle
    }

    pub fn set_draft(&self, text: String) {
        self.state.update(|s| s.set_draft(text));
    }

    /// Add the current draft; blank drafts are ignored
    pub fn submit(&self) {
        let Some(text) = self.state.with_untracked(|s| s.pending_submission()) else {
            return;
        };
        let ctx = *self;
        let store = self.store.get_value();
        spawn_local(async move {
            match store.add(&text).await {
                Ok(_) => {
                    let _ = ctx.state.try_update(|s| s.submission_succeeded());
                }
                Err(e) => ctx.fail(PanelAction::Add, e),
            }
        });
    }

    pub fn toggle(&self, id: ItemId) {
        self.run(PanelAction::Toggle, move |store| async move { store.toggle(&id).await });
    }

    pub fn delete(&self, id: ItemId) {
        self.run(PanelAction::Delete, move |store| async move { store.delete(&id).await });
    }

    pub fn begin_edit(&self, id: &ItemId) {
        self.state.update(|s| s.begin_edit(id));
    }

    pub fn set_edit_text(&self, text: String) {
        self.state.update(|s| s.set_edit_text(text));
    }

    pub fn cancel_edit(&self) {
        self.state.update(|s| s.cancel_edit());
    }

    /// Leave edit mode and save the edited text
    pub fn commit_edit(&self) {
        let Some(EditSession { id, text }) = self.state.try_update(|s| s.take_edit_commit()).flatten() else {
            return;
        };
        self.run(PanelAction::Edit, move |store| async move {
            store.commit_edit(&id, &text).await
        });
    }

    pub fn dismiss_error(&self) {
        self.state.update(|s| s.dismiss_error());
    }
}
