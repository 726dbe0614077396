//! List Panel State
//!
//! Plain view-model behind the TodoList component: the displayed snapshot,
//! the loading flag, the add-form draft, the inline edit session and the
//! failure banner.

use std::fmt;

use crate::domain::{normalize_text, DomainError, Item, ItemId, Snapshot};

/// What happens to a failed store request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log and show a banner
    #[default]
    Surface,
    /// Log only
    LogOnly,
}

/// User actions that can fail against a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Add,
    Toggle,
    Edit,
    Delete,
    Subscribe,
}

impl fmt::Display for PanelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            PanelAction::Add => "add the todo",
            PanelAction::Toggle => "update the todo",
            PanelAction::Edit => "save the todo",
            PanelAction::Delete => "delete the todo",
            PanelAction::Subscribe => "load todos",
        };
        f.write_str(verb)
    }
}

/// Row currently being edited inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: ItemId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    items: Vec<Item>,
    loading: bool,
    draft: String,
    editing: Option<EditSession>,
    error: Option<String>,
    policy: FailurePolicy,
}

impl PanelState {
    /// State of a freshly mounted panel: loading until the first snapshot
    pub fn mounting(policy: FailurePolicy) -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            draft: String::new(),
            editing: None,
            error: None,
            policy,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editing(&self, id: &ItemId) -> bool {
        self.editing.as_ref().is_some_and(|e| &e.id == id)
    }

    /// Replace the displayed list wholesale
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.items = snapshot;
        self.loading = false;
        if let Some(session) = &self.editing {
            if !self.items.iter().any(|item| item.id == session.id) {
                self.editing = None;
            }
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Trimmed draft, or `None` when submitting would be a no-op
    pub fn pending_submission(&self) -> Option<String> {
        normalize_text(&self.draft)
    }

    pub fn submission_succeeded(&mut self) {
        self.draft.clear();
    }

    /// Enter edit mode for `id`, seeded with its current text
    pub fn begin_edit(&mut self, id: &ItemId) {
        if let Some(item) = self.items.iter().find(|item| &item.id == id) {
            self.editing = Some(EditSession {
                id: item.id.clone(),
                text: item.text.clone(),
            });
        }
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some(session) = &mut self.editing {
            session.text = text.into();
        }
    }

    /// Leave edit mode, yielding the edit to commit
    pub fn take_edit_commit(&mut self) -> Option<EditSession> {
        self.editing.take()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn report_failure(&mut self, action: PanelAction, error: &DomainError) {
        log::error!("[PANEL] Failed to {}: {}", action, error);
        if action == PanelAction::Subscribe {
            // no snapshot is coming; show the (empty) list instead of the placeholder
            self.loading = false;
        }
        if self.policy == FailurePolicy::Surface {
            self.error = Some(format!("Could not {}: {}", action, error));
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::mounting(FailurePolicy::default())
    }
}
