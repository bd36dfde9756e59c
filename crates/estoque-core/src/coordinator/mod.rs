// ── Mutation coordinator ──
//
// Owns the single active workflow (idle / editing / confirming delete),
// submits edits, deletes and creates through the store's client, and asks
// the store to refetch after every confirmed mutation. The collection is
// never patched locally.

mod workflow;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::convert;
use crate::error::CoreError;
use crate::model::Item;
use crate::store::InventoryStore;

pub use workflow::{DraftItem, EditBuffer, EditField, EditSession, PendingDelete, WorkflowState};

/// Label used when the item pending deletion is no longer in the store.
const UNKNOWN_ITEM_LABEL: &str = "this item";

/// Drives edit, delete and create workflows against one store.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`.
#[derive(Clone)]
pub struct MutationCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    store: Arc<InventoryStore>,
    workflow: watch::Sender<WorkflowState>,
    sessions: AtomicU64,
    creating: AtomicBool,
}

impl MutationCoordinator {
    pub fn new(store: Arc<InventoryStore>) -> Self {
        let (workflow, _) = watch::channel(WorkflowState::Idle);
        Self {
            inner: Arc::new(CoordinatorInner {
                store,
                workflow,
                sessions: AtomicU64::new(0),
                creating: AtomicBool::new(false),
            }),
        }
    }

    pub fn store(&self) -> &Arc<InventoryStore> {
        &self.inner.store
    }

    // ── State observation ────────────────────────────────────────────

    pub fn workflow(&self) -> WorkflowState {
        self.inner.workflow.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.inner.workflow.subscribe()
    }

    /// What to call the item awaiting delete confirmation: its display
    /// name, or a generic label once it has left the collection. `None`
    /// when no delete is pending.
    pub fn delete_label(&self) -> Option<String> {
        let item_id = match &*self.inner.workflow.borrow() {
            WorkflowState::ConfirmingDelete(pending) => pending.item_id,
            _ => return None,
        };
        let label = self
            .inner
            .store
            .item(item_id)
            .map(|item| item.display_name())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_ITEM_LABEL.to_owned());
        Some(label)
    }

    // ── Edit workflow ────────────────────────────────────────────────

    /// Start editing `item`, replacing whatever workflow was active.
    pub fn begin_edit(&self, item: &Item) {
        let session = self.next_session();
        let previous = self.inner.workflow.send_replace(WorkflowState::Editing(EditSession {
            session,
            item: item.clone(),
            buffer: EditBuffer::seeded(item),
            save_error: None,
            saving: false,
        }));
        debug!(id = item.id, session, replaced = ?previous.session(), "editing item");
    }

    /// Overwrite one field of the edit buffer.
    pub fn update_field(&self, field: EditField, value: impl Into<String>) -> Result<(), CoreError> {
        let value = value.into();
        let mut applied = false;
        self.inner.workflow.send_if_modified(|state| {
            let WorkflowState::Editing(edit) = state else {
                return false;
            };
            edit.buffer.set(field, value);
            applied = true;
            true
        });
        if applied {
            Ok(())
        } else {
            Err(CoreError::NoActiveEdit)
        }
    }

    /// Submit the edit buffer as an update of the item being edited.
    ///
    /// On success the workflow returns to idle and the store refetches.
    /// On failure the workflow stays in editing with `save_error` set and
    /// the collection is not touched.
    pub async fn submit_edit(&self) -> Result<(), CoreError> {
        let mut claim = Err(CoreError::NoActiveEdit);
        self.inner.workflow.send_if_modified(|state| {
            let WorkflowState::Editing(edit) = state else {
                return false;
            };
            if edit.saving {
                claim = Err(CoreError::SubmitInProgress { operation: "save" });
                return false;
            }
            edit.saving = true;
            edit.save_error = None;
            claim = Ok((edit.session, edit.item.id, edit.buffer.to_write(&edit.item)));
            true
        });
        let (session, id, body) = claim?;
        let _claim = InFlight {
            workflow: &self.inner.workflow,
            session,
        };

        debug!(id, session, "submitting edit");
        match self.inner.store.client().update_item(id, &body).await {
            Ok(()) => {
                info!(id, "item updated");
                self.settle(session);
                self.inner.store.refresh().await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(id, error = %err, "edit rejected");
                let message = err.user_message();
                self.inner.workflow.send_if_modified(|state| match state {
                    WorkflowState::Editing(edit) if edit.session == session => {
                        edit.saving = false;
                        edit.save_error = Some(message);
                        true
                    }
                    _ => false,
                });
                Err(err)
            }
        }
    }

    pub fn cancel_edit(&self) {
        self.inner.workflow.send_if_modified(|state| {
            if matches!(state, WorkflowState::Editing(_)) {
                *state = WorkflowState::Idle;
                true
            } else {
                false
            }
        });
    }

    // ── Delete workflow ──────────────────────────────────────────────

    /// Ask for confirmation to delete `item_id`, replacing whatever
    /// workflow was active.
    pub fn begin_delete(&self, item_id: i64) {
        let session = self.next_session();
        let previous = self
            .inner
            .workflow
            .send_replace(WorkflowState::ConfirmingDelete(PendingDelete {
                session,
                item_id,
                deleting: false,
            }));
        debug!(id = item_id, session, replaced = ?previous.session(), "confirming delete");
    }

    /// Delete the pending item. The workflow returns to idle whatever the
    /// outcome; only a successful delete refetches.
    pub async fn confirm_delete(&self) -> Result<(), CoreError> {
        let mut claim = Err(CoreError::NoPendingDelete);
        self.inner.workflow.send_if_modified(|state| {
            let WorkflowState::ConfirmingDelete(pending) = state else {
                return false;
            };
            if pending.deleting {
                claim = Err(CoreError::SubmitInProgress {
                    operation: "delete",
                });
                return false;
            }
            pending.deleting = true;
            claim = Ok((pending.session, pending.item_id));
            true
        });
        let (session, id) = claim?;
        let _claim = InFlight {
            workflow: &self.inner.workflow,
            session,
        };

        debug!(id, session, "deleting item");
        let result = self.inner.store.client().delete_item(id).await;
        self.settle(session);

        match result {
            Ok(()) => {
                info!(id, "item deleted");
                self.inner.store.refresh().await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(id, error = %err, "delete failed");
                Err(err)
            }
        }
    }

    pub fn cancel_delete(&self) {
        self.inner.workflow.send_if_modified(|state| {
            if matches!(state, WorkflowState::ConfirmingDelete(_)) {
                *state = WorkflowState::Idle;
                true
            } else {
                false
            }
        });
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Create an item from operator input and refetch on success.
    ///
    /// Independent of the edit/delete workflow; only one create may be in
    /// flight at a time.
    pub async fn create_item(&self, draft: &DraftItem) -> Result<Item, CoreError> {
        if draft.effective_name().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "item name must not be empty".into(),
            });
        }
        if self
            .inner
            .creating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CoreError::SubmitInProgress {
                operation: "create",
            });
        }

        let slot = CreateSlot(&self.inner.creating);
        let result = self.inner.store.client().create_item(&draft.to_write()).await;
        drop(slot);
        let raw = result.map_err(|e| {
            let err = CoreError::from(e);
            warn!(error = %err, "create rejected");
            err
        })?;

        let mut warnings = Vec::new();
        let item = convert::sanitize(raw, &mut warnings);
        for warning in &warnings {
            warn!(%warning, "defaulted numeric field");
        }
        info!(id = item.id, "item created");
        self.inner.store.refresh().await;
        Ok(item)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn next_session(&self) -> u64 {
        self.inner.sessions.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Return to idle if `session` still owns the workflow.
    fn settle(&self, session: u64) {
        self.inner.workflow.send_if_modified(|state| {
            if state.session() == Some(session) {
                *state = WorkflowState::Idle;
                true
            } else {
                false
            }
        });
    }
}

// ── In-flight guards ────────────────────────────────────────────────

/// Clears the `saving` / `deleting` flag of `session` when its request ends
/// without settling the workflow, including when the future is dropped.
struct InFlight<'a> {
    workflow: &'a watch::Sender<WorkflowState>,
    session: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let session = self.session;
        self.workflow.send_if_modified(|state| match state {
            WorkflowState::Editing(edit) if edit.session == session && edit.saving => {
                edit.saving = false;
                true
            }
            WorkflowState::ConfirmingDelete(pending)
                if pending.session == session && pending.deleting =>
            {
                pending.deleting = false;
                true
            }
            _ => false,
        });
    }
}

/// Releases the single create slot on every exit path.
struct CreateSlot<'a>(&'a AtomicBool);

impl Drop for CreateSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
