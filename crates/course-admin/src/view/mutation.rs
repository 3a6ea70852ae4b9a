//! # Mutation Controller
//!
//! Drives one modal: open it on a target, submit or confirm, and on success close it
//! and refetch the list. A failure keeps the modal open with the message so the user
//! can fix the input and retry; nothing is retried automatically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{ListSession, ResourceApi};
use crate::error::ServiceError;

/// State a modal renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState<I> {
    pub is_open: bool,
    /// Row targeted by an edit or delete modal. `None` for create, or when closed.
    pub selected_id: Option<I>,
    pub is_submitting: bool,
    pub is_deleting: bool,
    /// Last user-visible failure, empty when there is none.
    pub error: String,
}

impl<I> Default for ModalState<I> {
    fn default() -> Self {
        Self {
            is_open: false,
            selected_id: None,
            is_submitting: false,
            is_deleting: false,
            error: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The service accepted the change; the modal closed and the list was refetched.
    Completed,
    /// The service rejected the change; see [`ModalState::error`].
    Failed,
    /// Nothing was sent: another mutation is in flight or no row is selected.
    Skipped,
    /// The modal was closed or reopened before the response arrived. Nothing was applied.
    Dropped,
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Submit,
    Delete,
}

/// A mutation that passed the guard, tagged with the modal it was sent from.
struct Ticket<I> {
    generation: u64,
    target: Option<I>,
}

pub struct MutationController<A: ResourceApi> {
    session: Arc<ListSession<A>>,
    state: Mutex<ModalState<A::Id>>,
    /// Bumped by every `open` and `close`, under the `state` lock.
    generation: AtomicU64,
}

impl<A: ResourceApi> MutationController<A> {
    pub fn new(session: Arc<ListSession<A>>) -> Self {
        Self {
            session,
            state: Mutex::new(ModalState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn state(&self) -> ModalState<A::Id> {
        self.state.lock().await.clone()
    }

    /// Opens a fresh modal on `target` (`None` for a create form).
    ///
    /// Whatever the previous modal had in flight no longer applies to this one.
    pub async fn open(&self, target: Option<A::Id>) {
        let mut state = self.state.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = ModalState {
            is_open: true,
            selected_id: target,
            ..ModalState::default()
        };
    }

    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = ModalState::default();
    }

    pub async fn submit_create(&self, params: A::Create) -> MutationOutcome {
        let Some(ticket) = self.begin(Pending::Submit, false).await else {
            return MutationOutcome::Skipped;
        };
        let result = self.session.api().create(params).await.map(|_| ());
        self.finish(ticket.generation, result).await
    }

    /// Updates the selected row.
    pub async fn submit_update(&self, params: A::Update) -> MutationOutcome {
        let Some(Ticket { generation, target }) = self.begin(Pending::Submit, true).await else {
            return MutationOutcome::Skipped;
        };
        let Some(id) = target else {
            return MutationOutcome::Skipped;
        };
        let result = self.session.api().update(id, params).await.map(|_| ());
        self.finish(generation, result).await
    }

    /// Deletes the selected row.
    pub async fn confirm_delete(&self) -> MutationOutcome {
        let Some(Ticket { generation, target }) = self.begin(Pending::Delete, true).await else {
            return MutationOutcome::Skipped;
        };
        let Some(id) = target else {
            return MutationOutcome::Skipped;
        };
        let result = self.session.api().delete(id).await.map(|_| ());
        self.finish(generation, result).await
    }

    /// Raises the in-flight flag, or returns `None` when the guard refuses.
    async fn begin(&self, pending: Pending, needs_target: bool) -> Option<Ticket<A::Id>> {
        let mut state = self.state.lock().await;
        if state.is_submitting || state.is_deleting {
            debug!(?pending, "Mutation already in flight");
            return None;
        }
        if needs_target && state.selected_id.is_none() {
            debug!(?pending, "No row selected");
            return None;
        }
        match pending {
            Pending::Submit => state.is_submitting = true,
            Pending::Delete => state.is_deleting = true,
        }
        Some(Ticket {
            generation: self.generation.load(Ordering::SeqCst),
            target: state.selected_id.clone(),
        })
    }

    async fn finish(&self, generation: u64, result: Result<(), ServiceError>) -> MutationOutcome {
        {
            let mut state = self.state.lock().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "Dropping response for a replaced modal");
                return MutationOutcome::Dropped;
            }
            state.is_submitting = false;
            state.is_deleting = false;
            match &result {
                Ok(()) => {
                    state.is_open = false;
                    state.selected_id = None;
                    state.error.clear();
                }
                Err(e) => {
                    debug!(error = %e, "Mutation failed");
                    state.error = e.user_message();
                }
            }
        }

        match result {
            Ok(()) => {
                if let Err(e) = self.session.reload().await {
                    warn!(error = %e, "Refetch after mutation failed");
                }
                MutationOutcome::Completed
            }
            Err(_) => MutationOutcome::Failed,
        }
    }
}
