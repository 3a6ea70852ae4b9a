use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::{ListView, ResourceApi, PER_PAGE};
use crate::error::ServiceError;

/// A [`ListView`] fed by a [`ResourceApi`].
///
/// Each refresh is numbered. A response is applied only if no newer refresh has
/// started and the session is still open; anything else is dropped.
pub struct ListSession<A: ResourceApi> {
    api: Arc<A>,
    view: Mutex<ListView<A::Row>>,
    query: Mutex<A::Query>,
    generation: AtomicU64,
    closed: AtomicBool,
}

impl<A: ResourceApi> ListSession<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_per_page(api, PER_PAGE)
    }

    pub fn with_per_page(api: Arc<A>, per_page: usize) -> Self {
        Self {
            api,
            view: Mutex::new(ListView::new(per_page)),
            query: Mutex::new(A::Query::default()),
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Locks the view for reading or for sort/page transitions.
    pub async fn view(&self) -> MutexGuard<'_, ListView<A::Row>> {
        self.view.lock().await
    }

    /// The query of the latest refresh.
    pub async fn query(&self) -> A::Query {
        self.query.lock().await.clone()
    }

    /// Fetches rows for `query` and loads them into the view.
    ///
    /// A closed session sends nothing. A stale response returns `Ok(())` without
    /// touching the view.
    #[instrument(skip_all)]
    pub async fn refresh(&self, query: A::Query) -> Result<(), ServiceError> {
        if self.is_closed() {
            debug!("Session closed, skipping refresh");
            return Ok(());
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.query.lock().await = query.clone();
        self.view.lock().await.start_loading();

        let result = self.api.list(query).await;

        let mut view = self.view.lock().await;
        if self.is_closed() || self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Dropping stale list response");
            return Ok(());
        }
        match result {
            Ok(rows) => {
                debug!(generation, rows = rows.len(), "List loaded");
                view.load(rows);
                Ok(())
            }
            Err(e) => {
                warn!(generation, error = %e, "List failed");
                view.fail(e.user_message());
                Err(e)
            }
        }
    }

    /// Fetches again with the latest query.
    pub async fn reload(&self) -> Result<(), ServiceError> {
        let query = self.query().await;
        self.refresh(query).await
    }

    /// Stops applying responses. Requests already in flight are not aborted.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
