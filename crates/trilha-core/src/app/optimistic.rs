//! OptimisticList - the mark → commit/revert rescue protocol.
//!
//! Design intent:
//! - One state machine for completing tasks and redeeming rewards; the item
//!   type plugs in through `Rescuable` (id extraction + the three state
//!   transforms) and the confirming endpoint through a url builder.
//! - The collection snapshot is the single source of truth for item state.
//!   `rescue` flips the transient flag before any suspension point, then
//!   reconciles with the server outcome: commit on success, revert on
//!   failure. No partial commits.
//! - `rescue` never fails out of its boundary: every outcome is reported
//!   through the notification slot and the collection state.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::domain::reward::Reward;
use crate::domain::task::Task;
use crate::ports::http::{HttpClient, Method};

use super::notifier::NotificationCenter;
use super::request::{FetchState, NO_BODY, RequestUnit};
use super::session::SessionStore;

/// Item that can go through the mark → commit/revert cycle.
pub trait Rescuable: Clone + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + PartialEq + fmt::Display + Send + Sync;

    fn id(&self) -> &Self::Id;

    /// Is a confirming request for this item outstanding right now?
    fn in_flight(&self) -> bool;

    fn mark_in_flight(&mut self);

    fn commit_rescue(&mut self);

    fn revert_rescue(&mut self);
}

impl Rescuable for Task {
    type Id = crate::domain::TaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn in_flight(&self) -> bool {
        self.pending_rescue
    }

    fn mark_in_flight(&mut self) {
        Task::mark_in_flight(self);
    }

    fn commit_rescue(&mut self) {
        Task::commit_rescue(self);
    }

    fn revert_rescue(&mut self) {
        Task::revert_rescue(self);
    }
}

impl Rescuable for Reward {
    type Id = crate::domain::RewardId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn in_flight(&self) -> bool {
        self.pending_rescue
    }

    fn mark_in_flight(&mut self) {
        Reward::mark_in_flight(self);
    }

    fn commit_rescue(&mut self) {
        Reward::commit_rescue(self);
    }

    fn revert_rescue(&mut self) {
        Reward::revert_rescue(self);
    }
}

/// Fired after a rescue commits. Task lists hang the points refresh here.
#[async_trait]
pub trait CommitHook: Send + Sync {
    async fn after_commit(&self);
}

/// User-facing wording for one list's outcomes.
#[derive(Debug, Clone)]
pub struct RescueMessages {
    pub success: String,
    pub failure_fallback: String,
}

impl RescueMessages {
    pub fn tasks() -> Self {
        Self {
            success: "Tarefa concluída com sucesso!".to_string(),
            failure_fallback: "Erro ao resgatar tarefa.".to_string(),
        }
    }

    pub fn rewards() -> Self {
        Self {
            success: "Recompensa resgatada com sucesso!".to_string(),
            failure_fallback: "Não foi possível resgatar a recompensa.".to_string(),
        }
    }
}

type ConfirmUrl<I> = Box<dyn Fn(&<I as Rescuable>::Id) -> String + Send + Sync>;

pub struct OptimisticList<I: Rescuable> {
    items: Arc<Mutex<Vec<I>>>,
    list_unit: RequestUnit<Vec<I>>,
    confirm_unit: RequestUnit<serde_json::Value>,
    list_url: String,
    confirm_url: ConfirmUrl<I>,
    messages: RescueMessages,
    notifier: NotificationCenter,
    on_commit: Option<Arc<dyn CommitHook>>,
}

impl<I: Rescuable> OptimisticList<I> {
    pub fn new(
        http: Arc<dyn HttpClient>,
        session: SessionStore,
        notifier: NotificationCenter,
        list_url: String,
        confirm_url: impl Fn(&I::Id) -> String + Send + Sync + 'static,
        messages: RescueMessages,
        on_commit: Option<Arc<dyn CommitHook>>,
    ) -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
            list_unit: RequestUnit::new(Arc::clone(&http), session.clone()),
            confirm_unit: RequestUnit::new(http, session),
            list_url,
            confirm_url: Box::new(confirm_url),
            messages,
            notifier,
            on_commit,
        }
    }

    /// Fetch the collection; on failure the previous snapshot stays in place
    /// and the reason is readable from `list_state().error`.
    pub async fn load(&self) -> bool {
        match self.list_unit.fetch(&self.list_url).await {
            Some(items) => {
                *self.items.lock().await = items;
                true
            }
            None => false,
        }
    }

    /// Current collection snapshot.
    pub async fn items(&self) -> Vec<I> {
        self.items.lock().await.clone()
    }

    /// Loading/error state of the list fetch (for display).
    pub async fn list_state(&self) -> FetchState<Vec<I>> {
        self.list_unit.state().await
    }

    /// Complete a task / redeem a reward, optimistically.
    ///
    /// Preconditions (advisory, client-only): the id is present in the
    /// current snapshot and has no outstanding request. A miss is a no-op,
    /// never an error.
    pub async fn rescue(&self, id: &I::Id) {
        {
            let mut items = self.items.lock().await;
            let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
                debug!("rescue ignored: {id} is not in the current snapshot");
                return;
            };
            if item.in_flight() {
                debug!("rescue ignored: {id} already has a request outstanding");
                return;
            }
            // Optimistic step, inside the lock scope and before the first
            // suspension point: callers observe the flag immediately.
            item.mark_in_flight();
        }

        let url = (self.confirm_url)(id);
        let confirmed = self
            .confirm_unit
            .execute(&url, Method::Put, NO_BODY)
            .await
            .is_some();

        if confirmed {
            {
                let mut items = self.items.lock().await;
                if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
                    item.commit_rescue();
                }
            }
            self.notifier.success(self.messages.success.clone()).await;
            // Reconcile server-computed fields.
            self.load().await;
            if let Some(hook) = &self.on_commit {
                hook.after_commit().await;
            }
        } else {
            {
                let mut items = self.items.lock().await;
                if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
                    item.revert_rescue();
                }
            }
            let message = self
                .confirm_unit
                .state()
                .await
                .error
                .unwrap_or_else(|| self.messages.failure_fallback.clone());
            self.notifier.error(message).await;
        }
    }
}
