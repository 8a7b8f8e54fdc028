//! ChallengeBoard - everything one challenge's views observe.
//!
//! Owns the task list, the reward list and the points balance for a single
//! challenge. The two lists are independent units (their requests may be in
//! flight concurrently; each settles into its own state), and the task list's
//! commit hook is the one place the cross-entity trigger is wired: a
//! committed completion refreshes the balance exactly once.
//!
//! Boards are not shared between callers: two boards for the same challenge
//! are two snapshots, reconciled only through the server.

use std::sync::Arc;

use crate::api::routes::Routes;
use crate::domain::{ChallengeId, Reward, RewardId, Task, TaskCounts, TaskId};
use crate::ports::http::HttpClient;

use super::balance::BalanceSynchronizer;
use super::notifier::NotificationCenter;
use super::optimistic::{OptimisticList, RescueMessages};
use super::session::SessionStore;

pub struct ChallengeBoard {
    challenge_id: ChallengeId,
    tasks: OptimisticList<Task>,
    rewards: OptimisticList<Reward>,
    balance: BalanceSynchronizer,
}

impl ChallengeBoard {
    pub fn new(
        http: Arc<dyn HttpClient>,
        routes: Routes,
        session: SessionStore,
        notifier: NotificationCenter,
        challenge_id: ChallengeId,
    ) -> Self {
        let balance = BalanceSynchronizer::new(
            Arc::clone(&http),
            session.clone(),
            notifier.clone(),
            routes.user_points(&challenge_id),
        );

        let complete_routes = routes.clone();
        let tasks = OptimisticList::new(
            Arc::clone(&http),
            session.clone(),
            notifier.clone(),
            routes.challenge_tasks(&challenge_id),
            move |id: &TaskId| complete_routes.complete_task(id),
            RescueMessages::tasks(),
            Some(Arc::new(balance.clone())),
        );

        let redeem_routes = routes.clone();
        let rewards = OptimisticList::new(
            http,
            session,
            notifier,
            routes.challenge_rewards(&challenge_id),
            move |id: &RewardId| redeem_routes.redeem_reward(id),
            RescueMessages::rewards(),
            None,
        );

        Self {
            challenge_id,
            tasks,
            rewards,
            balance,
        }
    }

    pub fn challenge_id(&self) -> &ChallengeId {
        &self.challenge_id
    }

    /// Initial mount: tasks, rewards and balance fetched concurrently.
    pub async fn load_all(&self) {
        tokio::join!(self.tasks.load(), self.rewards.load(), self.balance.refresh());
    }

    /// Explicit user refresh (pull-to-refresh, screen focus).
    pub async fn refresh(&self) {
        self.load_all().await;
    }

    pub async fn complete_task(&self, id: &TaskId) {
        self.tasks.rescue(id).await;
    }

    pub async fn redeem_reward(&self, id: &RewardId) {
        self.rewards.rescue(id).await;
    }

    pub fn tasks(&self) -> &OptimisticList<Task> {
        &self.tasks
    }

    pub fn rewards(&self) -> &OptimisticList<Reward> {
        &self.rewards
    }

    pub async fn task_counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks.items().await)
    }

    pub async fn points(&self) -> Option<i64> {
        self.balance.value().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::memory_credentials::InMemoryCredentialStore;
    use crate::impls::stub_http::StubHttpClient;

    async fn board(stub: &StubHttpClient) -> ChallengeBoard {
        let session = SessionStore::hydrate(Arc::new(InMemoryCredentialStore::with_token("tok")))
            .await
            .unwrap();
        ChallengeBoard::new(
            Arc::new(stub.clone()),
            Routes::new("http://x/api"),
            session,
            NotificationCenter::default(),
            ChallengeId::new("c1"),
        )
    }

    async fn script_initial(stub: &StubHttpClient) {
        stub.route_json(
            "desafios/c1/tarefas",
            200,
            serde_json::json!([
                { "id": "t1", "descricao": "Correr", "pontos": 10, "status": "PENDENTE" }
            ]),
        )
        .await;
        stub.route_json(
            "recompensas/c1",
            200,
            serde_json::json!([
                { "id": "r1", "nome": "Pizza", "custoPontos": 50, "resgatada": false }
            ]),
        )
        .await;
        stub.route_json("pontos-usuario/c1", 200, serde_json::json!({ "pontos": 30 }))
            .await;
    }

    #[tokio::test]
    async fn load_all_fills_every_view() {
        let stub = StubHttpClient::new();
        script_initial(&stub).await;
        let board = board(&stub).await;

        board.load_all().await;

        assert_eq!(board.tasks().items().await.len(), 1);
        assert_eq!(board.rewards().items().await.len(), 1);
        assert_eq!(board.points().await, Some(30));
        let counts = board.task_counts().await;
        assert_eq!(counts.pendentes, 1);
        assert_eq!(counts.concluidas, 0);
    }

    #[tokio::test]
    async fn completing_a_task_refreshes_the_balance_exactly_once() {
        let stub = StubHttpClient::new();
        script_initial(&stub).await;
        let board = board(&stub).await;
        board.load_all().await;

        // Confirmation, reconciling refetch and the triggered balance read.
        stub.route_json("concluir", 200, serde_json::json!({})).await;
        stub.route_json(
            "desafios/c1/tarefas",
            200,
            serde_json::json!([
                { "id": "t1", "descricao": "Correr", "pontos": 10, "status": "CONCLUIDA" }
            ]),
        )
        .await;
        stub.route_json("pontos-usuario/c1", 200, serde_json::json!({ "pontos": 40 }))
            .await;

        board.complete_task(&TaskId::new("t1")).await;

        assert_eq!(board.points().await, Some(40));
        assert_eq!(stub.requests_matching("pontos-usuario").await, 2);

        let counts = board.task_counts().await;
        assert_eq!(counts.concluidas, 1);
        assert_eq!(counts.in_flight, 0);
    }

    #[tokio::test]
    async fn a_failed_completion_never_touches_the_balance() {
        let stub = StubHttpClient::new();
        script_initial(&stub).await;
        let board = board(&stub).await;
        board.load_all().await;

        stub.route_json("concluir", 400, serde_json::json!({ "message": "tarde demais" }))
            .await;

        board.complete_task(&TaskId::new("t1")).await;

        // Only the initial mount read the balance.
        assert_eq!(stub.requests_matching("pontos-usuario").await, 1);
        assert_eq!(board.points().await, Some(30));
    }

    #[tokio::test]
    async fn redeeming_a_reward_does_not_touch_the_balance_endpoint() {
        let stub = StubHttpClient::new();
        script_initial(&stub).await;
        let board = board(&stub).await;
        board.load_all().await;

        stub.route_json("resgatar", 200, serde_json::json!({})).await;
        stub.route_json(
            "recompensas/c1",
            200,
            serde_json::json!([
                { "id": "r1", "nome": "Pizza", "custoPontos": 50, "resgatada": true }
            ]),
        )
        .await;

        board.redeem_reward(&RewardId::new("r1")).await;

        assert!(board.rewards().items().await[0].resgatada);
        assert_eq!(stub.requests_matching("pontos-usuario").await, 1);
    }
}
