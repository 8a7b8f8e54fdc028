//! ChallengeDirectory - listing and the three create flows.
//!
//! Creation is deliberately unceremonious: validate, POST once, report. No
//! optimism and no rollback; the created entity only shows up through the
//! next listing, which keeps the server authoritative over ids and derived
//! fields.

use std::sync::Arc;

use crate::api::routes::Routes;
use crate::api::wire::{CreateChallengeRequest, CreateRewardRequest, CreateTaskRequest};
use crate::domain::{Challenge, ChallengeId, ValidationErrors};
use crate::ports::http::{HttpClient, Method};

use super::notifier::NotificationCenter;
use super::request::{FetchState, RequestUnit};
use super::session::SessionStore;

pub struct ChallengeDirectory {
    routes: Routes,
    notifier: NotificationCenter,
    list_unit: RequestUnit<Vec<Challenge>>,
    create_unit: RequestUnit<serde_json::Value>,
}

impl ChallengeDirectory {
    pub fn new(
        http: Arc<dyn HttpClient>,
        routes: Routes,
        session: SessionStore,
        notifier: NotificationCenter,
    ) -> Self {
        Self {
            routes,
            notifier,
            list_unit: RequestUnit::new(Arc::clone(&http), session.clone()),
            create_unit: RequestUnit::new(http, session),
        }
    }

    /// Fetch the challenge list.
    pub async fn load(&self) -> bool {
        self.list_unit.fetch(&self.routes.challenges()).await.is_some()
    }

    /// Last fetched list (empty until the first successful load).
    pub async fn challenges(&self) -> Vec<Challenge> {
        self.list_unit.state().await.data.unwrap_or_default()
    }

    pub async fn list_state(&self) -> FetchState<Vec<Challenge>> {
        self.list_unit.state().await
    }

    pub async fn create_challenge(
        &self,
        draft: CreateChallengeRequest,
    ) -> Result<bool, ValidationErrors> {
        self.validate(draft.validate()).await?;
        self.submit(
            &self.routes.challenges(),
            &draft,
            "Desafio criado com sucesso!",
            "Falha ao criar desafio",
        )
        .await
    }

    pub async fn create_task(
        &self,
        challenge: &ChallengeId,
        draft: CreateTaskRequest,
    ) -> Result<bool, ValidationErrors> {
        self.validate(draft.validate()).await?;
        self.submit(
            &self.routes.challenge_tasks(challenge),
            &draft,
            "Tarefa criada com sucesso!",
            "Falha ao criar tarefa",
        )
        .await
    }

    pub async fn create_reward(
        &self,
        draft: CreateRewardRequest,
    ) -> Result<bool, ValidationErrors> {
        self.validate(draft.validate()).await?;
        self.submit(
            &self.routes.create_reward(),
            &draft,
            "Recompensa criada com sucesso!",
            "Falha ao criar recompensa",
        )
        .await
    }

    /// Inline errors block submission; the slot also gets the generic nudge.
    async fn validate(&self, result: Result<(), ValidationErrors>) -> Result<(), ValidationErrors> {
        if let Err(errors) = result {
            self.notifier.error("Preencha todos os campos").await;
            return Err(errors);
        }
        Ok(())
    }

    async fn submit<B: serde::Serialize>(
        &self,
        url: &str,
        draft: &B,
        success: &str,
        failure_prefix: &str,
    ) -> Result<bool, ValidationErrors> {
        match self.create_unit.execute(url, Method::Post, Some(draft)).await {
            Some(_) => {
                self.notifier.success(success).await;
                Ok(true)
            }
            None => {
                let reason = self
                    .create_unit
                    .state()
                    .await
                    .error
                    .unwrap_or_else(|| "Erro desconhecido".to_string());
                self.notifier.error(format!("{failure_prefix}: {reason}")).await;
                Ok(false)
            }
        }
    }
}
