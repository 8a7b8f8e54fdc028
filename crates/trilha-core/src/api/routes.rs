//! Endpoint URL construction.
//!
//! One method per endpoint so call sites never format paths by hand and a
//! route change stays a one-line diff.

use crate::domain::{ChallengeId, RewardId, TaskId};

#[derive(Debug, Clone)]
pub struct Routes {
    base: String,
}

impl Routes {
    /// `base` is the API root, e.g. `http://10.0.2.2:3002/api`.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn login(&self) -> String {
        format!("{}/auth/login", self.base)
    }

    pub fn register(&self) -> String {
        format!("{}/auth/register", self.base)
    }

    pub fn challenges(&self) -> String {
        format!("{}/desafios", self.base)
    }

    pub fn challenge_tasks(&self, challenge: &ChallengeId) -> String {
        format!("{}/desafios/{}/tarefas", self.base, challenge.as_str())
    }

    pub fn complete_task(&self, task: &TaskId) -> String {
        format!("{}/tarefas/{}/concluir", self.base, task.as_str())
    }

    pub fn challenge_rewards(&self, challenge: &ChallengeId) -> String {
        format!("{}/recompensas/{}", self.base, challenge.as_str())
    }

    pub fn create_reward(&self) -> String {
        format!("{}/recompensas", self.base)
    }

    pub fn redeem_reward(&self, reward: &RewardId) -> String {
        format!("{}/recompensas/{}/resgatar", self.base, reward.as_str())
    }

    pub fn user_points(&self, challenge: &ChallengeId) -> String {
        format!("{}/pontos-usuario/{}", self.base, challenge.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_protected_route() {
        let routes = Routes::new("http://localhost:3002/api");
        let c = ChallengeId::new("c1");
        let t = TaskId::new("t1");
        let r = RewardId::new("r1");

        assert_eq!(routes.challenges(), "http://localhost:3002/api/desafios");
        assert_eq!(
            routes.challenge_tasks(&c),
            "http://localhost:3002/api/desafios/c1/tarefas"
        );
        assert_eq!(
            routes.complete_task(&t),
            "http://localhost:3002/api/tarefas/t1/concluir"
        );
        assert_eq!(
            routes.challenge_rewards(&c),
            "http://localhost:3002/api/recompensas/c1"
        );
        assert_eq!(
            routes.redeem_reward(&r),
            "http://localhost:3002/api/recompensas/r1/resgatar"
        );
        assert_eq!(
            routes.user_points(&c),
            "http://localhost:3002/api/pontos-usuario/c1"
        );
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let routes = Routes::new("http://localhost:3002/api///");
        assert_eq!(routes.login(), "http://localhost:3002/api/auth/login");
    }
}
