//! Reward record and redeem-state transitions.

use serde::{Deserialize, Serialize};

use super::ids::RewardId;

/// An item redeemable against accumulated challenge points.
///
/// `resgatada` is server truth (has this reward been redeemed);
/// `pending_rescue` follows the same transient-flag discipline as `Task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: RewardId,
    pub nome: String,
    #[serde(rename = "custoPontos")]
    pub custo_pontos: i64,
    pub resgatada: bool,

    #[serde(skip)]
    pub pending_rescue: bool,
}

impl Reward {
    /// Optimistic step: a redeem request is about to go out.
    pub fn mark_in_flight(&mut self) {
        self.pending_rescue = true;
    }

    /// The server confirmed the redemption.
    pub fn commit_rescue(&mut self) {
        self.resgatada = true;
        self.pending_rescue = false;
    }

    /// The request failed; restore the pre-rescue state.
    pub fn revert_rescue(&mut self) {
        self.pending_rescue = false;
    }
}
