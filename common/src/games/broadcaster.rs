use std::future::Future;

use super::snake::{GameOverReason, GameSnapshot};

/// Receives what the tick driver produces. Implementations push it to whatever
/// presents the game and must never mutate engine state.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_round_over(
        &self,
        reason: GameOverReason,
        final_score: u32,
    ) -> impl Future<Output = ()> + Send;
}
