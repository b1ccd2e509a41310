use common::games::GameBroadcaster;
use common::games::snake::{GameOverReason, GameSnapshot};

use crate::state::{RoundOver, SharedState};

#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl GameBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        self.shared_state.set_snapshot(snapshot);
        self.shared_state.request_repaint();
    }

    async fn broadcast_round_over(&self, reason: GameOverReason, final_score: u32) {
        self.shared_state.set_round_over(RoundOver {
            reason,
            final_score,
        });
    }
}
