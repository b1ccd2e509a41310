use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::games::GameBroadcaster;
use crate::log;
use super::engine::{SimulationEngine, StepOutcome};
use super::game_state::EngineStatus;
use super::settings::SnakeSessionSettings;
use super::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Restart,
    Shutdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub rounds: u32,
    pub best_score: u32,
}

/// Drives `engine` at `settings.tick_interval` until a `Shutdown` command arrives or
/// every command sender is dropped.
///
/// Commands are applied between ticks as they arrive; several turns within one tick
/// collapse into the engine's single pending-direction slot.
pub async fn run_game_loop<B: GameBroadcaster>(
    mut engine: SimulationEngine,
    settings: SnakeSessionSettings,
    broadcaster: B,
    mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
) -> SessionSummary {
    let mut timer = interval(settings.tick_interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks: u64 = 0;

    log!(
        "Session started: {}x{} grid, tick {}ms, seed {}",
        settings.grid_size,
        settings.grid_size,
        settings.tick_interval.as_millis(),
        engine.seed()
    );
    broadcaster.broadcast_state(engine.snapshot()).await;

    loop {
        tokio::select! {
            _ = timer.tick() => {
                if matches!(engine.status(), EngineStatus::GameOver { .. }) && settings.auto_restart {
                    engine.reset();
                }

                let outcome = engine.step();
                if outcome != StepOutcome::Idle {
                    ticks += 1;
                }
                if let StepOutcome::GameOver { reason, final_score } = outcome {
                    broadcaster.broadcast_round_over(reason, final_score).await;
                }
                broadcaster.broadcast_state(engine.snapshot()).await;
            }
            command = command_rx.recv() => {
                match command {
                    Some(SessionCommand::Turn(direction)) => {
                        engine.set_pending_direction(direction);
                    }
                    Some(SessionCommand::Restart) => {
                        engine.reset();
                        broadcaster.broadcast_state(engine.snapshot()).await;
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                }
            }
        }
    }

    let summary = SessionSummary {
        ticks,
        rounds: engine.round(),
        best_score: engine.best_score(),
    };
    log!(
        "Session finished after {} ticks, {} rounds, best score {}",
        summary.ticks,
        summary.rounds,
        summary.best_score
    );
    summary
}
