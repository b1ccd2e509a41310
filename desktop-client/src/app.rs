use std::time::Duration;

use common::games::snake::SessionCommand;
use eframe::egui;
use tokio::sync::mpsc;

use crate::game_ui::GameUi;
use crate::state::SharedState;

pub struct SnakeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    game_ui: GameUi,
    shutdown_sent: bool,
    tick_interval: Duration,
}

impl SnakeApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<SessionCommand>,
        cell_size: f32,
        tick_interval: Duration,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            game_ui: GameUi::new(cell_size),
            shutdown_sent: false,
            tick_interval,
        }
    }

    fn send_shutdown(&mut self) {
        if !self.shutdown_sent {
            let _ = self.command_tx.send(SessionCommand::Shutdown);
            self.shutdown_sent = true;
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.send_shutdown();
        }

        self.game_ui.handle_input(ctx, &self.command_tx);

        let snapshot = self.shared_state.get_snapshot();
        let last_round_over = self.shared_state.get_round_over();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.game_ui
                .render_game(ui, snapshot.as_ref(), last_round_over);
        });

        // The game thread repaints on every tick; this covers a stalled or finished loop.
        ctx.request_repaint_after(self.tick_interval * 4);
    }
}
