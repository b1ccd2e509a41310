use common::games::snake::{Direction, EngineStatus, GameSnapshot, SessionCommand};
use eframe::egui;
use tokio::sync::mpsc;

use crate::colors::{cell_color, BACKGROUND};
use crate::state::RoundOver;

const CELL_GAP: f32 = 1.0;

pub fn direction_for_key(key: egui::Key) -> Option<Direction> {
    match key {
        egui::Key::ArrowUp | egui::Key::W => Some(Direction::Up),
        egui::Key::ArrowRight | egui::Key::D => Some(Direction::Right),
        egui::Key::ArrowDown | egui::Key::S => Some(Direction::Down),
        egui::Key::ArrowLeft | egui::Key::A => Some(Direction::Left),
        _ => None,
    }
}

pub struct GameUi {
    cell_size: f32,
}

impl GameUi {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    pub fn handle_input(
        &self,
        ctx: &egui::Context,
        command_tx: &mpsc::UnboundedSender<SessionCommand>,
    ) {
        let commands: Vec<SessionCommand> = ctx.input(|i| {
            let mut commands = Vec::new();
            for event in &i.events {
                if let egui::Event::Key {
                    key, pressed: true, ..
                } = event
                {
                    if let Some(direction) = direction_for_key(*key) {
                        commands.push(SessionCommand::Turn(direction));
                    } else if matches!(key, egui::Key::Space | egui::Key::Enter) {
                        commands.push(SessionCommand::Restart);
                    }
                }
            }
            commands
        });

        for command in commands {
            let _ = command_tx.send(command);
        }
    }

    pub fn render_game(
        &self,
        ui: &mut egui::Ui,
        snapshot: Option<&GameSnapshot>,
        last_round_over: Option<RoundOver>,
    ) {
        let Some(state) = snapshot else {
            ui.heading("Starting game...");
            ui.spinner();
            return;
        };

        ui.horizontal(|ui| {
            ui.heading(format!("Score: {}", state.score));
            ui.separator();
            ui.label(format!("Best: {}", state.best_score));
            ui.separator();
            ui.label(format!("Round {}", state.round));
            ui.separator();
            ui.label(format!("Length {}", state.length));
        });
        ui.separator();

        let canvas_side = state.grid_size as f32 * self.cell_size;
        let (response, painter) = ui.allocate_painter(
            egui::Vec2::new(canvas_side, canvas_side),
            egui::Sense::hover(),
        );
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, BACKGROUND);

        for (index, kind) in state.cells.iter().enumerate() {
            let row = index / state.grid_size;
            let col = index % state.grid_size;
            let min = egui::pos2(
                rect.min.x + col as f32 * self.cell_size + CELL_GAP,
                rect.min.y + row as f32 * self.cell_size + CELL_GAP,
            );
            let cell_rect = egui::Rect::from_min_size(
                min,
                egui::vec2(self.cell_size - 2.0 * CELL_GAP, self.cell_size - 2.0 * CELL_GAP),
            );
            painter.rect_filled(cell_rect, 2.0, cell_color(*kind));
        }

        ui.separator();
        match state.status {
            EngineStatus::GameOver {
                reason,
                final_score,
            } => {
                ui.heading(format!("Game over: the snake {}.", reason));
                ui.label(format!("Final score: {}. Press Space to play again.", final_score));
            }
            EngineStatus::Running => {
                if let Some(round_over) = last_round_over {
                    ui.label(format!(
                        "Last round: {} points, the snake {}.",
                        round_over.final_score, round_over.reason
                    ));
                }
                ui.label("Arrow keys or WASD to steer. Purple food turns the snake around.");
            }
        }
    }
}
