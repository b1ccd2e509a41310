use common::games::snake::{GameOverReason, GameSnapshot};
use eframe::egui;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOver {
    pub reason: GameOverReason,
    pub final_score: u32,
}

/// State written by the game thread and read by the UI thread.
#[derive(Clone)]
pub struct SharedState {
    snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    last_round_over: Arc<Mutex<Option<RoundOver>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(None)),
            last_round_over: Arc::new(Mutex::new(None)),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    pub fn get_snapshot(&self) -> Option<GameSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }

    pub fn set_round_over(&self, round_over: RoundOver) {
        *self.last_round_over.lock().unwrap() = Some(round_over);
    }

    pub fn get_round_over(&self) -> Option<RoundOver> {
        *self.last_round_over.lock().unwrap()
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().unwrap().is_some()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *self.context.lock().unwrap() = Some(ctx);
    }

    pub fn request_repaint(&self) {
        if let Some(ctx) = self.context.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }
}
