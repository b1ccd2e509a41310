mod engine;
mod food;
mod game_state;
mod grid;
mod session;
mod settings;
mod snake;
mod types;

pub use engine::{SimulationEngine, StepOutcome};
pub use food::{FoodSpawner, FoodState};
pub use game_state::{CellKind, EngineStatus, GameSnapshot, GameState};
pub use grid::Grid;
pub use session::{run_game_loop, SessionCommand, SessionSummary};
pub use settings::SnakeSessionSettings;
pub use snake::{Segment, SnakeBody};
pub use types::{Cell, Coords, Direction, GameOverReason};
