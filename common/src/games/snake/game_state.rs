use super::food::{FoodSpawner, FoodState};
use super::grid::Grid;
use super::snake::{Segment, SnakeBody};
use super::types::{Cell, Coords, Direction, GameOverReason};

/// Distance, in row-major cell numbers, from the start cell to the first food.
const START_FOOD_OFFSET: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    Running,
    GameOver {
        reason: GameOverReason,
        final_score: u32,
    },
}

impl EngineStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, EngineStatus::Running)
    }
}

/// What a renderer needs to know about one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Snake,
    Food,
    ReversalFood,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: SnakeBody,
    /// `None` only on a board with no room for food besides the snake (a 1x1 grid).
    pub food: Option<FoodState>,
    pub direction: Direction,
    pub score: u32,
}

impl GameState {
    /// Fresh round: one segment at `(round(N/3), round(N/3))` heading right, food five
    /// cells further on in row-major order.
    pub fn new_round(grid: &Grid, spawner: &mut FoodSpawner) -> Self {
        // (N + 1) / 3 == round(N / 3) for every positive integer N.
        let start = ((grid.size() + 1) / 3) as i32;
        let coords = Coords::new(start, start);
        let cell = grid
            .cell_at(coords)
            .expect("Start position should lie inside the grid");
        let snake = SnakeBody::new(Segment::new(coords, cell));

        let preferred = Cell(cell.id() + START_FOOD_OFFSET);
        let food = if preferred.id() as usize <= grid.cell_count() && !snake.contains(preferred) {
            Some(FoodState::plain(preferred))
        } else {
            spawner
                .spawn(snake.occupied(), None, grid.cell_count())
                .map(FoodState::plain)
        };

        Self {
            snake,
            food,
            direction: Direction::Right,
            score: 0,
        }
    }

    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        if self.snake.contains(cell) {
            return CellKind::Snake;
        }
        match self.food {
            Some(food) if food.cell == cell && food.is_reversing => CellKind::ReversalFood,
            Some(food) if food.cell == cell => CellKind::Food,
            _ => CellKind::Empty,
        }
    }
}

/// Read-only picture of the engine after a tick, in row-major cell order.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub grid_size: usize,
    pub cells: Vec<CellKind>,
    pub score: u32,
    pub best_score: u32,
    pub round: u32,
    pub tick: u64,
    pub length: usize,
    pub direction: Direction,
    pub status: EngineStatus,
}

impl GameSnapshot {
    pub fn kind_at(&self, row: usize, col: usize) -> Option<CellKind> {
        if row >= self.grid_size || col >= self.grid_size {
            return None;
        }
        self.cells.get(row * self.grid_size + col).copied()
    }
}
