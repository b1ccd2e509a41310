use crate::games::SessionRng;
use crate::log;
use super::food::{FoodSpawner, FoodState};
use super::game_state::{CellKind, EngineStatus, GameSnapshot, GameState};
use super::grid::Grid;
use super::settings::SnakeSessionSettings;
use super::snake::SnakeBody;
use super::types::{Cell, Direction, GameOverReason};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate {
        reversed: bool,
        score: u32,
    },
    /// The round ended on this tick. The engine already holds the next round's state.
    GameOver {
        reason: GameOverReason,
        final_score: u32,
    },
    /// `step` was called while the engine waits for `reset`.
    Idle,
}

pub struct SimulationEngine {
    grid: Grid,
    state: GameState,
    status: EngineStatus,
    pending_direction: Option<Direction>,
    spawner: FoodSpawner,
    best_score: u32,
    round: u32,
    tick: u64,
}

impl SimulationEngine {
    pub fn new(settings: &SnakeSessionSettings, rng: SessionRng) -> Result<Self, String> {
        let grid = Grid::new(settings.grid_size)?;
        if !(0.0..=1.0).contains(&settings.reversal_food_probability) {
            return Err("Reversal food probability must be between 0.0 and 1.0".to_string());
        }
        let mut spawner = FoodSpawner::new(rng, settings.reversal_food_probability);
        let state = GameState::new_round(&grid, &mut spawner);

        Ok(Self {
            grid,
            state,
            status: EngineStatus::Running,
            pending_direction: None,
            spawner,
            best_score: 0,
            round: 1,
            tick: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.state.snake
    }

    pub fn food(&self) -> Option<FoodState> {
        self.state.food
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    /// Queues `requested` for the next tick, replacing any earlier request.
    ///
    /// A snake longer than one segment cannot turn straight back into itself, so the
    /// opposite of the current direction is ignored for it. Returns whether the request
    /// was taken.
    pub fn set_pending_direction(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(self.state.direction) && self.state.snake.len() > 1 {
            return false;
        }
        self.pending_direction = Some(requested);
        true
    }

    /// Starts a new round. Score and snake are rebuilt even if the engine is running.
    pub fn reset(&mut self) {
        self.state = GameState::new_round(&self.grid, &mut self.spawner);
        self.status = EngineStatus::Running;
        self.pending_direction = None;
        self.round += 1;
    }

    pub fn step(&mut self) -> StepOutcome {
        if !self.status.is_running() {
            return StepOutcome::Idle;
        }
        self.tick += 1;

        if let Some(direction) = self.pending_direction.take() {
            self.state.direction = direction;
        }

        let next_coords = self.state.snake.head().coords.step(self.state.direction);
        let Some(next_cell) = self.grid.cell_at(next_coords) else {
            return self.game_over(GameOverReason::WallCollision);
        };
        if self.state.snake.contains(next_cell) {
            return self.game_over(GameOverReason::SelfCollision);
        }

        self.state.snake.advance_head(next_coords, next_cell);
        self.state.snake.retreat_tail();

        let Some(food) = self.state.food.filter(|food| food.cell == next_cell) else {
            return StepOutcome::Moved;
        };

        // Taken after the tail moved but before growth; growth keeps it unchanged.
        let tail_direction = self
            .state
            .snake
            .tail_direction()
            .unwrap_or(self.state.direction);
        self.grow(tail_direction);

        if food.is_reversing {
            self.state.snake.reverse();
            self.state.direction = tail_direction.opposite();
            log!(
                "Reversal food eaten at {}, now heading {}",
                next_cell,
                self.state.direction
            );
        }

        self.state.score += 1;
        self.best_score = self.best_score.max(self.state.score);

        let next_food = self.spawner.next_food(
            self.state.snake.occupied(),
            Some(food.cell),
            self.grid.cell_count(),
        );
        let Some(next_food) = next_food else {
            return self.game_over(GameOverReason::BoardFilled);
        };
        self.state.food = Some(next_food);

        log!(
            "Ate food at {}. Score: {}, length: {}",
            next_cell,
            self.state.score,
            self.state.snake.len()
        );

        StepOutcome::Ate {
            reversed: food.is_reversing,
            score: self.state.score,
        }
    }

    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        self.state.cell_kind(cell)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid_size: self.grid.size(),
            cells: self.grid.cells().map(|cell| self.state.cell_kind(cell)).collect(),
            score: self.state.score,
            best_score: self.best_score,
            round: self.round,
            tick: self.tick,
            length: self.state.snake.len(),
            direction: self.state.direction,
            status: self.status,
        }
    }

    /// Adds one segment behind the tail, on the side opposite to where it travels.
    /// Nothing is added when that cell is off the grid or already part of the body.
    fn grow(&mut self, tail_direction: Direction) {
        let coords = self
            .state
            .snake
            .tail()
            .coords
            .step(tail_direction.opposite());
        if let Some(cell) = self.grid.cell_at(coords) {
            self.state.snake.extend_tail(coords, cell);
        }
    }

    fn game_over(&mut self, reason: GameOverReason) -> StepOutcome {
        let final_score = self.state.score;
        log!(
            "Round {} over: snake {} with score {}",
            self.round,
            reason,
            final_score
        );

        self.state = GameState::new_round(&self.grid, &mut self.spawner);
        self.pending_direction = None;
        self.status = EngineStatus::GameOver {
            reason,
            final_score,
        };

        StepOutcome::GameOver {
            reason,
            final_score,
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{Coords, Segment};

    fn engine(grid_size: usize, reversal_food_probability: f64) -> SimulationEngine {
        let settings = SnakeSessionSettings {
            grid_size,
            reversal_food_probability,
            ..Default::default()
        };
        SimulationEngine::new(&settings, SessionRng::new(42)).unwrap()
    }

    fn cell(engine: &SimulationEngine, row: i32, col: i32) -> Cell {
        engine.grid().cell_at(Coords::new(row, col)).unwrap()
    }

    /// Replaces the snake with `coords`, head first.
    fn place_snake(engine: &mut SimulationEngine, coords: &[(i32, i32)], direction: Direction) {
        let segments: Vec<Segment> = coords
            .iter()
            .map(|&(row, col)| Segment::new(Coords::new(row, col), cell(engine, row, col)))
            .collect();
        let mut body = SnakeBody::new(segments[0]);
        for segment in &segments[1..] {
            assert!(body.extend_tail(segment.coords, segment.cell));
        }
        let state = engine.state_mut();
        state.snake = body;
        state.direction = direction;
    }

    fn place_food(engine: &mut SimulationEngine, row: i32, col: i32, is_reversing: bool) {
        let cell = cell(engine, row, col);
        engine.state_mut().food = Some(FoodState { cell, is_reversing });
    }

    fn assert_consistent(engine: &SimulationEngine) {
        assert!(engine.snake().is_consistent());
        let segments: Vec<_> = engine.snake().segments().collect();
        assert_eq!(segments.len(), engine.snake().len());
        for pair in segments.windows(2) {
            assert!(Direction::between(pair[1].coords, pair[0].coords).is_some());
        }
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let zero = SnakeSessionSettings {
            grid_size: 0,
            ..Default::default()
        };
        assert!(SimulationEngine::new(&zero, SessionRng::new(1)).is_err());

        let bad_probability = SnakeSessionSettings {
            reversal_food_probability: -0.1,
            ..Default::default()
        };
        assert!(SimulationEngine::new(&bad_probability, SessionRng::new(1)).is_err());
    }

    #[test]
    fn test_first_step_moves_right_without_growth() {
        let mut engine = engine(15, 0.3);
        assert_eq!(engine.snake().head().coords, Coords::new(5, 5));
        assert_eq!(engine.food().map(|f| f.cell), Some(Cell(86)));

        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.snake().head().coords, Coords::new(5, 6));
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.score(), 0);
        assert!(!engine.snake().contains(Cell(81)));
        assert_consistent(&engine);
    }

    #[test]
    fn test_eating_start_food_after_five_steps() {
        let mut engine = engine(15, 0.0);
        for _ in 0..4 {
            assert_eq!(engine.step(), StepOutcome::Moved);
        }
        assert_eq!(
            engine.step(),
            StepOutcome::Ate {
                reversed: false,
                score: 1
            }
        );
        assert_eq!(engine.snake().head().coords, Coords::new(5, 10));
        assert_eq!(engine.snake().tail().coords, Coords::new(5, 9));
        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.direction(), Direction::Right);

        let food = engine.food().unwrap();
        assert!(!engine.snake().contains(food.cell));
        assert_ne!(food.cell, Cell(86));
        assert!(!food.is_reversing);
        assert_consistent(&engine);
    }

    #[test]
    fn test_length_constant_without_food() {
        let mut engine = engine(15, 0.0);
        place_snake(&mut engine, &[(7, 7), (7, 6), (7, 5), (7, 4)], Direction::Right);
        place_food(&mut engine, 0, 0, false);

        for direction in [Direction::Right, Direction::Down, Direction::Left, Direction::Left] {
            assert!(engine.set_pending_direction(direction));
            assert_eq!(engine.step(), StepOutcome::Moved);
            assert_eq!(engine.snake().len(), 4);
            assert_consistent(&engine);
        }
        assert_eq!(engine.snake().head().coords, Coords::new(8, 6));
    }

    #[test]
    fn test_growth_adds_exactly_one_segment() {
        let mut engine = engine(15, 0.0);
        place_snake(&mut engine, &[(7, 7), (7, 6), (7, 5)], Direction::Right);
        place_food(&mut engine, 7, 8, false);

        assert_eq!(
            engine.step(),
            StepOutcome::Ate {
                reversed: false,
                score: 1
            }
        );
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.snake().head().coords, Coords::new(7, 8));
        assert_eq!(engine.snake().tail().coords, Coords::new(7, 5));
        assert_consistent(&engine);
    }

    #[test]
    fn test_growth_skipped_when_extension_is_off_grid() {
        let mut engine = engine(15, 0.0);
        // Tail at (0, 1) travels down, so the extension would land on (-1, 1).
        place_snake(&mut engine, &[(1, 2), (1, 1), (0, 1), (0, 0)], Direction::Right);
        place_food(&mut engine, 1, 3, false);

        assert_eq!(
            engine.step(),
            StepOutcome::Ate {
                reversed: false,
                score: 1
            }
        );
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.snake().tail().coords, Coords::new(0, 1));
        assert_eq!(engine.score(), 1);
        assert_consistent(&engine);
    }

    #[test]
    fn test_growth_skipped_when_extension_is_occupied() {
        let mut engine = engine(15, 0.0);
        // After the tail retreats to (5, 6) it travels up, and the cell below it, (6, 6),
        // is still body.
        place_snake(
            &mut engine,
            &[(6, 7), (6, 6), (6, 5), (5, 5), (4, 5), (4, 6), (5, 6), (5, 7)],
            Direction::Right,
        );
        place_food(&mut engine, 6, 8, false);

        assert!(matches!(engine.step(), StepOutcome::Ate { .. }));
        assert_eq!(engine.snake().len(), 8);
        assert_eq!(engine.snake().tail().coords, Coords::new(5, 6));
        assert_consistent(&engine);
    }

    #[test]
    fn test_reversal_food_turns_snake_around() {
        let mut engine = engine(15, 0.0);
        place_snake(&mut engine, &[(5, 5), (5, 4), (5, 3)], Direction::Right);
        place_food(&mut engine, 5, 6, true);

        assert_eq!(
            engine.step(),
            StepOutcome::Ate {
                reversed: true,
                score: 1
            }
        );
        let order: Vec<Coords> = engine.snake().segments().map(|s| s.coords).collect();
        assert_eq!(
            order,
            vec![
                Coords::new(5, 3),
                Coords::new(5, 4),
                Coords::new(5, 5),
                Coords::new(5, 6)
            ]
        );
        assert_eq!(engine.direction(), Direction::Left);
        assert_consistent(&engine);

        place_food(&mut engine, 0, 0, false);
        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.snake().head().coords, Coords::new(5, 2));
        assert_eq!(engine.snake().tail().coords, Coords::new(5, 5));
    }

    #[test]
    fn test_reversal_direction_comes_from_tail_geometry() {
        let mut engine = engine(15, 0.0);
        // Moving right along row 5 while the tail end hangs below and travels up.
        place_snake(&mut engine, &[(5, 4), (5, 3), (6, 3), (7, 3)], Direction::Right);
        place_food(&mut engine, 5, 5, true);

        assert!(matches!(
            engine.step(),
            StepOutcome::Ate { reversed: true, .. }
        ));
        assert_eq!(engine.snake().head().coords, Coords::new(7, 3));
        assert_eq!(engine.direction(), Direction::Down);
        assert_ne!(engine.direction(), Direction::Right.opposite());
        assert_consistent(&engine);
    }

    #[test]
    fn test_single_segment_reversal_uses_current_direction() {
        let mut engine = engine(15, 0.0);
        place_snake(&mut engine, &[(3, 3)], Direction::Down);
        place_food(&mut engine, 4, 3, true);

        assert!(matches!(engine.step(), StepOutcome::Ate { reversed: true, .. }));
        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.snake().head().coords, Coords::new(3, 3));
        assert_eq!(engine.direction(), Direction::Up);
    }

    #[test]
    fn test_wall_collision_resets_round() {
        let mut engine = engine(15, 0.0);
        place_snake(&mut engine, &[(5, 14), (5, 13)], Direction::Right);
        engine.state_mut().score = 7;

        assert_eq!(
            engine.step(),
            StepOutcome::GameOver {
                reason: GameOverReason::WallCollision,
                final_score: 7
            }
        );
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.snake().head().coords, Coords::new(5, 5));
        assert_eq!(engine.direction(), Direction::Right);
        assert!(!engine.status().is_running());
    }

    #[test]
    fn test_self_collision_resets_score_on_same_step() {
        let mut engine = engine(15, 0.0);
        place_snake(
            &mut engine,
            &[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)],
            Direction::Left,
        );
        engine.state_mut().score = 4;
        assert!(engine.set_pending_direction(Direction::Down));

        assert_eq!(
            engine.step(),
            StepOutcome::GameOver {
                reason: GameOverReason::SelfCollision,
                final_score: 4
            }
        );
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().len(), 1);
    }

    #[test]
    fn test_moving_into_current_tail_is_a_collision() {
        let mut engine = engine(15, 0.0);
        place_snake(&mut engine, &[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Left);
        assert!(engine.set_pending_direction(Direction::Down));

        assert!(matches!(
            engine.step(),
            StepOutcome::GameOver {
                reason: GameOverReason::SelfCollision,
                ..
            }
        ));
    }

    #[test]
    fn test_game_over_waits_for_reset() {
        let mut engine = engine(4, 0.0);
        place_snake(&mut engine, &[(0, 0)], Direction::Up);
        assert!(matches!(engine.step(), StepOutcome::GameOver { .. }));
        assert_eq!(engine.step(), StepOutcome::Idle);
        assert_eq!(engine.round(), 1);

        engine.reset();
        assert!(engine.status().is_running());
        assert_eq!(engine.round(), 2);
        assert_eq!(engine.step(), StepOutcome::Moved);
    }

    #[test]
    fn test_opposite_direction_rules() {
        let mut engine = engine(15, 0.0);
        assert!(engine.set_pending_direction(Direction::Left));
        assert_eq!(engine.pending_direction(), Some(Direction::Left));
        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.direction(), Direction::Left);

        place_snake(&mut engine, &[(5, 5), (5, 6)], Direction::Left);
        assert!(!engine.set_pending_direction(Direction::Right));
        assert_eq!(engine.pending_direction(), None);
        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.direction(), Direction::Left);
    }

    #[test]
    fn test_pending_direction_last_write_wins() {
        let mut engine = engine(15, 0.0);
        place_snake(&mut engine, &[(7, 7), (7, 6)], Direction::Right);
        place_food(&mut engine, 0, 0, false);

        assert!(engine.set_pending_direction(Direction::Up));
        assert!(!engine.set_pending_direction(Direction::Left));
        assert!(engine.set_pending_direction(Direction::Down));
        engine.step();
        assert_eq!(engine.direction(), Direction::Down);
        assert_eq!(engine.snake().head().coords, Coords::new(8, 7));
        assert_eq!(engine.pending_direction(), None);
    }

    #[test]
    fn test_board_filled_ends_round() {
        let mut engine = engine(3, 0.0);
        // 3x3 board: eight segments, the food sits on the only free cell.
        place_snake(
            &mut engine,
            &[(2, 1), (2, 0), (1, 0), (1, 1), (1, 2), (0, 2), (0, 1), (0, 0)],
            Direction::Right,
        );
        place_food(&mut engine, 2, 2, false);

        assert_eq!(
            engine.step(),
            StepOutcome::GameOver {
                reason: GameOverReason::BoardFilled,
                final_score: 1
            }
        );
        assert_eq!(engine.best_score(), 1);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().len(), 1);
    }

    #[test]
    fn test_best_score_survives_reset() {
        let mut engine = engine(15, 0.0);
        for _ in 0..5 {
            engine.step();
        }
        assert_eq!(engine.score(), 1);
        engine.reset();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best_score(), 1);
    }

    #[test]
    fn test_snapshot_classifies_cells() {
        let mut engine = engine(15, 0.0);
        place_food(&mut engine, 0, 1, true);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.cells.len(), 225);
        assert_eq!(snapshot.kind_at(5, 5), Some(CellKind::Snake));
        assert_eq!(snapshot.kind_at(0, 1), Some(CellKind::ReversalFood));
        assert_eq!(snapshot.kind_at(0, 0), Some(CellKind::Empty));
        assert_eq!(snapshot.kind_at(15, 0), None);
        assert_eq!(engine.cell_kind(Cell(2)), CellKind::ReversalFood);
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.length, 1);
    }

    #[test]
    fn test_long_random_play_keeps_invariants() {
        let settings = SnakeSessionSettings {
            grid_size: 8,
            reversal_food_probability: 0.5,
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(&settings, SessionRng::new(2024)).unwrap();
        let mut driver = SessionRng::new(99);

        for _ in 0..5_000 {
            let direction = Direction::ALL[driver.random_range(0..4)];
            engine.set_pending_direction(direction);

            let length_before = engine.snake().len();
            match engine.step() {
                StepOutcome::Moved => assert_eq!(engine.snake().len(), length_before),
                StepOutcome::Ate { .. } => {
                    assert!(engine.snake().len() <= length_before + 1);
                    assert!(engine.snake().len() >= length_before);
                }
                StepOutcome::GameOver { .. } => {
                    assert_eq!(engine.score(), 0);
                    assert_eq!(engine.snake().len(), 1);
                    engine.reset();
                }
                StepOutcome::Idle => unreachable!("engine is reset after every game over"),
            }

            assert_consistent(&engine);
            if let Some(food) = engine.food() {
                assert!(!engine.snake().contains(food.cell));
            }
        }
    }
}
