use std::collections::HashSet;

use crate::games::SessionRng;
use super::types::Cell;

const MAX_SPAWN_ATTEMPTS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodState {
    pub cell: Cell,
    /// Eating this food turns the snake around.
    pub is_reversing: bool,
}

impl FoodState {
    pub fn plain(cell: Cell) -> Self {
        Self {
            cell,
            is_reversing: false,
        }
    }
}

pub struct FoodSpawner {
    rng: SessionRng,
    reversal_probability: f64,
}

impl FoodSpawner {
    pub fn new(rng: SessionRng, reversal_probability: f64) -> Self {
        Self {
            rng,
            reversal_probability: reversal_probability.clamp(0.0, 1.0),
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Picks a cell in `1..=cell_count` that is neither occupied nor `previous`.
    ///
    /// Samples uniformly for a bounded number of attempts, then scans row-major from a
    /// random offset so a nearly full board still terminates. `None` means no such cell
    /// exists.
    pub fn spawn(
        &mut self,
        occupied: &HashSet<Cell>,
        previous: Option<Cell>,
        cell_count: usize,
    ) -> Option<Cell> {
        if cell_count == 0 {
            return None;
        }
        let count = cell_count as u32;
        let is_free = |cell: Cell| !occupied.contains(&cell) && Some(cell) != previous;

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = Cell(self.rng.random_range(1..=count));
            if is_free(cell) {
                return Some(cell);
            }
        }

        let offset = self.rng.random_range(0..count);
        (0..count)
            .map(|i| Cell((offset + i) % count + 1))
            .find(|&cell| is_free(cell))
    }

    pub fn decide_reversal(&mut self) -> bool {
        self.rng.chance(self.reversal_probability)
    }

    pub fn next_food(
        &mut self,
        occupied: &HashSet<Cell>,
        previous: Option<Cell>,
        cell_count: usize,
    ) -> Option<FoodState> {
        let cell = self.spawn(occupied, previous, cell_count)?;
        Some(FoodState {
            cell,
            is_reversing: self.decide_reversal(),
        })
    }
}
