use super::types::{Cell, Coords};

/// Square board of `size * size` cells numbered row-major from 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self, String> {
        if size == 0 {
            return Err("Grid size must be at least 1".to_string());
        }
        if size.checked_mul(size).is_none_or(|count| count > u32::MAX as usize) {
            return Err(format!("Grid size {} is too large", size));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn is_out(&self, coords: Coords) -> bool {
        coords.row < 0
            || coords.col < 0
            || coords.row as usize >= self.size
            || coords.col as usize >= self.size
    }

    pub fn cell_at(&self, coords: Coords) -> Option<Cell> {
        if self.is_out(coords) {
            return None;
        }
        let id = coords.row as usize * self.size + coords.col as usize + 1;
        Some(Cell(id as u32))
    }

    pub fn coords_of(&self, cell: Cell) -> Option<Coords> {
        let id = cell.id() as usize;
        if id == 0 || id > self.cell_count() {
            return None;
        }
        let index = id - 1;
        Some(Coords::new(
            (index / self.size) as i32,
            (index % self.size) as i32,
        ))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        (1..=self.cell_count() as u32).map(Cell)
    }
}
