use pond_types::{FishId, FishState, OccupancyCell};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PondError {
    #[error("position ({x}, {y}) is outside the pond bounds")]
    OutOfBounds { x: i32, y: i32 },
    #[error("the pond has no free cell")]
    GridFull,
    #[error("cell ({x}, {y}) is already occupied")]
    OccupiedDestination { x: i32, y: i32 },
}

/// Authoritative spatial index over the pond grid. Cells hold fish ids; the
/// rosters own the fish themselves.
#[derive(Debug, Clone)]
pub struct Pond {
    width: i32,
    height: i32,
    cells: Vec<Option<FishId>>,
}

impl Pond {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn cell_index(&self, x: i32, y: i32) -> Result<usize, PondError> {
        if !self.in_bounds(x, y) {
            return Err(PondError::OutOfBounds { x, y });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn fish_at(&self, x: i32, y: i32) -> Result<Option<FishId>, PondError> {
        Ok(self.cells[self.cell_index(x, y)?])
    }

    /// Occupies the cell and updates the fish's own position so the
    /// position/cell invariant cannot drift apart.
    pub fn place_fish(&mut self, fish: &mut FishState, x: i32, y: i32) -> Result<(), PondError> {
        let idx = self.cell_index(x, y)?;
        if self.cells[idx].is_some() {
            return Err(PondError::OccupiedDestination { x, y });
        }
        self.cells[idx] = Some(fish.id);
        fish.move_to(x, y);
        Ok(())
    }

    /// Relocates the fish, clearing the source cell read from its stored
    /// position. Occupied destinations are rejected, never overwritten.
    pub fn move_fish(&mut self, fish: &mut FishState, x: i32, y: i32) -> Result<(), PondError> {
        let to_idx = self.cell_index(x, y)?;
        if self.cells[to_idx].is_some() {
            return Err(PondError::OccupiedDestination { x, y });
        }
        let from_idx = self.cell_index(fish.x, fish.y)?;
        debug_assert_eq!(self.cells[from_idx], Some(fish.id));
        self.cells[from_idx] = None;
        self.cells[to_idx] = Some(fish.id);
        fish.move_to(x, y);
        Ok(())
    }

    /// Clears the cell and returns the previous occupant, if any. Does not
    /// touch fish state.
    pub fn remove_fish(&mut self, x: i32, y: i32) -> Result<Option<FishId>, PondError> {
        let idx = self.cell_index(x, y)?;
        Ok(self.cells[idx].take())
    }

    /// Uniform over the free cells. With exactly one free cell the result is
    /// that cell for any seed.
    pub fn random_free_position<R: Rng>(&self, rng: &mut R) -> Result<(i32, i32), PondError> {
        let free: Vec<(i32, i32)> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| self.position_of(idx))
            .collect();
        if free.is_empty() {
            return Err(PondError::GridFull);
        }
        Ok(free[rng.random_range(0..free.len())])
    }

    /// In-bounds orthogonal neighbors in fixed left, right, up, down order.
    /// The order is the predation tie-break.
    pub fn adjacent_positions(&self, x: i32, y: i32) -> Vec<(i32, i32)> {
        let mut positions = Vec::with_capacity(4);
        if x > 0 {
            positions.push((x - 1, y));
        }
        if x < self.width - 1 {
            positions.push((x + 1, y));
        }
        if y > 0 {
            positions.push((x, y - 1));
        }
        if y < self.height - 1 {
            positions.push((x, y + 1));
        }
        positions
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = OccupancyCell> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|fish_id| {
                let (x, y) = self.position_of(idx);
                OccupancyCell { x, y, fish_id }
            })
        })
    }

    /// Renders the grid as rows of two-character cells, top row first.
    pub fn render(&self, is_predator: impl Fn(FishId) -> bool) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2 + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y as usize * self.width as usize + x as usize;
                out.push_str(match self.cells[idx] {
                    None => ". ",
                    Some(id) if is_predator(id) => "P ",
                    Some(_) => "C ",
                });
            }
            out.push('\n');
        }
        out
    }

    fn position_of(&self, idx: usize) -> (i32, i32) {
        let width = self.width as usize;
        ((idx % width) as i32, (idx / width) as i32)
    }
}
