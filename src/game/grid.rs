use rand::Rng;

use super::state::Position;

/// The playfield: `cols x rows` cells whose edges wrap around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Map any coordinate onto the equivalent cell inside the grid.
    ///
    /// Negative coordinates wrap to the far edge (`-1` becomes `cols - 1`).
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.cols as i32),
            pos.y.rem_euclid(self.rows as i32),
        )
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols as i32 && pos.y >= 0 && pos.y < self.rows as i32
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Uniformly sample one cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let x = rng.gen_range(0..self.cols) as i32;
        let y = rng.gen_range(0..self.rows) as i32;
        Position::new(x, y)
    }
}
