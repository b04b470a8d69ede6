use super::position::Position;

/// Fixed dimensions of the mining grid, read once at startup.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GridSize {
    pub x: usize,
    pub y: usize,
}

impl GridSize {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Number of cells in the grid
    pub fn area(&self) -> usize {
        self.x * self.y
    }

    pub fn center(&self) -> Position {
        Position {
            x: self.x / 2,
            y: self.y / 2,
        }
    }

    pub fn contains(&self, position: &Position) -> bool {
        position.x < self.x && position.y < self.y
    }

    /// Row-major index of `position` in a flat cell buffer.
    ///
    /// Panics when the position lies outside of the grid: callers are expected
    /// to only hand over coordinates that came from validated input.
    pub fn index(&self, position: &Position) -> usize {
        assert!(
            self.contains(position),
            "Position {position} is outside of the grid {self}"
        );
        position.y * self.x + position.x
    }

    /// Brings any signed coordinate pair back within `[0, x-1] x [0, y-1]`.
    pub fn clamp_position(&self, x: isize, y: isize) -> Position {
        let max_x = self.x.saturating_sub(1) as isize;
        let max_y = self.y.saturating_sub(1) as isize;

        Position {
            x: x.clamp(0, max_x) as usize,
            y: y.clamp(0, max_y) as usize,
        }
    }

    /// Iterates every position, left to right inside a row, rows top to bottom
    pub fn row_major(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.y).flat_map(move |y| (0..self.x).map(move |x| Position { x, y }))
    }

    /// Iterates every position, top to bottom inside a column, columns left to right
    pub fn column_major(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.x).flat_map(move |x| (0..self.y).map(move |y| Position { x, y }))
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(width={}, height={})", self.x, self.y)
    }
}
