/// Column of the headquarters, where ore is delivered and items are requested.
pub const BASE_COLUMN: usize = 0;

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Computes the manhattan distance between `self` and the provided `Position`
    ///
    /// Unlike a euclidean distance, it only counts steps taken along the x and y
    /// axis, which is also the shape of the area a radar reveals.
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Indicates whether the `other` position is within `radius` steps
    pub fn within_radius(&self, other: &Position, radius: usize) -> bool {
        self.manhattan_distance(other) <= radius
    }

    pub fn is_at_base(&self) -> bool {
        self.x == BASE_COLUMN
    }

    /// The delivery cell on the same row
    pub fn base_entrance(&self) -> Position {
        Position {
            x: BASE_COLUMN,
            y: self.y,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[x:{:02}, y:{:02}]", self.x, self.y)
    }
}
