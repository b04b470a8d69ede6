//! Radar placement scoring.
//!
//! A radar buried at a cell reveals every cell within a fixed manhattan
//! radius. The value of a candidate cell is the number of still unknown
//! cells inside that diamond, clipped to the grid.

use crate::api::{
    grid_size::GridSize,
    position::{Position, BASE_COLUMN},
};

use super::grid::Grid;

/// A chosen radar cell together with the number of unknown cells it would reveal.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Placement {
    pub position: Position,
    pub score: u32,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} reveals {}", self.position, self.score)
    }
}

/// Per-turn information value of every cell. Never kept across turns.
#[derive(Clone, Debug)]
pub struct CoverageMap {
    size: GridSize,
    scores: Vec<u32>,
}

impl CoverageMap {
    pub fn score_at(&self, position: &Position) -> u32 {
        self.scores[self.size.index(position)]
    }

    /// Picks the highest scoring candidate.
    ///
    /// Cells are visited row by row; a later cell replaces the current best
    /// only with a strictly greater score, or with an equal (non zero) score
    /// lying closer to the base column. When nothing scores, the result is
    /// the origin with a score of 0.
    pub fn best(&self) -> Placement {
        let mut best = Placement::default();

        for position in self.size.row_major() {
            if position.x == BASE_COLUMN {
                continue;
            }
            let score = self.score_at(&position);
            if score > best.score
                || (score == best.score && score > 0 && position.x < best.position.x)
            {
                best = Placement { position, score };
            }
        }

        best
    }
}

#[derive(Clone, Debug)]
pub struct CoverageScorer {
    offsets: Vec<(isize, isize)>,
}

impl CoverageScorer {
    pub fn new(radius: usize) -> Self {
        let origin = Position::new(radius, radius);
        let mut offsets = Vec::new();
        for y in 0..=2 * radius {
            for x in 0..=2 * radius {
                if origin.within_radius(&Position::new(x, y), radius) {
                    offsets.push((x as isize - radius as isize, y as isize - radius as isize));
                }
            }
        }

        Self { offsets }
    }

    /// Counts the unknown cells a radar buried at `center` would reveal
    pub fn score_at(&self, grid: &Grid, center: &Position) -> u32 {
        let size = grid.size();
        let mut score = 0;

        for (dx, dy) in &self.offsets {
            let x = center.x as isize + dx;
            let y = center.y as isize + dy;
            if x < 0 || y < 0 || x >= size.x as isize || y >= size.y as isize {
                continue;
            }
            if grid.is_unknown(&Position::new(x as usize, y as usize)) {
                score += 1;
            }
        }

        score
    }

    /// Scores every candidate cell. The base column is never a candidate and scores 0.
    pub fn scores(&self, grid: &Grid) -> CoverageMap {
        let size = *grid.size();
        let mut scores = vec![0; size.area()];

        for position in size.row_major() {
            if position.x == BASE_COLUMN {
                continue;
            }
            scores[size.index(&position)] = self.score_at(grid, &position);
        }

        CoverageMap { size, scores }
    }

    pub fn best_placement(&self, grid: &Grid) -> Placement {
        self.scores(grid).best()
    }
}
