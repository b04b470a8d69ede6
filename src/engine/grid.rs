use crate::api::{grid_size::GridSize, position::Position, snapshot::TurnSnapshot};

/// The belief model of the mining grid.
///
/// Known cells hold an ore count, unknown cells hold zero and a flag. The
/// ore counts seen through `ore_at` are *speculative*: whenever a robot is
/// committed to dig a cell this turn, one unit is reserved by counting a
/// claim against it. The count may drop below zero when several sticky
/// commands target the same cell; that is tolerated and wiped by the next
/// `refresh`.
#[derive(Clone, Debug)]
pub struct Grid {
    size: GridSize,
    /// As observed, before any claim
    ore: Vec<i32>,
    claims: Vec<i32>,
    unknown: Vec<bool>,
}

impl Grid {
    /// A grid where nothing has been observed yet
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            ore: vec![0; size.area()],
            claims: vec![0; size.area()],
            unknown: vec![true; size.area()],
        }
    }

    pub fn size(&self) -> &GridSize {
        &self.size
    }

    /// Overwrites a cell and drops its claims. `None` marks the cell as
    /// unknown, which also resets its ore to 0.
    pub fn set_cell(&mut self, position: &Position, ore: Option<u32>) {
        let index = self.size.index(position);
        self.claims[index] = 0;
        match ore {
            Some(amount) => {
                self.ore[index] = amount as i32;
                self.unknown[index] = false;
            }
            None => {
                self.ore[index] = 0;
                self.unknown[index] = true;
            }
        }
    }

    /// Speculative ore count, possibly negative after over-reservation
    pub fn ore_at(&self, position: &Position) -> i32 {
        let index = self.size.index(position);
        self.ore[index] - self.claims[index]
    }

    pub fn is_unknown(&self, position: &Position) -> bool {
        self.unknown[self.size.index(position)]
    }

    /// Sum of the positive speculative ore counts
    pub fn total_ore(&self) -> u32 {
        self.ore
            .iter()
            .zip(&self.claims)
            .map(|(ore, claims)| ore - claims)
            .filter(|&ore| ore > 0)
            .map(|ore| ore as u32)
            .sum()
    }

    /// Ore known this turn, ignoring every claim made since the cells were set
    pub fn observed_ore(&self) -> u32 {
        self.ore.iter().filter(|&&ore| ore > 0).map(|&ore| ore as u32).sum()
    }

    pub fn unknown_count(&self) -> usize {
        self.unknown.iter().filter(|&&unknown| unknown).count()
    }

    pub fn unknown_fraction(&self) -> f64 {
        if self.size.area() == 0 {
            return 0.0;
        }
        self.unknown_count() as f64 / self.size.area() as f64
    }

    /// Claims one unit of ore at `position` for a robot.
    ///
    /// Returns whether the cell still had unclaimed ore. The count is
    /// decremented either way.
    pub fn reserve(&mut self, position: &Position) -> bool {
        let available = self.ore_at(position) > 0;
        let index = self.size.index(position);
        self.claims[index] += 1;
        available
    }

    /// Makes a cell worthless for digging, without touching its unknown flag.
    pub fn mask(&mut self, position: &Position) {
        let index = self.size.index(position);
        self.ore[index] = 0;
    }

    /// Replaces the whole belief with the judge's view of this turn.
    ///
    /// Cells holding one of our traps are masked so nobody digs into them.
    pub fn refresh(&mut self, snapshot: &TurnSnapshot) {
        assert_eq!(
            self.size.area(),
            snapshot.cells.len(),
            "Snapshot cell count does not match grid {}",
            self.size
        );

        for (index, report) in snapshot.cells.iter().enumerate() {
            let position = Position {
                x: index % self.size.x,
                y: index / self.size.x,
            };
            self.set_cell(&position, report.ore);
        }

        for trap in snapshot.own_traps() {
            if let Some(position) = trap.position(&self.size) {
                self.mask(&position);
            }
        }
    }
}
