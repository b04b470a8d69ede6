use super::{grid_size::GridSize, item::Item, position::Position};

/// One cell of the grid, as reported by the judge this turn.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellReport {
    /// `None` while no radar covers the cell
    pub ore: Option<u32>,
    pub hole: bool,
}

impl std::fmt::Display for CellReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ore {
            Some(ore) => write!(f, "{ore}"),
            None => write!(f, "?"),
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityKind {
    OwnRobot,
    OpponentRobot,
    Radar,
    Trap,
}

impl EntityKind {
    /// Decodes the wire representation (0 own robot, 1 opponent, 2 radar, 3 trap)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::OwnRobot),
            1 => Some(Self::OpponentRobot),
            2 => Some(Self::Radar),
            3 => Some(Self::Trap),
            _ => None,
        }
    }
}

/// Anything visible on the grid: robots, buried radars and traps.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub x: i32,
    pub y: i32,
    pub item: Item,
}

impl Entity {
    /// A robot reported at x = -1 has been destroyed
    pub fn is_dead(&self) -> bool {
        self.x < 0
    }

    pub fn position(&self, grid_size: &GridSize) -> Option<Position> {
        if self.x < 0 || self.y < 0 {
            return None;
        }
        let position = Position {
            x: self.x as usize,
            y: self.y as usize,
        };
        grid_size.contains(&position).then_some(position)
    }
}

/// Represents everything the judge shares with us at the start of a turn.
///
/// The snapshot is the full truth for the turn; nothing from previous
/// snapshots is trusted once a new one arrives.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TurnSnapshot {
    pub my_score: u32,
    pub opponent_score: u32,
    /// Row-major, `width * height` entries
    pub cells: Vec<CellReport>,
    pub radar_cooldown: u32,
    pub trap_cooldown: u32,
    pub entities: Vec<Entity>,
}

impl TurnSnapshot {
    /// Own robots in order of appearance, which is also the output slot order
    pub fn own_robots(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::OwnRobot)
    }

    pub fn own_traps(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind == EntityKind::Trap)
    }
}

impl std::fmt::Display for TurnSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{score: {}-{}, holes: {}, radar_cooldown: {}, trap_cooldown: {}, entities: {}}}",
            self.my_score,
            self.opponent_score,
            self.cells.iter().filter(|c| c.hole).count(),
            self.radar_cooldown,
            self.trap_cooldown,
            self.entities.len()
        )
    }
}
