use crate::api::{
    command::{Command, DigIntent},
    grid_size::GridSize,
    item::Item,
    position::Position,
};

use super::grid::Grid;

/// One of our robots, as last reported, plus the order it is following.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Robot {
    pub id: u32,
    pub alive: bool,
    pub position: Position,
    pub item: Item,
    command: Command,
}

impl Robot {
    #[cfg(test)]
    pub fn new(id: u32, position: Position, item: Item) -> Self {
        Self {
            id,
            alive: true,
            position,
            item,
            command: Command::Wait,
        }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn is_at_base(&self) -> bool {
        self.position.is_at_base()
    }

    pub fn wait(&mut self) {
        self.command = Command::Wait;
    }

    pub fn move_to(&mut self, target: Position, grid_size: &GridSize) {
        self.command = Command::Move(
            grid_size.clamp_position(target.x as isize, target.y as isize),
        );
    }

    /// Heads straight to the base column, staying on the current row
    pub fn return_to_base(&mut self) {
        self.command = Command::Move(self.position.base_entrance());
    }

    pub fn dig(&mut self, target: Position, intent: DigIntent, grid_size: &GridSize) {
        self.command = Command::Dig(
            grid_size.clamp_position(target.x as isize, target.y as isize),
            intent,
        );
    }

    pub fn request_radar(&mut self) {
        self.command = Command::RequestRadar;
    }

    #[allow(dead_code)]
    pub fn request_trap(&mut self) {
        self.command = Command::RequestTrap;
    }

    /// Decides whether the order from a previous turn still makes sense.
    ///
    /// A still valid DIG for ore reserves one unit of the targeted cell, so
    /// validating in slot order hands out ore first come, first served.
    /// WAIT is never sticky.
    pub fn revalidate(&self, grid: &mut Grid) -> bool {
        match self.command {
            Command::Wait => false,
            Command::Move(target) => self.position != target,
            Command::Dig(_, DigIntent::Radar) => self.item == Item::Radar,
            Command::Dig(_, DigIntent::Trap) => self.item == Item::Trap,
            Command::Dig(target, DigIntent::Ore) => {
                // A robot only holds one unit of ore at a time
                if self.item == Item::Ore {
                    return false;
                }
                grid.reserve(&target)
            }
            Command::RequestRadar => self.item != Item::Radar,
            Command::RequestTrap => self.item != Item::Trap,
        }
    }
}

impl std::fmt::Display for Robot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Robot ({}) {{ pos: {}, item: {}, command: {}, alive: {} }}",
            self.id, self.position, self.item, self.command, self.alive
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: GridSize = GridSize { x: 10, y: 10 };

    fn grid_with_ore(position: Position, ore: u32) -> Grid {
        let mut grid = Grid::new(SIZE);
        grid.set_cell(&position, Some(ore));
        grid
    }

    #[test]
    fn test_wait_is_never_sticky() {
        let robot = Robot::new(1, Position::new(0, 3), Item::None);
        let mut grid = Grid::new(SIZE);

        assert!(!robot.revalidate(&mut grid));
    }

    #[test]
    fn test_move_valid_until_arrival() {
        let mut robot = Robot::new(1, Position::new(4, 3), Item::Ore);
        let mut grid = Grid::new(SIZE);
        robot.return_to_base();
        assert_eq!(Command::Move(Position::new(0, 3)), *robot.command());
        assert!(robot.revalidate(&mut grid));

        robot.position = Position::new(0, 3);
        assert!(!robot.revalidate(&mut grid));
    }

    #[test]
    fn test_item_digs_need_the_item() {
        let mut grid = Grid::new(SIZE);
        let mut robot = Robot::new(1, Position::new(0, 3), Item::Radar);
        robot.dig(Position::new(5, 5), DigIntent::Radar, &SIZE);
        assert!(robot.revalidate(&mut grid));

        robot.item = Item::None;
        assert!(!robot.revalidate(&mut grid));

        robot.item = Item::Trap;
        robot.dig(Position::new(5, 5), DigIntent::Trap, &SIZE);
        assert!(robot.revalidate(&mut grid));
        robot.item = Item::Radar;
        assert!(!robot.revalidate(&mut grid));
    }

    #[test]
    fn test_ore_dig_reserves() {
        let target = Position::new(3, 3);
        let mut grid = grid_with_ore(target, 1);
        let mut first = Robot::new(1, Position::new(1, 3), Item::None);
        let mut second = Robot::new(2, Position::new(2, 3), Item::None);
        first.dig(target, DigIntent::Ore, &SIZE);
        second.dig(target, DigIntent::Ore, &SIZE);

        assert!(first.revalidate(&mut grid));
        assert!(!second.revalidate(&mut grid));
        assert_eq!(-1, grid.ore_at(&target));
    }

    #[test]
    fn test_ore_dig_invalid_when_carrying_ore() {
        let target = Position::new(3, 3);
        let mut grid = grid_with_ore(target, 2);
        let mut robot = Robot::new(1, Position::new(3, 3), Item::Ore);
        robot.dig(target, DigIntent::Ore, &SIZE);

        assert!(!robot.revalidate(&mut grid));
        assert_eq!(2, grid.ore_at(&target));
    }

    #[test]
    fn test_requests() {
        let mut grid = Grid::new(SIZE);
        let mut robot = Robot::new(1, Position::new(0, 3), Item::None);

        robot.request_radar();
        assert!(robot.revalidate(&mut grid));
        robot.item = Item::Radar;
        assert!(!robot.revalidate(&mut grid));

        robot.request_trap();
        assert!(robot.revalidate(&mut grid));
        robot.item = Item::Trap;
        assert!(!robot.revalidate(&mut grid));
    }

    #[test]
    fn test_validity_does_not_flap() {
        // Re-checking an accepted command against a fresh copy of the same state agrees
        let target = Position::new(6, 1);
        let pristine = grid_with_ore(target, 3);
        let mut robot = Robot::new(1, Position::new(2, 1), Item::None);
        robot.dig(target, DigIntent::Ore, &SIZE);

        for _ in 0..5 {
            let mut grid = pristine.clone();
            assert!(robot.revalidate(&mut grid));
        }
    }

    #[test]
    fn test_targets_are_clamped() {
        let mut robot = Robot::new(1, Position::new(2, 1), Item::None);

        robot.move_to(Position::new(40, 12), &SIZE);
        assert_eq!(Some(Position::new(9, 9)), robot.command().target());

        robot.dig(Position::new(10, 3), DigIntent::Ore, &SIZE);
        assert_eq!(Some(Position::new(9, 3)), robot.command().target());
    }
}
