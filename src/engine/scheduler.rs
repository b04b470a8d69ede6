//! Greedy task assignment.
//!
//! Every robot that lost its order gets a new one in slot order: deliver
//! carried ore, bury a carried radar, fetch a new radar, or join the idle
//! queue. The idle queue is then matched against the known ore, scanning
//! columns from the base outwards, one robot per unit of ore. Whoever is
//! left over heads to the grid centre to explore. On a turn that started
//! without any known ore, the first of them goes back to base instead.

use crate::api::{
    command::DigIntent,
    grid_size::GridSize,
    item::Item,
    position::BASE_COLUMN,
};

use super::{
    coverage::{CoverageScorer, Placement},
    grid::Grid,
    tracker::RobotTracker,
};

/// Turns left before the judge grants another request of each kind.
///
/// The engine only lowers its own copy optimistically when it issues a
/// request, so a second robot does not ask for the same item this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooldowns {
    pub radar: u32,
    /// Reserved for trap requests, only reported for now
    pub trap: u32,
}

impl std::fmt::Display for Cooldowns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{radar: {}, trap: {}}}", self.radar, self.trap)
    }
}

/// What a scheduling pass decided, for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnPlan {
    pub replanned: usize,
    pub radar_requested: bool,
    pub radar_placement: Option<Placement>,
    pub ore_claims: usize,
    pub explorers: usize,
}

impl std::fmt::Display for TurnPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{replanned: {}, radar_requested: {}, ore_claims: {}, explorers: {}",
            self.replanned, self.radar_requested, self.ore_claims, self.explorers
        )?;
        if let Some(placement) = &self.radar_placement {
            write!(f, ", radar: {placement}")?;
        }
        write!(f, "}}")
    }
}

pub struct Scheduler {
    grid_size: GridSize,
    scorer: CoverageScorer,
    unknown_threshold: f64,
    radar_cooldown: u32,
}

impl Scheduler {
    pub fn new(
        grid_size: GridSize,
        scorer: CoverageScorer,
        unknown_threshold: f64,
        radar_cooldown: u32,
    ) -> Self {
        Self {
            grid_size,
            scorer,
            unknown_threshold,
            radar_cooldown,
        }
    }

    /// Hands a new order to every slot in `needs_command`, in the given order.
    pub fn assign(
        &self,
        tracker: &mut RobotTracker,
        grid: &mut Grid,
        cooldowns: &mut Cooldowns,
        needs_command: &[usize],
    ) -> TurnPlan {
        let mut plan = TurnPlan {
            replanned: needs_command.len(),
            ..TurnPlan::default()
        };
        let unknown_fraction = grid.unknown_fraction();
        let ore_known = grid.observed_ore() > 0;
        let mut idle = Vec::new();

        for &slot in needs_command {
            let robot = tracker.robot_mut(slot);

            if robot.item == Item::Ore {
                robot.return_to_base();
                continue;
            }
            if !robot.is_at_base() {
                idle.push(slot);
                continue;
            }

            let item = robot.item;
            match item {
                Item::Radar => {
                    let placement = *plan
                        .radar_placement
                        .get_or_insert_with(|| self.scorer.best_placement(grid));
                    robot.dig(placement.position, DigIntent::Radar, &self.grid_size);
                }
                // Trap placement is not planned yet
                Item::Trap => idle.push(slot),
                _ if cooldowns.radar == 0 && unknown_fraction >= self.unknown_threshold => {
                    robot.request_radar();
                    cooldowns.radar = self.radar_cooldown;
                    plan.radar_requested = true;
                }
                _ => idle.push(slot),
            }
        }

        let mut idle = idle.into_iter().peekable();

        'cells: for position in self.grid_size.column_major() {
            if position.x == BASE_COLUMN {
                continue;
            }
            while grid.ore_at(&position) > 0 {
                let Some(slot) = idle.next() else {
                    break 'cells;
                };
                grid.reserve(&position);
                tracker
                    .robot_mut(slot)
                    .dig(position, DigIntent::Ore, &self.grid_size);
                plan.ore_claims += 1;
            }
            if idle.peek().is_none() {
                break;
            }
        }

        let center = self.grid_size.center();
        for (rank, slot) in idle.enumerate() {
            let robot = tracker.robot_mut(slot);
            if rank == 0 && !ore_known {
                robot.return_to_base();
            } else {
                robot.move_to(center, &self.grid_size);
                plan.explorers += 1;
            }
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        command::Command,
        position::Position,
        snapshot::{CellReport, Entity, EntityKind, TurnSnapshot},
    };
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashMap;

    const SIZE: GridSize = GridSize { x: 10, y: 10 };

    fn scheduler() -> Scheduler {
        Scheduler::new(SIZE, CoverageScorer::new(4), 0.40, 5)
    }

    fn known_grid() -> Grid {
        let mut grid = Grid::new(SIZE);
        for position in SIZE.row_major() {
            grid.set_cell(&position, Some(0));
        }
        grid
    }

    /// Tracker whose robots are all alive and waiting for orders
    fn tracker_with(robots: &[(i32, i32, Item)]) -> (RobotTracker, Vec<usize>) {
        let entities = robots
            .iter()
            .enumerate()
            .map(|(id, &(x, y, item))| Entity {
                id: id as u32,
                kind: EntityKind::OwnRobot,
                x,
                y,
                item,
            })
            .collect();
        let snapshot = TurnSnapshot {
            my_score: 0,
            opponent_score: 0,
            cells: vec![CellReport::default(); SIZE.area()],
            radar_cooldown: 0,
            trap_cooldown: 0,
            entities,
        };

        let mut tracker = RobotTracker::new(robots.len(), SIZE);
        tracker.refresh(&snapshot);
        (tracker, (0..robots.len()).collect())
    }

    #[test]
    fn test_carried_ore_goes_home() {
        let (mut tracker, queue) = tracker_with(&[(7, 2, Item::Ore)]);
        let mut grid = known_grid();

        scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(vec![Command::Move(Position::new(0, 2))], tracker.commands());
    }

    #[test]
    fn test_idle_robot_digs_closest_column_first() {
        let (mut tracker, queue) = tracker_with(&[(0, 5, Item::None)]);
        let mut grid = known_grid();
        grid.set_cell(&Position::new(6, 0), Some(3));
        grid.set_cell(&Position::new(2, 9), Some(1));

        let plan = scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(
            vec![Command::Dig(Position::new(2, 9), DigIntent::Ore)],
            tracker.commands()
        );
        assert_eq!(1, plan.ore_claims);
        assert_eq!(0, grid.ore_at(&Position::new(2, 9)));
    }

    #[test]
    fn test_one_robot_per_unit_of_ore() {
        let (mut tracker, queue) = tracker_with(&[
            (3, 1, Item::None),
            (3, 2, Item::None),
            (3, 3, Item::None),
            (3, 4, Item::None),
        ]);
        let mut grid = known_grid();
        grid.set_cell(&Position::new(4, 4), Some(2));
        grid.set_cell(&Position::new(5, 0), Some(1));

        let plan = scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(
            vec![
                Command::Dig(Position::new(4, 4), DigIntent::Ore),
                Command::Dig(Position::new(4, 4), DigIntent::Ore),
                Command::Dig(Position::new(5, 0), DigIntent::Ore),
                Command::Move(Position::new(5, 5)),
            ],
            tracker.commands()
        );
        assert_eq!(3, plan.ore_claims);
        assert_eq!(1, plan.explorers);
    }

    #[test]
    fn test_leftovers_explore_when_some_ore_was_known() {
        let (mut tracker, queue) = tracker_with(&[
            (3, 1, Item::None),
            (3, 2, Item::None),
            (3, 7, Item::None),
        ]);
        let mut grid = known_grid();
        grid.set_cell(&Position::new(4, 4), Some(1));

        scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(
            vec![
                Command::Dig(Position::new(4, 4), DigIntent::Ore),
                Command::Move(Position::new(5, 5)),
                Command::Move(Position::new(5, 5)),
            ],
            tracker.commands()
        );
    }

    #[test]
    fn test_ore_claimed_by_kept_orders_still_counts_as_known() {
        let (mut tracker, queue) = tracker_with(&[(3, 1, Item::None), (3, 2, Item::None)]);
        let mut grid = known_grid();
        grid.set_cell(&Position::new(4, 4), Some(1));
        // A robot outside the queue already holds the only unit
        grid.reserve(&Position::new(4, 4));

        let plan = scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(0, plan.ore_claims);
        assert_eq!(
            vec![Command::Move(Position::new(5, 5)), Command::Move(Position::new(5, 5))],
            tracker.commands()
        );
    }

    #[test]
    fn test_no_ore_sends_first_home_and_others_to_center() {
        let (mut tracker, queue) = tracker_with(&[
            (4, 6, Item::None),
            (5, 1, Item::None),
            (8, 8, Item::None),
        ]);
        let mut grid = known_grid();

        let plan = scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(
            vec![
                Command::Move(Position::new(0, 6)),
                Command::Move(Position::new(5, 5)),
                Command::Move(Position::new(5, 5)),
            ],
            tracker.commands()
        );
        assert_eq!(2, plan.explorers);
    }

    #[test]
    fn test_only_one_radar_request_per_turn() {
        let (mut tracker, queue) = tracker_with(&[(0, 1, Item::None), (0, 2, Item::None)]);
        let mut grid = Grid::new(SIZE);
        let mut cooldowns = Cooldowns::default();

        let plan = scheduler().assign(&mut tracker, &mut grid, &mut cooldowns, &queue);

        assert!(plan.radar_requested);
        assert_eq!(5, cooldowns.radar);
        assert_eq!(Command::RequestRadar, tracker.commands()[0]);
        // Nothing known to dig, so the second robot falls back to the base move
        assert_eq!(Command::Move(Position::new(0, 2)), tracker.commands()[1]);
    }

    #[test]
    fn test_no_radar_request_below_threshold_or_on_cooldown() {
        let mut grid = known_grid();
        // 30% unknown
        for y in 0..3 {
            for x in 0..SIZE.x {
                grid.set_cell(&Position::new(x, y), None);
            }
        }
        let (mut tracker, queue) = tracker_with(&[(0, 1, Item::None)]);
        let plan = scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);
        assert!(!plan.radar_requested);

        let mut grid = Grid::new(SIZE);
        let mut cooldowns = Cooldowns { radar: 2, trap: 0 };
        let (mut tracker, queue) = tracker_with(&[(0, 1, Item::None)]);
        let plan = scheduler().assign(&mut tracker, &mut grid, &mut cooldowns, &queue);
        assert!(!plan.radar_requested);
        assert_eq!(2, cooldowns.radar);
    }

    #[test]
    fn test_radar_carrier_digs_best_placement() {
        let (mut tracker, queue) = tracker_with(&[(0, 4, Item::Radar)]);
        let mut grid = Grid::new(SIZE);
        let expected = CoverageScorer::new(4).best_placement(&grid);

        let plan = scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(Some(expected), plan.radar_placement);
        assert_eq!(
            vec![Command::Dig(expected.position, DigIntent::Radar)],
            tracker.commands()
        );
    }

    #[test]
    fn test_radar_carrier_away_from_base_is_idle() {
        let (mut tracker, queue) = tracker_with(&[(3, 4, Item::Radar)]);
        let mut grid = known_grid();
        grid.set_cell(&Position::new(5, 5), Some(1));

        scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(
            vec![Command::Dig(Position::new(5, 5), DigIntent::Ore)],
            tracker.commands()
        );
    }

    #[test]
    fn test_trap_carrier_at_base_joins_idle_queue() {
        let (mut tracker, queue) = tracker_with(&[(0, 4, Item::Trap)]);
        let mut grid = known_grid();
        grid.set_cell(&Position::new(1, 1), Some(1));

        scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

        assert_eq!(
            vec![Command::Dig(Position::new(1, 1), DigIntent::Ore)],
            tracker.commands()
        );
    }

    #[test]
    fn test_claims_never_exceed_available_ore() {
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let robots: Vec<(i32, i32, Item)> = (0..rng.gen_range(1..8))
                .map(|_| (rng.gen_range(1..10), rng.gen_range(0..10), Item::None))
                .collect();
            let (mut tracker, queue) = tracker_with(&robots);
            let mut grid = known_grid();
            for _ in 0..rng.gen_range(0..6) {
                let position = Position::new(rng.gen_range(1..10), rng.gen_range(0..10));
                grid.set_cell(&position, Some(rng.gen_range(0..3)));
            }
            let before = grid.clone();

            let plan =
                scheduler().assign(&mut tracker, &mut grid, &mut Cooldowns::default(), &queue);

            let mut claims: HashMap<Position, i32> = HashMap::new();
            for command in tracker.commands() {
                if let Command::Dig(target, DigIntent::Ore) = command {
                    *claims.entry(target).or_default() += 1;
                }
            }
            for (target, count) in &claims {
                assert!(*count <= before.ore_at(target));
                assert!(grid.ore_at(target) >= 0);
            }
            assert!(plan.ore_claims as u32 <= before.total_ore());
            assert_eq!(
                plan.ore_claims as u32,
                (robots.len() as u32).min(before.total_ore())
            );
        }
    }
}
