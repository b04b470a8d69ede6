use crate::api::{command::Command, grid_size::GridSize, snapshot::TurnSnapshot};

use super::{grid::Grid, robot::Robot};

/// Keeps one slot per robot of the fleet.
///
/// Slots are filled by order of appearance of our robots in each snapshot,
/// not by robot id. The order each robot is following is the only state
/// carried from one turn to the next.
pub struct RobotTracker {
    grid_size: GridSize,
    robots: Vec<Robot>,
}

impl RobotTracker {
    pub fn new(fleet_size: usize, grid_size: GridSize) -> Self {
        Self {
            grid_size,
            robots: vec![Robot::default(); fleet_size],
        }
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn robot_mut(&mut self, slot: usize) -> &mut Robot {
        &mut self.robots[slot]
    }

    /// Copies position, cargo and liveness from the snapshot. Commands are kept.
    pub fn refresh(&mut self, snapshot: &TurnSnapshot) {
        let mut reported = snapshot.own_robots();

        for robot in self.robots.iter_mut() {
            match reported.next() {
                Some(entity) => {
                    robot.id = entity.id;
                    robot.item = entity.item;
                    match entity.position(&self.grid_size) {
                        Some(position) if !entity.is_dead() => {
                            robot.position = position;
                            robot.alive = true;
                        }
                        _ => robot.alive = false,
                    }
                }
                None => robot.alive = false,
            }
        }

        if reported.next().is_some() {
            log::warn!(
                "More robots reported than the {} fleet slots, extra ones are ignored",
                self.robots.len()
            );
        }
    }

    /// Drops every order that no longer holds and returns the slots needing a new one.
    ///
    /// Dead robots are parked on WAIT and never queued.
    pub fn revalidate(&mut self, grid: &mut Grid) -> Vec<usize> {
        let mut needs_command = Vec::new();

        for (slot, robot) in self.robots.iter_mut().enumerate() {
            if !robot.alive {
                robot.wait();
                continue;
            }
            if robot.revalidate(grid) {
                log::debug!("slot {slot} keeps {}", robot.command());
                continue;
            }
            robot.wait();
            needs_command.push(slot);
        }

        needs_command
    }

    /// Orders to emit this turn, in slot order
    pub fn commands(&self) -> Vec<Command> {
        self.robots.iter().map(|r| *r.command()).collect()
    }
}
