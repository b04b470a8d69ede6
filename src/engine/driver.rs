use std::{
    io::{BufRead, Write},
    time::{Duration, Instant},
};

use crate::{
    api::{command::Command, grid_size::GridSize, snapshot::TurnSnapshot},
    config::FleetConfig,
    protocol::{reader::TurnReader, writer::CommandWriter, ProtocolError},
    terminal::Terminal,
};

use super::{
    coverage::CoverageScorer,
    grid::Grid,
    scheduler::{Cooldowns, Scheduler},
    tracker::RobotTracker,
};

/// Orchestrates one turn: refresh the beliefs, drop stale orders, plan, emit.
pub struct TurnDriver {
    grid: Grid,
    tracker: RobotTracker,
    scheduler: Scheduler,
    terminal: Terminal,
    turn: usize,
}

impl TurnDriver {
    pub fn new(grid_size: GridSize, config: &FleetConfig) -> Self {
        Self {
            grid: Grid::new(grid_size),
            tracker: RobotTracker::new(config.fleet_size, grid_size),
            scheduler: Scheduler::new(
                grid_size,
                CoverageScorer::new(config.reveal_radius),
                config.unknown_threshold,
                config.radar_cooldown,
            ),
            terminal: Terminal::new(config.debug_map),
            turn: 0,
        }
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Decides the commands of every robot slot for this snapshot
    pub fn play_turn(&mut self, snapshot: &TurnSnapshot) -> Vec<Command> {
        self.turn += 1;
        log::debug!("turn {} {snapshot}", self.turn);

        self.grid.refresh(snapshot);
        self.tracker.refresh(snapshot);

        log::debug!(
            "turn {} known ore {}, {:.0}% unknown",
            self.turn,
            self.grid.total_ore(),
            self.grid.unknown_fraction() * 100.0
        );

        let needs_command = self.tracker.revalidate(&mut self.grid);
        let mut cooldowns = Cooldowns {
            radar: snapshot.radar_cooldown,
            trap: snapshot.trap_cooldown,
        };
        let plan = self.scheduler.assign(
            &mut self.tracker,
            &mut self.grid,
            &mut cooldowns,
            &needs_command,
        );
        log::debug!("turn {} plan {plan}, cooldowns {cooldowns}", self.turn);

        self.terminal.print_grid(
            &self.grid,
            self.tracker.robots(),
            plan.radar_placement.as_ref(),
        );
        for robot in self.tracker.robots() {
            self.terminal.println(robot);
        }

        self.tracker.commands()
    }
}

/// Plays turns until the judge closes its input. Returns the number of turns played.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: &FleetConfig,
) -> Result<usize, ProtocolError> {
    let mut reader = TurnReader::new(input);
    let mut writer = CommandWriter::new(output);
    let budget = Duration::from_millis(config.turn_budget_ms);

    let grid_size = reader.read_grid_size()?;
    log::info!("Grid {grid_size}, fleet of {}", config.fleet_size);
    let mut driver = TurnDriver::new(grid_size, config);

    loop {
        let Some(snapshot) = reader.read_turn(&grid_size)? else {
            break;
        };
        // The wait for the judge's input is not ours to account for
        let started = Instant::now();
        let commands = driver.play_turn(&snapshot);
        writer.write_turn(&commands)?;

        let elapsed = started.elapsed();
        log::info!("{elapsed:?} elapsed in turn {}", driver.turn());
        if elapsed > budget {
            log::warn!(
                "Turn {} exceeded the {budget:?} budget ({elapsed:?})",
                driver.turn()
            );
        }
    }

    log::info!("Input closed after {} turns", driver.turn());
    Ok(driver.turn())
}
