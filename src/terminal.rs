use std::{
    fmt::Display,
    io::{stderr, Stderr, Write},
};

use crossterm::{
    style::{Color, PrintStyledContent, Stylize},
    QueueableCommand,
};

use crate::{
    api::position::Position,
    engine::{coverage::Placement, grid::Grid, robot::Robot},
};

/// Diagnostic console on stderr.
///
/// stdout belongs to the judge, so anything meant for humans goes through
/// here. When disabled every call is a no-op.
pub struct Terminal<W: Write = Stderr> {
    output: W,
    enabled: bool,
}

impl Terminal<Stderr> {
    pub fn new(enabled: bool) -> Self {
        Self::with_output(stderr(), enabled)
    }
}

impl<W: Write> Terminal<W> {
    pub fn with_output(output: W, enabled: bool) -> Self {
        Self { output, enabled }
    }

    pub fn println<T: Display>(&mut self, printable: T) {
        if self.enabled {
            let _ = writeln!(self.output, "{printable}");
        }
    }

    /// Draws the belief grid: our robots by slot number, the radar pick as
    /// `R`, robot targets as `*`, unknown cells as `?` and known ore as its
    /// speculative count.
    pub fn print_grid(&mut self, grid: &Grid, robots: &[Robot], radar: Option<&Placement>) {
        if !self.enabled {
            return;
        }

        let size = *grid.size();
        for y in 0..size.y {
            for x in 0..size.x {
                let position = Position { x, y };
                let slot = robots
                    .iter()
                    .position(|r| r.alive && r.position == position);

                let glyph = if let Some(slot) = slot {
                    format!("{slot:>2}").with(Color::Cyan).bold()
                } else if radar.is_some_and(|p| p.position == position) {
                    " R".to_string().with(Color::Magenta).bold()
                } else if robots
                    .iter()
                    .any(|r| r.alive && r.command().target() == Some(position))
                {
                    " *".to_string().with(Color::Green)
                } else if grid.is_unknown(&position) {
                    " ?".to_string().with(Color::DarkGrey)
                } else if grid.ore_at(&position) > 0 {
                    format!("{:>2}", grid.ore_at(&position)).with(Color::Yellow)
                } else {
                    " .".to_string().with(Color::Grey)
                };
                let _ = self.output.queue(PrintStyledContent(glyph));
            }
            let _ = writeln!(self.output);
        }

        let _ = self.output.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{grid_size::GridSize, item::Item};

    fn render(enabled: bool) -> String {
        let mut grid = Grid::new(GridSize::new(4, 2));
        grid.set_cell(&Position::new(1, 0), Some(3));
        grid.set_cell(&Position::new(2, 0), Some(0));
        let robots = vec![Robot::new(0, Position::new(0, 1), Item::None)];
        let radar = Placement {
            position: Position::new(3, 1),
            score: 4,
        };

        let mut terminal = Terminal::with_output(Vec::new(), enabled);
        terminal.print_grid(&grid, &robots, Some(&radar));
        terminal.println("done");

        String::from_utf8(terminal.output).unwrap()
    }

    #[test]
    fn test_print_grid() {
        let text = render(true);

        assert!(text.contains(" ?"));
        assert!(text.contains(" 3"));
        assert!(text.contains(" ."));
        assert!(text.contains(" R"));
        assert!(text.contains(" 0"));
        assert!(text.ends_with("done\n"));
        assert_eq!(3, text.lines().count());
    }

    #[test]
    fn test_println_robot_summary() {
        let robot = Robot::new(7, Position::new(0, 1), Item::Ore);
        let mut terminal = Terminal::with_output(Vec::new(), true);

        terminal.println(&robot);

        let text = String::from_utf8(terminal.output).unwrap();
        assert_eq!(format!("{robot}\n"), text);
        assert!(text.starts_with("Robot (7)"));
    }

    #[test]
    fn test_disabled_terminal_is_silent() {
        assert!(render(false).is_empty());
    }
}
