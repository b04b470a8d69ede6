use std::{io::BufRead, str::FromStr};

use crate::api::{
    grid_size::GridSize,
    item::Item,
    snapshot::{CellReport, Entity, EntityKind, TurnSnapshot},
};

use super::ProtocolError;

/// Reads the judge's input, one turn at a time.
pub struct TurnReader<R> {
    input: R,
    line_number: usize,
}

impl<R: BufRead> TurnReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line_number: 0,
        }
    }

    /// Reads the `width height` header sent once before the first turn
    pub fn read_grid_size(&mut self) -> Result<GridSize, ProtocolError> {
        let line = self.expect_line("the grid size")?;
        let fields: Vec<usize> = self.parse_fields(&line, 2, "grid size")?;

        Ok(GridSize::new(fields[0], fields[1]))
    }

    /// Reads a full turn. Returns `None` when the input ends cleanly between turns.
    pub fn read_turn(&mut self, size: &GridSize) -> Result<Option<TurnSnapshot>, ProtocolError> {
        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        let scores: Vec<u32> = self.parse_fields(&line, 2, "scores")?;

        let mut cells = Vec::with_capacity(size.area());
        for _ in 0..size.y {
            let line = self.expect_line("a grid row")?;
            self.parse_row(&line, size.x, &mut cells)?;
        }

        let line = self.expect_line("the entity header")?;
        let header: Vec<u32> = self.parse_fields(&line, 3, "entity header")?;
        let (entity_count, radar_cooldown, trap_cooldown) = (header[0], header[1], header[2]);

        let mut entities = Vec::new();
        for _ in 0..entity_count {
            let line = self.expect_line("an entity")?;
            entities.push(self.parse_entity(&line)?);
        }

        Ok(Some(TurnSnapshot {
            my_score: scores[0],
            opponent_score: scores[1],
            cells,
            radar_cooldown,
            trap_cooldown,
            entities,
        }))
    }
}

// Private functions
impl<R: BufRead> TurnReader<R> {
    fn next_line(&mut self) -> Result<Option<String>, ProtocolError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(line.trim_end().to_string()))
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.next_line()?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }

    fn malformed(&self, reason: String) -> ProtocolError {
        ProtocolError::MalformedLine {
            line: self.line_number,
            reason,
        }
    }

    fn parse_fields<T: FromStr>(
        &self,
        line: &str,
        count: usize,
        what: &str,
    ) -> Result<Vec<T>, ProtocolError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < count {
            return Err(self.malformed(format!(
                "expected {count} fields for {what}, found {}",
                tokens.len()
            )));
        }

        tokens[..count]
            .iter()
            .map(|token| {
                token
                    .parse::<T>()
                    .map_err(|_| self.malformed(format!("invalid {what} field '{token}'")))
            })
            .collect()
    }

    fn parse_row(
        &self,
        line: &str,
        width: usize,
        cells: &mut Vec<CellReport>,
    ) -> Result<(), ProtocolError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 * width {
            return Err(self.malformed(format!(
                "expected {} tokens for a grid row, found {}",
                2 * width,
                tokens.len()
            )));
        }

        for pair in tokens[..2 * width].chunks(2) {
            // Anything that is not a number, usually "?", means not yet revealed
            let ore = pair[0].parse::<u32>().ok();
            let hole = pair[1]
                .parse::<u8>()
                .map_err(|_| self.malformed(format!("invalid hole flag '{}'", pair[1])))?;
            cells.push(CellReport {
                ore,
                hole: hole != 0,
            });
        }

        Ok(())
    }

    fn parse_entity(&self, line: &str) -> Result<Entity, ProtocolError> {
        let fields: Vec<i32> = self.parse_fields(line, 5, "entity")?;

        let id = u32::try_from(fields[0])
            .map_err(|_| self.malformed(format!("negative entity id {}", fields[0])))?;
        let kind = EntityKind::from_code(fields[1])
            .ok_or_else(|| self.malformed(format!("unknown entity type {}", fields[1])))?;
        let item = Item::from_code(fields[4])
            .ok_or_else(|| self.malformed(format!("unknown item {}", fields[4])))?;

        Ok(Entity {
            id,
            kind,
            x: fields[2],
            y: fields[3],
            item,
        })
    }
}
