use std::io::Write;

use crate::api::command::Command;

use super::ProtocolError;

/// Writes one command line per robot slot and flushes after each turn.
pub struct CommandWriter<W> {
    output: W,
}

impl<W: Write> CommandWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn write_turn(&mut self, commands: &[Command]) -> Result<(), ProtocolError> {
        for command in commands {
            writeln!(self.output, "{command}")?;
        }
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.output
    }
}
