//! Line based adapters between the judge and the engine.
//!
//! The reader turns the judge's text into `TurnSnapshot`s, the writer turns
//! the engine's commands back into text. Neither takes any decision.

pub mod reader;
pub mod writer;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O failure on the judge stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed input on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
    #[error("Input ended while expecting {expected}")]
    UnexpectedEof { expected: &'static str },
}
