//! Vocabulary shared by the protocol adapters and the decision engine

pub mod command;
pub mod grid_size;
pub mod item;
pub mod position;
pub mod snapshot;
