//! The turn decision engine: beliefs, radar scoring, robot orders and planning.

pub mod coverage;
pub mod driver;
pub mod grid;
pub mod robot;
pub mod scheduler;
pub mod tracker;
