//! Bounded-concurrency matrix product.
//!
//! Every output cell is computed by its own worker thread. The dispatcher walks
//! the result grid in row-major order and takes an admission slot before each
//! launch, so at most `max_workers` cells are in flight at once. Workers hand
//! their slot back when they finish, however they finish.

pub mod config;
pub mod context;
pub mod dispatch;
pub mod drain;
pub mod engine;
pub mod error;
pub mod render;
pub mod state;
pub mod unit;

pub use config::{EngineConfig, EngineConfigBuilder, EngineConfigBuilderError};
pub use context::{Phase, Run, RunContext};
pub use dispatch::{dispatch, TaskSet};
pub use drain::DrainReport;
pub use engine::{Engine, Outcome};
pub use error::{EngineError, WorkError};
pub use state::ResultGrid;

pub use foundation::{Coordinate, Element, Matrix, Product, Shape, SENTINEL};
pub use gate::{GateKind, GateStats};

#[cfg(test)]
mod tests;
