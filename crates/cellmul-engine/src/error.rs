use std::io;

use foundation::{ConfigError, Coordinate, Shape};
use thiserror::Error;

use crate::context::Phase;

/// Failure inside a single work unit. The unit's slot is still released.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    #[error("cell {coord} is outside the {shape} result")]
    OutOfBounds { coord: Coordinate, shape: Shape },
    #[error("dot product for cell {coord} overflowed")]
    Overflow { coord: Coordinate },
    #[error("cell {coord} pairs a row of {row} with a column of {col}, expected {expected}")]
    InnerDimension {
        coord: Coordinate,
        expected: usize,
        row: usize,
        col: usize,
    },
    #[error("cell {coord} was already written")]
    Rewrite { coord: Coordinate },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("run is in phase {actual:?}, expected {expected:?}")]
    PhaseViolation { expected: Phase, actual: Phase },
    #[error("run context was shared before dispatch")]
    SharedBeforeDispatch,
    #[error("matrix {name} was filled as {found}, expected {expected}")]
    Reshaped {
        name: &'static str,
        expected: Shape,
        found: Shape,
    },
    #[error("failed to launch worker for cell {coord}")]
    Launch {
        coord: Coordinate,
        #[source]
        source: io::Error,
    },
    #[error("{failed} worker(s) failed")]
    Worker {
        failed: usize,
        #[source]
        first: WorkError,
    },
    #[error("{count} worker(s) panicked, first at cell {coord}")]
    WorkerPanicked { coord: Coordinate, count: usize },
    #[error("{count} result cell(s) never written, first at {first}")]
    Unwritten { first: Coordinate, count: usize },
}
