pub mod error;
pub mod gate;
pub mod matrix;
pub mod shape;

pub use error::ConfigError;
pub use gate::{AdmissionGate, GateStats};
pub use matrix::Matrix;
pub use shape::{coordinates, Coordinate, Product, Shape, MAX_CELLS};

/// Scalar stored in every matrix cell.
pub type Element = i64;

/// Value a result cell holds until its work unit writes it.
///
/// Populated inputs are drawn from `[0, VALUE_UPPER_BOUND)`, so no real product
/// can collide with it.
pub const SENTINEL: Element = -1;

/// Exclusive upper bound for randomly populated input values.
pub const VALUE_UPPER_BOUND: Element = 20;

/// Admission cap used when none is configured.
pub const DEFAULT_MAX_WORKERS: usize = 5;
