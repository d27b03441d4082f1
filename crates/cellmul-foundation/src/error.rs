use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("matrix {name} has a zero dimension ({rows}x{cols})")]
    ZeroDimension {
        name: &'static str,
        rows: usize,
        cols: usize,
    },
    #[error("matrix {name} is too large to allocate ({rows}x{cols})")]
    TooLarge {
        name: &'static str,
        rows: usize,
        cols: usize,
    },
    #[error("inner dimensions differ: A has {a_cols} columns but B has {b_rows} rows")]
    InnerDimensionMismatch { a_cols: usize, b_rows: usize },
    #[error("row {row} has {len} values, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("max workers must be at least 1")]
    ZeroWorkers,
}
