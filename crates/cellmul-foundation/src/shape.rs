use core::fmt;

use crate::error::ConfigError;
use crate::Element;

/// One output cell, identified by row then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Cell count. Only meaningful for shapes that passed `checked_len`,
    /// which every `Product` shape has.
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn checked_len(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub const fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Largest cell count a single matrix may have: its buffer must fit in
/// `isize::MAX` bytes.
pub const MAX_CELLS: usize = isize::MAX as usize / core::mem::size_of::<Element>();

/// A validated `A * B` pairing. Construction is the only place dimension
/// mismatches are caught, so it happens before any buffer is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    a: Shape,
    b: Shape,
}

impl Product {
    pub fn new(a: Shape, b: Shape) -> Result<Self, ConfigError> {
        for (name, shape) in [("A", a), ("B", b)] {
            if shape.is_empty() {
                return Err(ConfigError::ZeroDimension {
                    name,
                    rows: shape.rows,
                    cols: shape.cols,
                });
            }
        }
        if a.cols != b.rows {
            return Err(ConfigError::InnerDimensionMismatch {
                a_cols: a.cols,
                b_rows: b.rows,
            });
        }
        let result = Shape::new(a.rows, b.cols);
        for (name, shape) in [("A", a), ("B", b), ("C", result)] {
            if shape.checked_len().map_or(true, |n| n > MAX_CELLS) {
                return Err(ConfigError::TooLarge {
                    name,
                    rows: shape.rows,
                    cols: shape.cols,
                });
            }
        }
        Ok(Self { a, b })
    }

    /// `rows_a x cols_a` times `cols_a x cols_b`, the command-line form.
    pub fn from_dims(rows_a: usize, cols_a: usize, cols_b: usize) -> Result<Self, ConfigError> {
        Self::new(Shape::new(rows_a, cols_a), Shape::new(cols_a, cols_b))
    }

    pub fn a(&self) -> Shape {
        self.a
    }

    pub fn b(&self) -> Shape {
        self.b
    }

    pub fn result_shape(&self) -> Shape {
        Shape::new(self.a.rows, self.b.cols)
    }

    pub fn inner_dim(&self) -> usize {
        self.a.cols
    }

    pub fn cell_count(&self) -> usize {
        self.result_shape().len()
    }
}

/// Every coordinate of `shape` in row-major order.
pub fn coordinates(shape: Shape) -> impl ExactSizeIterator<Item = Coordinate> {
    let cols = shape.cols;
    (0..shape.len()).map(move |i| Coordinate::new(i / cols, i % cols))
}
