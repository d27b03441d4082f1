//! Dense row-major integer matrix.
//!
//! Storage is a single flat buffer; `(row, col)` lives at `row * cols + col`.

use crate::error::ConfigError;
use crate::shape::{Coordinate, Shape};
use crate::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    shape: Shape,
    data: Vec<Element>,
}

impl Matrix {
    pub fn filled(shape: Shape, value: Element) -> Self {
        Self {
            shape,
            data: vec![value; shape.len()],
        }
    }

    pub fn zeroed(shape: Shape) -> Self {
        Self::filled(shape, 0)
    }

    pub fn from_rows(rows: Vec<Vec<Element>>) -> Result<Self, ConfigError> {
        let expected = rows.first().map_or(0, Vec::len);
        let shape = Shape::new(rows.len(), expected);
        let mut data = Vec::with_capacity(shape.len());
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != expected {
                return Err(ConfigError::RaggedRows {
                    row,
                    len: values.len(),
                    expected,
                });
            }
            data.extend(values);
        }
        Ok(Self { shape, data })
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.shape
            .contains(Coordinate::new(row, col))
            .then(|| row * self.shape.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Element> {
        self.index(row, col).map(|i| self.data[i])
    }

    /// Returns `false` without writing when `(row, col)` is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Element) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Element]> {
        (row < self.shape.rows).then(|| {
            let start = row * self.shape.cols;
            &self.data[start..start + self.shape.cols]
        })
    }

    /// Strided view of one column, top to bottom.
    pub fn column(&self, col: usize) -> Option<impl Iterator<Item = Element> + '_> {
        (col < self.shape.cols).then(|| {
            self.data
                .iter()
                .skip(col)
                .step_by(self.shape.cols)
                .copied()
        })
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Element]> {
        // `chunks_exact` panics on a zero chunk size.
        self.data.chunks_exact(self.shape.cols.max(1))
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<Element>> {
        self.rows_iter().map(<[Element]>::to_vec).collect()
    }
}
