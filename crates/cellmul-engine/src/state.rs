//! Output buffer written concurrently by work units.
//!
//! Each cell has exactly one writer, so there is no lock; cells are atomics only
//! to make the cross-thread writes well defined. Every write happens before the
//! writer's thread is joined, and reads only happen after drain.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use foundation::{coordinates, Coordinate, Element, Matrix, Shape, SENTINEL};

struct Cell {
    value: AtomicI64,
    written: AtomicBool,
}

pub struct ResultGrid {
    shape: Shape,
    cells: Box<[Cell]>,
}

impl ResultGrid {
    /// Every cell starts at `SENTINEL` and unwritten.
    pub fn new(shape: Shape) -> Self {
        let cells = (0..shape.len())
            .map(|_| Cell {
                value: AtomicI64::new(SENTINEL),
                written: AtomicBool::new(false),
            })
            .collect();
        Self { shape, cells }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        self.shape
            .contains(coord)
            .then(|| &self.cells[coord.row * self.shape.cols + coord.col])
    }

    /// Writes one cell. Returns `false` if `coord` is out of range or the cell
    /// had already been written.
    pub fn store(&self, coord: Coordinate, value: Element) -> bool {
        let Some(cell) = self.cell(coord) else {
            return false;
        };
        if cell.written.swap(true, Ordering::Relaxed) {
            log::warn!("cell {} written more than once", coord);
            return false;
        }
        cell.value.store(value, Ordering::Relaxed);
        true
    }

    pub fn is_written(&self, coord: Coordinate) -> bool {
        self.cell(coord)
            .is_some_and(|c| c.written.load(Ordering::Relaxed))
    }

    /// Cells no work unit has written, row-major.
    pub fn unwritten(&self) -> Vec<Coordinate> {
        coordinates(self.shape)
            .filter(|&c| !self.is_written(c))
            .collect()
    }

    pub fn snapshot(&self) -> Matrix {
        let mut m = Matrix::filled(self.shape, SENTINEL);
        for (dst, cell) in m.as_mut_slice().iter_mut().zip(self.cells.iter()) {
            *dst = cell.value.load(Ordering::Relaxed);
        }
        m
    }
}
