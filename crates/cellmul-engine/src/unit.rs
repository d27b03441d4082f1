//! The per-cell work unit.

use std::thread;

use foundation::{AdmissionGate, Coordinate, Element};
use gate::OwnedPermit;

use crate::context::RunContext;
use crate::error::WorkError;

/// Dot product of row `coord.row` of A with column `coord.col` of B.
pub fn compute_cell(ctx: &RunContext, coord: Coordinate) -> Result<Element, WorkError> {
    let product = ctx.product();
    let shape = product.result_shape();
    if !shape.contains(coord) {
        return Err(WorkError::OutOfBounds { coord, shape });
    }
    let (Some(row), Some(col)) = (ctx.a().row(coord.row), ctx.b().column(coord.col)) else {
        return Err(WorkError::OutOfBounds { coord, shape });
    };
    dot(coord, product.inner_dim(), row, ctx.b().rows(), col)
}

/// Runs exactly `inner_dim` multiply-adds; mismatched operands are refused
/// rather than truncated.
fn dot(
    coord: Coordinate,
    inner_dim: usize,
    row: &[Element],
    col_len: usize,
    col: impl Iterator<Item = Element>,
) -> Result<Element, WorkError> {
    if row.len() != inner_dim || col_len != inner_dim {
        return Err(WorkError::InnerDimension {
            coord,
            expected: inner_dim,
            row: row.len(),
            col: col_len,
        });
    }
    row.iter()
        .zip(col)
        .try_fold(0 as Element, |acc, (&x, y)| {
            x.checked_mul(y).and_then(|p| acc.checked_add(p))
        })
        .ok_or(WorkError::Overflow { coord })
}

/// Body of one worker thread. Holding `permit` keeps the worker's admission
/// slot; it is released when this function returns or unwinds.
pub fn run_unit(
    ctx: &RunContext,
    coord: Coordinate,
    permit: OwnedPermit<dyn AdmissionGate>,
) -> Result<Element, WorkError> {
    let _permit = permit;
    let value = compute_cell(ctx, coord)?;
    if !ctx.result().store(coord, value) {
        return Err(WorkError::Rewrite { coord });
    }

    let delay = ctx.work_delay();
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    log::trace!("cell {} = {}", coord, value);
    Ok(value)
}
