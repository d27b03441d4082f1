use std::sync::Arc;
use std::thread::{self, JoinHandle};

use foundation::{coordinates, Coordinate, Element};

use crate::context::RunContext;
use crate::error::{EngineError, WorkError};
use crate::unit;

pub(crate) type WorkerHandle = JoinHandle<Result<Element, WorkError>>;

/// Handles of every launched worker, in dispatch order.
#[derive(Debug)]
pub struct TaskSet {
    pub(crate) tasks: Vec<(Coordinate, WorkerHandle)>,
}

impl TaskSet {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            tasks: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Coordinates in the order their workers were launched.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.tasks.iter().map(|(c, _)| *c)
    }
}

/// Walks the result grid row-major, blocking on the gate before each launch.
///
/// The gate is the only blocking point. If a thread cannot be spawned the run
/// is abandoned: already-launched workers are detached, not cancelled, and the
/// slot taken for the failed launch is returned with its permit.
pub fn dispatch(ctx: &Arc<RunContext>) -> Result<TaskSet, EngineError> {
    let shape = ctx.product().result_shape();
    let mut tasks = TaskSet::with_capacity(shape.len());

    for coord in coordinates(shape) {
        let permit = gate::enter_owned(Arc::clone(ctx.gate()));
        let worker_ctx = Arc::clone(ctx);
        let handle = thread::Builder::new()
            .name(format!("cell-{}-{}", coord.row, coord.col))
            .spawn(move || unit::run_unit(&worker_ctx, coord, permit))
            .map_err(|source| EngineError::Launch { coord, source })?;
        tasks.tasks.push((coord, handle));
    }

    log::debug!("dispatched {} worker(s)", tasks.len());
    Ok(tasks)
}
