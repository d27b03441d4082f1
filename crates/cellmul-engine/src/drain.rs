use foundation::Coordinate;

use crate::dispatch::TaskSet;
use crate::error::{EngineError, WorkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    /// Workers that returned a value.
    pub completed: usize,
}

impl TaskSet {
    /// Joins every worker. Join order is dispatch order, so it tolerates any
    /// completion order; failures are reported only after all are joined.
    pub fn drain(self) -> Result<DrainReport, EngineError> {
        let mut completed = 0;
        let mut failures: Vec<WorkError> = Vec::new();
        let mut panicked: Vec<Coordinate> = Vec::new();

        for (coord, handle) in self.tasks {
            match handle.join() {
                Ok(Ok(_)) => completed += 1,
                Ok(Err(err)) => {
                    log::warn!("worker for cell {} failed: {}", coord, err);
                    failures.push(err);
                }
                Err(_) => {
                    log::error!("worker for cell {} panicked", coord);
                    panicked.push(coord);
                }
            }
        }

        if let Some(&coord) = panicked.first() {
            return Err(EngineError::WorkerPanicked {
                coord,
                count: panicked.len(),
            });
        }
        let failed = failures.len();
        if let Some(first) = failures.into_iter().next() {
            return Err(EngineError::Worker { failed, first });
        }

        log::debug!("drained {} worker(s)", completed);
        Ok(DrainReport { completed })
    }
}
