use std::sync::Arc;
use std::time::Duration;

use foundation::{AdmissionGate, Matrix, Product};

use crate::config::EngineConfig;
use crate::dispatch::{self, TaskSet};
use crate::drain::DrainReport;
use crate::error::EngineError;
use crate::state::ResultGrid;

/// Lifecycle of a run. Transitions only ever move one step forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Buffers allocated, inputs not yet filled.
    Init,
    /// A and B filled, every result cell at the sentinel.
    Populated,
    Dispatching,
    Draining,
    /// Every cell holds its product.
    Done,
}

/// Everything a work unit needs, shared by `Arc` between the dispatcher and
/// every worker. A and B are read-only once the run leaves `Init`.
pub struct RunContext {
    product: Product,
    a: Matrix,
    b: Matrix,
    result: ResultGrid,
    gate: Arc<dyn AdmissionGate>,
    work_delay: Duration,
}

impl RunContext {
    pub fn product(&self) -> Product {
        self.product
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }

    pub fn result(&self) -> &ResultGrid {
        &self.result
    }

    pub fn gate(&self) -> &Arc<dyn AdmissionGate> {
        &self.gate
    }

    pub fn work_delay(&self) -> Duration {
        self.work_delay
    }
}

/// One multiplication, driven through its phases by the calling thread.
pub struct Run {
    ctx: Arc<RunContext>,
    phase: Phase,
}

impl Run {
    /// Allocates A, B and the result grid for `product` and builds the gate.
    pub fn new(product: Product, config: &EngineConfig) -> Result<Self, EngineError> {
        let gate = config.gate.build(config.max_workers)?;
        let ctx = RunContext {
            product,
            a: Matrix::zeroed(product.a()),
            b: Matrix::zeroed(product.b()),
            result: ResultGrid::new(product.result_shape()),
            gate,
            work_delay: config.work_delay,
        };
        log::debug!(
            "allocated {} * {} with {} {} slot(s)",
            product.a(),
            product.b(),
            config.max_workers,
            config.gate
        );
        Ok(Self {
            ctx: Arc::new(ctx),
            phase: Phase::Init,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &Arc<RunContext> {
        &self.ctx
    }

    fn advance(&mut self, expected: Phase, next: Phase) -> Result<(), EngineError> {
        if self.phase != expected {
            return Err(EngineError::PhaseViolation {
                expected,
                actual: self.phase,
            });
        }
        log::trace!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Fills A and B in place. `Init -> Populated`.
    ///
    /// `fill` may replace either matrix but not change its shape; a reshaped
    /// input leaves the run in `Init`.
    pub fn populate(
        &mut self,
        fill: impl FnOnce(&mut Matrix, &mut Matrix),
    ) -> Result<(), EngineError> {
        self.advance(Phase::Init, Phase::Populated)?;
        let Some(ctx) = Arc::get_mut(&mut self.ctx) else {
            self.phase = Phase::Init;
            return Err(EngineError::SharedBeforeDispatch);
        };
        fill(&mut ctx.a, &mut ctx.b);

        let product = ctx.product;
        for (name, expected, found) in [
            ("A", product.a(), ctx.a.shape()),
            ("B", product.b(), ctx.b.shape()),
        ] {
            if expected != found {
                self.phase = Phase::Init;
                return Err(EngineError::Reshaped {
                    name,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Launches one worker per cell. `Populated -> Dispatching`.
    pub fn dispatch(&mut self) -> Result<TaskSet, EngineError> {
        self.advance(Phase::Populated, Phase::Dispatching)?;
        dispatch::dispatch(&self.ctx)
    }

    /// Joins every worker and checks that every cell was written.
    /// `Dispatching -> Draining -> Done`.
    pub fn drain(&mut self, tasks: TaskSet) -> Result<DrainReport, EngineError> {
        self.advance(Phase::Dispatching, Phase::Draining)?;
        let report = tasks.drain()?;

        let unwritten = self.ctx.result.unwritten();
        if let Some(&first) = unwritten.first() {
            return Err(EngineError::Unwritten {
                first,
                count: unwritten.len(),
            });
        }
        self.advance(Phase::Draining, Phase::Done)?;
        Ok(report)
    }

    /// The finished product. Only available in `Done`.
    pub fn result(&self) -> Result<Matrix, EngineError> {
        if self.phase != Phase::Done {
            return Err(EngineError::PhaseViolation {
                expected: Phase::Done,
                actual: self.phase,
            });
        }
        Ok(self.ctx.result.snapshot())
    }
}
