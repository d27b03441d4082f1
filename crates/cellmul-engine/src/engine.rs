use foundation::{Matrix, Product};
use gate::GateStats;
use rng::{populate, ValueSource};

use crate::config::EngineConfig;
use crate::context::Run;
use crate::error::EngineError;

/// A completed run: both inputs, the product, and what the gate saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub a: Matrix,
    pub b: Matrix,
    pub result: Matrix,
    pub stats: GateStats,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Multiplies caller-supplied matrices.
    pub fn multiply(&self, a: Matrix, b: Matrix) -> Result<Outcome, EngineError> {
        let product = Product::new(a.shape(), b.shape())?;
        self.execute(product, move |dst_a, dst_b| {
            *dst_a = a;
            *dst_b = b;
        })
    }

    /// Fills A then B row-major from `source` and multiplies them.
    pub fn run<S: ValueSource + ?Sized>(
        &self,
        product: Product,
        source: &mut S,
    ) -> Result<Outcome, EngineError> {
        self.execute(product, |a, b| {
            populate(a, source);
            populate(b, source);
        })
    }

    fn execute(
        &self,
        product: Product,
        fill: impl FnOnce(&mut Matrix, &mut Matrix),
    ) -> Result<Outcome, EngineError> {
        let mut run = Run::new(product, &self.config)?;
        run.populate(fill)?;

        let tasks = run.dispatch()?;
        let report = run.drain(tasks)?;
        let result = run.result()?;

        let ctx = run.context();
        let stats = ctx.gate().stats();
        log::info!(
            "{} cell(s) computed, peak {} of {} worker(s) active",
            report.completed,
            stats.peak_active,
            self.config.max_workers
        );
        Ok(Outcome {
            a: ctx.a().clone(),
            b: ctx.b().clone(),
            result,
            stats,
        })
    }
}
