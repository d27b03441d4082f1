use std::time::Duration;

use derive_builder::Builder;
use foundation::{ConfigError, DEFAULT_MAX_WORKERS};
use gate::GateKind;

/// Knobs fixed for the lifetime of one run.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct EngineConfig {
    /// Upper bound on simultaneously active workers.
    pub max_workers: usize,
    pub gate: GateKind,
    /// Extra time each worker holds its slot after writing its cell.
    pub work_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            gate: GateKind::default(),
            work_delay: Duration::ZERO,
        }
    }
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.max_workers {
            Some(0) => Err(ConfigError::ZeroWorkers.to_string()),
            _ => Ok(()),
        }
    }
}
