use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use foundation::{AdmissionGate, ConfigError};

use crate::{CondvarGate, SpinGate};

/// Which admission gate implementation a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum GateKind {
    /// Mutex + condition variable; waiters park until a release.
    #[default]
    Condvar,
    /// Spin lock; waiters poll and yield.
    Spin,
}

impl GateKind {
    pub fn build(self, max_concurrent: usize) -> Result<Arc<dyn AdmissionGate>, ConfigError> {
        Ok(match self {
            GateKind::Condvar => Arc::new(CondvarGate::new(max_concurrent)?),
            GateKind::Spin => Arc::new(SpinGate::new(max_concurrent)?),
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GateKind::Condvar => "condvar",
            GateKind::Spin => "spin",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "condvar" => Ok(GateKind::Condvar),
            "spin" => Ok(GateKind::Spin),
            other => Err(format!("unknown gate kind `{other}` (expected condvar or spin)")),
        }
    }
}
