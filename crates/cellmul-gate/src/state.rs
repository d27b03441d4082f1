use foundation::{ConfigError, GateStats};

/// Counter guarded by a gate's lock. Only ever touched while that lock is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateState {
    active: usize,
    max: usize,
    stats: GateStats,
}

impl GateState {
    pub fn new(max: usize) -> Result<Self, ConfigError> {
        if max == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(Self {
            active: 0,
            max,
            stats: GateStats::default(),
        })
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.active >= self.max
    }

    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub fn stats(&self) -> GateStats {
        self.stats
    }

    /// Takes a slot. Caller must have checked `!is_full()` under the same lock.
    pub fn admit(&mut self) -> usize {
        debug_assert!(!self.is_full());
        self.active += 1;
        self.stats.admitted += 1;
        self.stats.peak_active = self.stats.peak_active.max(self.active);
        self.active
    }

    /// Returns a slot. An unpaired release is ignored so the counter can never wrap.
    pub fn retire(&mut self) -> usize {
        if self.active == 0 {
            log::warn!("release without matching acquire ignored");
            return 0;
        }
        self.active -= 1;
        self.stats.released += 1;
        self.active
    }
}
