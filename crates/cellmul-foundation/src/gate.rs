/// Counters kept by every gate implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStats {
    /// Successful `acquire` calls.
    pub admitted: usize,
    pub released: usize,
    /// Highest `active` value ever observed under the gate lock.
    pub peak_active: usize,
}

/// Bounded admission counter shared by the dispatcher and every work unit.
///
/// `acquire` blocks until `active() < max_concurrent()` and then takes a slot;
/// `release` hands one back and wakes waiters. Callers must pair every
/// successful `acquire` with exactly one `release`, on every exit path.
pub trait AdmissionGate: Send + Sync {
    fn acquire(&self);
    fn release(&self);

    fn max_concurrent(&self) -> usize;
    fn active(&self) -> usize;
    fn stats(&self) -> GateStats;

    fn is_saturated(&self) -> bool {
        self.active() >= self.max_concurrent()
    }
}
