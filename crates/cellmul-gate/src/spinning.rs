//! Busy-waiting gate built on `spin::Mutex`. Waiters poll the counter and
//! yield their time slice between attempts instead of parking.

use foundation::{AdmissionGate, ConfigError, GateStats};

use crate::state::GateState;

pub struct SpinGate {
    state: spin::Mutex<GateState>,
}

impl SpinGate {
    pub fn new(max_concurrent: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            state: spin::Mutex::new(GateState::new(max_concurrent)?),
        })
    }

    fn try_acquire(&self) -> Option<usize> {
        let mut state = self.state.lock();
        (!state.is_full()).then(|| state.admit())
    }
}

impl AdmissionGate for SpinGate {
    fn acquire(&self) {
        loop {
            if let Some(active) = self.try_acquire() {
                log::debug!("active workers = {}", active);
                return;
            }
            std::thread::yield_now();
        }
    }

    fn release(&self) {
        self.state.lock().retire();
    }

    fn max_concurrent(&self) -> usize {
        self.state.lock().max()
    }

    fn active(&self) -> usize {
        self.state.lock().active()
    }

    fn stats(&self) -> GateStats {
        self.state.lock().stats()
    }
}
