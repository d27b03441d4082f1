//! Blocking gate: one mutex around the counter plus a condition variable that
//! every release broadcasts on.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use foundation::{AdmissionGate, ConfigError, GateStats};

use crate::state::GateState;

pub struct CondvarGate {
    state: Mutex<GateState>,
    slot_freed: Condvar,
}

impl CondvarGate {
    pub fn new(max_concurrent: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            state: Mutex::new(GateState::new(max_concurrent)?),
            slot_freed: Condvar::new(),
        })
    }

    // The counter is consistent after every critical section, so a panic
    // elsewhere holding the lock does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AdmissionGate for CondvarGate {
    fn acquire(&self) {
        let mut state = self.lock();
        while state.is_full() {
            state = self
                .slot_freed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        let active = state.admit();
        log::debug!("active workers = {}", active);
    }

    fn release(&self) {
        let mut state = self.lock();
        state.retire();
        self.slot_freed.notify_all();
    }

    fn max_concurrent(&self) -> usize {
        self.lock().max()
    }

    fn active(&self) -> usize {
        self.lock().active()
    }

    fn stats(&self) -> GateStats {
        self.lock().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_acquire_release_counts() {
        let gate = CondvarGate::new(3).unwrap();
        gate.acquire();
        gate.acquire();
        assert_eq!(gate.active(), 2);
        assert!(!gate.is_saturated());
        gate.acquire();
        assert!(gate.is_saturated());
        gate.release();
        gate.release();
        gate.release();
        assert_eq!(gate.active(), 0);
        assert_eq!(
            gate.stats(),
            GateStats {
                admitted: 3,
                released: 3,
                peak_active: 3
            }
        );
    }

    #[test]
    fn test_acquire_blocks_until_release() {
        let gate = Arc::new(CondvarGate::new(1).unwrap());
        gate.acquire();

        let entered = Arc::new(AtomicBool::new(false));
        let waiter = {
            let gate = Arc::clone(&gate);
            let entered = Arc::clone(&entered);
            thread::spawn(move || {
                gate.acquire();
                entered.store(true, Ordering::SeqCst);
                gate.release();
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!entered.load(Ordering::SeqCst));

        gate.release();
        waiter.join().unwrap();
        assert!(entered.load(Ordering::SeqCst));
        assert_eq!(gate.active(), 0);
        assert_eq!(gate.stats().peak_active, 1);
    }

    #[test]
    fn test_many_contenders_never_exceed_cap() {
        let gate = Arc::new(CondvarGate::new(4).unwrap());
        let handles: Vec<_> = (0..64)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || {
                    gate.acquire();
                    assert!(gate.active() <= 4);
                    thread::yield_now();
                    gate.release();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let stats = gate.stats();
        assert_eq!(stats.admitted, 64);
        assert_eq!(stats.released, 64);
        assert!(stats.peak_active <= 4);
        assert_eq!(gate.active(), 0);
    }
}
