//! RAII slots. Dropping a permit releases its slot exactly once, which covers
//! early returns and unwinding as well as normal completion.

use std::sync::Arc;

use foundation::AdmissionGate;

/// Owns a handle to its gate, so it can move to another thread.
#[must_use = "dropping a permit immediately releases its slot"]
pub struct OwnedPermit<G: AdmissionGate + ?Sized> {
    gate: Arc<G>,
}

impl<G: AdmissionGate + ?Sized> Drop for OwnedPermit<G> {
    fn drop(&mut self) {
        self.gate.release();
    }
}

/// Blocks until a slot is free and returns a permit that can be sent to a worker.
pub fn enter_owned<G: AdmissionGate + ?Sized>(gate: Arc<G>) -> OwnedPermit<G> {
    gate.acquire();
    OwnedPermit { gate }
}
