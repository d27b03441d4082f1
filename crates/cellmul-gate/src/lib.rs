pub mod condvar;
pub mod kind;
pub mod permit;
pub mod spinning;
pub mod state;

pub use condvar::CondvarGate;
pub use kind::GateKind;
pub use permit::{enter_owned, OwnedPermit};
pub use spinning::SpinGate;
pub use state::GateState;

pub use foundation::{AdmissionGate, GateStats};
