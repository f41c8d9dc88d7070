//! Pure domain decision logic.

mod gate_policy;

pub use gate_policy::{BlockReason, GateDecision, GatePolicy, MAX_AUTO_LOAD_BYTES};
