//! Reconciliation state machine
//!
//! Tracks which source the clock currently trusts. The machine is
//! explicit, finite, and deterministic; the orchestrator feeds it events
//! and acts on the resulting state.

pub mod events;
pub mod machine;

pub use events::ClockEvent;
pub use machine::ClockState;
