//! Collaborator traits
//!
//! These traits define the interface between the reconciliation logic
//! and the hardware drivers or firmware services behind it.

pub mod display;
pub mod rtc;
pub mod status;
pub mod store;

pub use display::{ClockDisplay, Pattern};
pub use rtc::RtcClock;
pub use status::StatusSink;
pub use store::{EpochStore, StoreError};
