//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod clock;
pub mod link_rx;
pub mod link_tx;

pub use clock::{clock_task, ClockOrchestrator};
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
