//! Network Co-processor Link Protocol
//!
//! The clock has no network stack of its own. A co-processor owns the
//! network connection and time sync, and talks to the clock over UART.
//! The clock only ever receives corrected epochs and pings, and only ever
//! sends status lines, sync results and pongs.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 0x55  │ 1B     │ 1B   │ 0–64B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! CHECKSUM is the XOR of LENGTH, TYPE and every payload byte.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{ClockMessage, LinkCommand};
