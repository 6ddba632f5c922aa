//! Board-agnostic core logic for the Horologe clock firmware
//!
//! This crate contains everything that does not touch hardware directly:
//!
//! - Calendar time representation and epoch conversion
//! - Collaborator traits (RTC, display, epoch store, status output)
//! - Reconciliation state machine
//! - The orchestrator that picks the authoritative time source
//! - Network sync handoff between tasks
//! - Configuration types and the TOML subset parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod reconcile;
pub mod state;
pub mod time;
pub mod traits;

pub use error::ClockError;
pub use time::CivilTime;
