//! Calendar time
//!
//! All times handled by the core are UTC unless a name says otherwise.
//! Local time only exists at the rendering edge.

pub mod civil;

pub use civil::{CivilTime, MIN_YEAR};
