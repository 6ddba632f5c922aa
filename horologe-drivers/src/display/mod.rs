//! Numeric display drivers

pub mod tm1637;

pub use tm1637::{DigitFrame, Tm1637};
