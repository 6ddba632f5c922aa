//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in horologe-core, written against the horologe-hal traits:
//!
//! - RTC (DS3231 register codec over I2C)
//! - Display (TM1637 bit-banged two-wire codec)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod rtc;
