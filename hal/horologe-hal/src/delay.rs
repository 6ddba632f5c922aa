//! Busy-wait delays
//!
//! Bit-banged protocols separate line transitions with short fixed waits.
//! Drivers take the wait as a trait so tests can substitute a fake clock
//! that only records the requested time.

/// Blocking microsecond delay
pub trait DelayUs {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}
