//! Status line output
//!
//! Logs each line over defmt and hands it to the link TX task.

use defmt::*;

use horologe_core::reconcile::StatusLine;
use horologe_core::traits::StatusSink;

use crate::channels::STATUS_LINE;

/// Status sink backed by the RTT log and the serial link
#[derive(Default)]
pub struct LinkStatusSink;

impl LinkStatusSink {
    pub const fn new() -> Self {
        Self
    }
}

impl StatusSink for LinkStatusSink {
    fn publish(&mut self, line: &str) {
        info!("{=str}", line);

        let mut out = StatusLine::new();
        for c in line.chars() {
            if out.push(c).is_err() {
                break;
            }
        }
        STATUS_LINE.signal(out);
    }
}
