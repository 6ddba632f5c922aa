//! Link UART receive task
//!
//! Receives frames from the network companion and dispatches commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use horologe_protocol::{FrameParser, LinkCommand};

use crate::channels::{HEARTBEAT_RECEIVED, SYNC_LATCH, SYNC_NOTIFY};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the companion
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match LinkCommand::from_frame(&frame) {
                            Ok(cmd) => handle_command(cmd),
                            Err(e) => warn!("Failed to parse link command: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn handle_command(cmd: LinkCommand) {
    match cmd {
        LinkCommand::TimeSync { epoch } => {
            debug!("Time sync received: {}", epoch);
            SYNC_LATCH.post(epoch);
            SYNC_NOTIFY.signal(());
        }
        LinkCommand::Ping => {
            trace!("PING received");
            HEARTBEAT_RECEIVED.signal(());
        }
    }
}
