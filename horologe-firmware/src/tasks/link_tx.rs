//! Link UART transmit task
//!
//! Sends status lines, sync results and heartbeat replies to the companion.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use horologe_protocol::{ClockMessage, MAX_FRAME_SIZE};

use crate::channels::{HEARTBEAT_RECEIVED, STATUS_LINE, SYNC_RESULT};

/// Link TX task - sends frames to the companion
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let message = select3(
            HEARTBEAT_RECEIVED.wait(),
            SYNC_RESULT.wait(),
            STATUS_LINE.wait(),
        )
        .await;

        match message {
            Either3::First(()) => send(&mut tx, &ClockMessage::Pong).await,
            Either3::Second(applied) => send(&mut tx, &ClockMessage::SyncResult { applied }).await,
            Either3::Third(line) => send(&mut tx, &ClockMessage::Status(line.as_str())).await,
        }
    }
}

async fn send(tx: &mut BufferedUartTx, message: &ClockMessage<'_>) {
    let frame = message.to_frame();
    let mut buf = [0u8; MAX_FRAME_SIZE];

    match frame.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Link write failed: {:?}", e);
            } else {
                trace!("TX: type {=u8:#x}, {} bytes", frame.msg_type, len);
            }
        }
        Err(e) => warn!("Frame encode failed: {:?}", e),
    }
}
