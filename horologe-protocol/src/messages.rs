//! Link message types
//!
//! - Co-processor → clock: time corrections, heartbeat requests
//! - Clock → co-processor: status lines, sync results, heartbeat responses

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: co-processor → clock
pub const MSG_TIME_SYNC: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: clock → co-processor
pub const MSG_STATUS: u8 = 0x20;
pub const MSG_SYNC_RESULT: u8 = 0x21;
pub const MSG_PONG: u8 = 0x24;

/// Commands received from the co-processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkCommand {
    /// Network-corrected time, seconds since the Unix epoch (UTC)
    TimeSync { epoch: i64 },
    /// Heartbeat request
    Ping,
}

impl LinkCommand {
    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_TIME_SYNC => {
                // Payload: i64 big-endian
                let bytes: [u8; 8] = frame
                    .payload
                    .as_slice()
                    .try_into()
                    .map_err(|_| FrameError::InvalidFrame)?;
                Ok(LinkCommand::TimeSync {
                    epoch: i64::from_be_bytes(bytes),
                })
            }
            MSG_PING => Ok(LinkCommand::Ping),
            other => Err(FrameError::UnknownType(other)),
        }
    }

    /// Encode this command into a frame (co-processor side, and tests)
    pub fn to_frame(&self) -> Frame {
        match self {
            LinkCommand::TimeSync { epoch } => Frame::new(MSG_TIME_SYNC, &epoch.to_be_bytes())
                .unwrap_or_else(|_| Frame::empty(MSG_TIME_SYNC)),
            LinkCommand::Ping => Frame::empty(MSG_PING),
        }
    }
}

/// Messages sent from the clock to the co-processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMessage<'a> {
    /// Current status line; long lines are truncated to one frame
    Status(&'a str),
    /// Outcome of the last time correction
    SyncResult { applied: bool },
    /// Heartbeat response
    Pong,
}

impl ClockMessage<'_> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Frame {
        match self {
            ClockMessage::Status(line) => {
                let bytes = line.as_bytes();
                let len = bytes.len().min(MAX_PAYLOAD_SIZE);
                Frame::new(MSG_STATUS, &bytes[..len]).unwrap_or_else(|_| Frame::empty(MSG_STATUS))
            }
            ClockMessage::SyncResult { applied } => {
                Frame::new(MSG_SYNC_RESULT, &[u8::from(*applied)])
                    .unwrap_or_else(|_| Frame::empty(MSG_SYNC_RESULT))
            }
            ClockMessage::Pong => Frame::empty(MSG_PONG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_sync_payload() {
        let frame = Frame::new(MSG_TIME_SYNC, &[0x00, 0x00, 0x00, 0x00, 0x68, 0xBA, 0xA1, 0x09]).unwrap();
        assert_eq!(
            LinkCommand::from_frame(&frame),
            Ok(LinkCommand::TimeSync { epoch: 0x68BA_A109 })
        );
    }

    #[test]
    fn test_time_sync_roundtrip() {
        let cmd = LinkCommand::TimeSync { epoch: 1_757_058_825 };
        assert_eq!(LinkCommand::from_frame(&cmd.to_frame()), Ok(cmd));

        let cmd = LinkCommand::TimeSync { epoch: -1 };
        assert_eq!(LinkCommand::from_frame(&cmd.to_frame()), Ok(cmd));
    }

    #[test]
    fn test_short_time_sync_rejected() {
        let frame = Frame::new(MSG_TIME_SYNC, &[0x01, 0x02]).unwrap();
        assert_eq!(LinkCommand::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_unknown_type() {
        let frame = Frame::empty(0x7E);
        assert_eq!(LinkCommand::from_frame(&frame), Err(FrameError::UnknownType(0x7E)));
    }

    #[test]
    fn test_ping() {
        assert_eq!(
            LinkCommand::from_frame(&Frame::empty(MSG_PING)),
            Ok(LinkCommand::Ping)
        );
    }

    #[test]
    fn test_status_line() {
        let frame = ClockMessage::Status("01:23:45 PM 05-09-2025 IST").to_frame();
        assert_eq!(frame.msg_type, MSG_STATUS);
        assert_eq!(frame.payload.as_slice(), b"01:23:45 PM 05-09-2025 IST");
    }

    #[test]
    fn test_long_status_truncated() {
        let line = core::str::from_utf8(&[b'x'; 100]).unwrap();
        let frame = ClockMessage::Status(line).to_frame();
        assert_eq!(frame.payload.len(), MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn test_sync_result_and_pong() {
        let frame = ClockMessage::SyncResult { applied: true }.to_frame();
        assert_eq!((frame.msg_type, frame.payload.as_slice()), (MSG_SYNC_RESULT, &[1u8][..]));
        assert_eq!(ClockMessage::Pong.to_frame(), Frame::empty(MSG_PONG));
    }
}
