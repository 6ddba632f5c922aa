//! Link frame encoding and decoding

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x55;

/// Largest payload; a status line must fit in one frame
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// START + LENGTH + TYPE + payload + CHECKSUM
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + 4;

/// Frame-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Declared length out of range, or payload does not fit the message type
    InvalidFrame,
    /// Unknown message type
    UnknownType(u8),
    /// Output buffer too small
    BufferTooSmall,
}

/// One link frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn checksum(msg_type: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(payload.len() as u8 ^ msg_type, |acc, b| acc ^ b)
}

impl Frame {
    /// Build a frame, rejecting oversized payloads
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + 4
    }

    /// Write the frame to `buf`, returning the number of bytes used
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buf.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;
        let n = self.payload.len();

        out[0] = FRAME_START;
        out[1] = n as u8;
        out[2] = self.msg_type;
        out[3..3 + n].copy_from_slice(&self.payload);
        out[3 + n] = checksum(self.msg_type, &self.payload);
        Ok(len)
    }

    /// Encode into an owned buffer
    pub fn to_bytes(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        // Payload is bounded by construction, so the frame always fits
        let len = self.encode(&mut buf).unwrap_or(0);
        let mut out = Vec::new();
        let _ = out.extend_from_slice(&buf[..len]);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Idle,
    Length,
    Type { len: u8 },
    Payload { len: u8, msg_type: u8 },
    Checksum { msg_type: u8 },
}

/// Byte-at-a-time frame decoder
///
/// Bytes outside a frame are skipped until the next START byte, so the
/// parser resynchronizes on its own after line noise.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub const fn new() -> Self {
        Self {
            state: ParseState::Idle,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` when a frame completes. On error the
    /// parser is reset and ready for the next frame.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.state = match self.state {
            ParseState::Idle if byte == FRAME_START => ParseState::Length,
            ParseState::Idle => ParseState::Idle,
            ParseState::Length => {
                if usize::from(byte) > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                ParseState::Type { len: byte }
            }
            ParseState::Type { len: 0 } => ParseState::Checksum { msg_type: byte },
            ParseState::Type { len } => {
                self.payload.clear();
                ParseState::Payload { len, msg_type: byte }
            }
            ParseState::Payload { len, msg_type } => {
                // Cannot overflow: len was checked against the capacity
                let _ = self.payload.push(byte);
                if self.payload.len() == usize::from(len) {
                    ParseState::Checksum { msg_type }
                } else {
                    ParseState::Payload { len, msg_type }
                }
            }
            ParseState::Checksum { msg_type } => {
                let ok = byte == checksum(msg_type, &self.payload);
                let frame = Frame {
                    msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return if ok {
                    Ok(Some(frame))
                } else {
                    Err(FrameError::InvalidChecksum)
                };
            }
        };
        Ok(None)
    }

    /// Feed bytes until a frame completes
    ///
    /// Returns the frame and the number of bytes consumed. Bytes after the
    /// frame are left for the next call.
    pub fn feed_slice(&mut self, bytes: &[u8]) -> (Result<Option<Frame>, FrameError>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                done => return (done, i + 1),
            }
        }
        (Ok(None), bytes.len())
    }
}
