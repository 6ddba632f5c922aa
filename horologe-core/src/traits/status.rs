//! Status line output

/// Receives one human-readable line per tick
///
/// Each line replaces the previous one; no structure is implied.
pub trait StatusSink {
    /// Publish the current status line
    fn publish(&mut self, line: &str);
}
