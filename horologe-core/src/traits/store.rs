//! Persistent epoch cache

use crate::error::ClockError;

/// Errors from the epoch store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Backing storage could not be accessed
    Unavailable,
    /// Stored value could not be decoded
    Corrupted,
}

impl From<StoreError> for ClockError {
    fn from(_: StoreError) -> Self {
        ClockError::StoreUnavailable
    }
}

/// Single-key store for the last known-good epoch
///
/// The value is opaque to the store. Only network-verified times are ever
/// saved; a failed load is indistinguishable from an empty store.
pub trait EpochStore {
    /// Load the cached epoch, if any
    fn load_epoch(&mut self) -> impl core::future::Future<Output = Option<i64>>;

    /// Replace the cached epoch
    fn save_epoch(
        &mut self,
        epoch: i64,
    ) -> impl core::future::Future<Output = Result<(), StoreError>>;
}
