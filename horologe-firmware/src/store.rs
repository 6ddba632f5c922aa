//! Flash-backed epoch cache

use defmt::*;

use horologe_core::traits::{EpochStore, StoreError};
use horologe_hal::flash::{FlashError, FlashStorage, StorageKey};

/// Room for a postcard-encoded `i64` (varint, at most 10 bytes)
const EPOCH_BUF_SIZE: usize = 16;

/// Keeps the last network-verified epoch under [`StorageKey::LastEpoch`]
pub struct FlashEpochStore<F> {
    storage: F,
}

impl<F: FlashStorage> FlashEpochStore<F> {
    pub fn new(storage: F) -> Self {
        Self { storage }
    }
}

impl<F: FlashStorage> EpochStore for FlashEpochStore<F> {
    async fn load_epoch(&mut self) -> Option<i64> {
        let mut buf = [0u8; EPOCH_BUF_SIZE];
        let len = match self.storage.read(StorageKey::LastEpoch, &mut buf).await {
            Ok(len) => len,
            Err(FlashError::NotFound) => {
                debug!("No cached epoch in flash");
                return None;
            }
            Err(e) => {
                warn!("Cached epoch read failed: {:?}", e);
                return None;
            }
        };

        match postcard::from_bytes::<i64>(&buf[..len]) {
            Ok(epoch) => Some(epoch),
            Err(_) => {
                warn!("Cached epoch is corrupted");
                None
            }
        }
    }

    async fn save_epoch(&mut self, epoch: i64) -> Result<(), StoreError> {
        let mut buf = [0u8; EPOCH_BUF_SIZE];
        let bytes = postcard::to_slice(&epoch, &mut buf).map_err(|_| StoreError::Corrupted)?;

        self.storage
            .write(StorageKey::LastEpoch, bytes)
            .await
            .map_err(|e| {
                warn!("Cached epoch write failed: {:?}", e);
                StoreError::Unavailable
            })
    }
}
