//! Time reconciliation orchestrator
//!
//! Owns the RTC, the display, the epoch store and the status sink, so every
//! bus transaction is serialized by ownership. Driven from a single task:
//! [`Orchestrator::boot`] once, then [`Orchestrator::tick`] on a fixed period
//! and [`Orchestrator::on_sync`] whenever the network side signals.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::render::{self, DialReading, WAITING_LINE};
use super::soft_clock::SoftwareClock;
use super::sync::SyncLatch;
use super::TimeSource;
use crate::config::ClockConfig;
use crate::error::ClockError;
use crate::state::{ClockEvent, ClockState};
use crate::time::CivilTime;
use crate::traits::{ClockDisplay, EpochStore, Pattern, RtcClock, StatusSink};

/// Accepted difference between a written correction and its read-back
pub const VERIFY_TOLERANCE_S: i64 = 2;

/// Result of boot-time reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    pub state: ClockState,
    /// `None` when no time could be established
    pub source: Option<TimeSource>,
    /// Last fault seen while probing
    pub fault: Option<ClockError>,
}

/// What a tick put on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Local time rendered
    Rendered(CivilTime),
    /// RTC read failed; fault pattern shown
    Fault(ClockError),
    /// No valid time yet; waiting pattern shown
    Waiting,
}

/// An applied network correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Correction {
    pub epoch: i64,
    /// False if the store rejected the write; the RTC still holds the time
    pub persisted: bool,
}

/// Chooses the authoritative time source and republishes it
pub struct Orchestrator<C, D, S, O> {
    rtc: C,
    display: D,
    store: S,
    status: O,
    config: ClockConfig,
    fallback_epoch: i64,
    state: ClockState,
    source: Option<TimeSource>,
    software: SoftwareClock,
}

impl<C, D, S, O> Orchestrator<C, D, S, O>
where
    C: RtcClock,
    D: ClockDisplay,
    S: EpochStore,
    O: StatusSink,
{
    /// Create an orchestrator in the `Booting` state
    ///
    /// `fallback_epoch` is used when neither the RTC nor the store holds a
    /// usable time (normally the firmware build timestamp).
    pub fn new(rtc: C, display: D, store: S, status: O, config: ClockConfig, fallback_epoch: i64) -> Self {
        Self {
            rtc,
            display,
            store,
            status,
            config,
            fallback_epoch,
            state: ClockState::Booting,
            source: None,
            software: SoftwareClock::new(),
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn source(&self) -> Option<TimeSource> {
        self.source
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Hand back the collaborators
    pub fn release(self) -> (C, D, S, O) {
        (self.rtc, self.display, self.store, self.status)
    }

    /// Power up the display and establish the authoritative source
    pub async fn boot<M: RawMutex>(&mut self, latch: &SyncLatch<M>, uptime_ms: u64) -> BootReport {
        self.display.initialize(self.config.brightness);
        self.display.show_pattern(Pattern::Waiting);
        self.reconcile(latch, uptime_ms).await
    }

    /// Republish the current time
    ///
    /// Faults never stop the loop; the next tick tries again.
    pub async fn tick<M: RawMutex>(&mut self, latch: &SyncLatch<M>, uptime_ms: u64) -> TickOutcome {
        if self.state == ClockState::RtcAuthoritative {
            self.advance(ClockEvent::TickStarted);
        }

        match self.state {
            ClockState::Steady | ClockState::RtcAuthoritative => self.republish_rtc(),
            ClockState::Booting | ClockState::AwaitingNetworkFix => {
                if let Some(now) = self.software.now(uptime_ms).and_then(CivilTime::from_epoch) {
                    self.publish(&now);
                    return TickOutcome::Rendered(now);
                }

                self.reconcile(latch, uptime_ms).await;
                if self.state.rtc_trusted() {
                    self.advance(ClockEvent::TickStarted);
                    self.republish_rtc()
                } else {
                    self.display.show_pattern(Pattern::Waiting);
                    self.status.publish(WAITING_LINE);
                    TickOutcome::Waiting
                }
            }
        }
    }

    /// Apply the pending network correction, if any
    ///
    /// Consumes exactly one correction from the latch. On any failure the
    /// correction is dropped and the previous RTC contents stay
    /// authoritative; there is no retry.
    pub async fn on_sync<M: RawMutex>(
        &mut self,
        latch: &SyncLatch<M>,
        uptime_ms: u64,
    ) -> Result<Option<Correction>, ClockError> {
        let Some(epoch) = latch.take() else {
            return Ok(None);
        };
        self.apply_correction(epoch, uptime_ms).await.map(Some)
    }

    async fn reconcile<M: RawMutex>(&mut self, latch: &SyncLatch<M>, uptime_ms: u64) -> BootReport {
        let mut fault = None;

        let event = match self.rtc.read() {
            Err(e) => {
                fault = Some(e);
                ClockEvent::RtcUnavailable
            }
            Ok(now) if now.year() >= self.config.min_valid_year => {
                self.source = Some(TimeSource::Rtc);
                ClockEvent::RtcValid
            }
            Ok(_) => {
                // A network fix that arrived before boot beats the cache
                let mut synced = false;
                if latch.is_synced() {
                    if let Some(epoch) = latch.take() {
                        match self.apply_correction(epoch, uptime_ms).await {
                            Ok(_) => synced = true,
                            Err(e) => fault = Some(e),
                        }
                    }
                }

                if synced {
                    ClockEvent::SyncApplied
                } else if self.software.is_seeded() {
                    // RTC refused the network time; it will refuse the cache too
                    ClockEvent::RtcUnavailable
                } else {
                    match self.restore(uptime_ms).await {
                        Ok(()) => ClockEvent::RtcRestored,
                        Err(e) => {
                            fault = Some(e);
                            ClockEvent::RtcUnavailable
                        }
                    }
                }
            }
        };

        self.advance(event);
        if !self.state.rtc_trusted() && !self.software.is_seeded() {
            self.source = None;
        }

        BootReport {
            state: self.state,
            source: self.source,
            fault,
        }
    }

    /// Rewrite an implausible RTC from the cache, else the build fallback
    async fn restore(&mut self, uptime_ms: u64) -> Result<(), ClockError> {
        let cached = self
            .store
            .load_epoch()
            .await
            .and_then(|epoch| Some((epoch, CivilTime::from_epoch(epoch)?)));

        let (epoch, time, source) = match cached {
            Some((epoch, time)) => (epoch, time, TimeSource::CachedEpoch),
            None => {
                let time = CivilTime::from_epoch(self.fallback_epoch).ok_or(ClockError::InvalidTime)?;
                (self.fallback_epoch, time, TimeSource::BuildFallback)
            }
        };

        if let Err(e) = self.rtc.write(&time) {
            self.software.seed(epoch, uptime_ms);
            self.source = Some(TimeSource::Software);
            return Err(e);
        }

        self.software.clear();
        self.source = Some(source);
        Ok(())
    }

    async fn apply_correction(&mut self, epoch: i64, uptime_ms: u64) -> Result<Correction, ClockError> {
        let time = CivilTime::from_epoch(epoch)
            .filter(|t| t.year() >= self.config.min_valid_year)
            .ok_or(ClockError::InvalidTime)?;

        let prior = if self.state.rtc_trusted() {
            self.rtc.read().ok()
        } else {
            None
        };

        if let Err(e) = self.rtc.write(&time) {
            if !self.state.rtc_trusted() {
                self.software.seed(epoch, uptime_ms);
                self.source = Some(TimeSource::Software);
            }
            return Err(e);
        }

        let verified = self
            .rtc
            .read()
            .is_ok_and(|readback| (readback.to_epoch() - epoch).abs() <= VERIFY_TOLERANCE_S);
        if !verified {
            return Err(self.roll_back(prior));
        }

        self.advance(ClockEvent::SyncApplied);
        self.source = Some(TimeSource::Network);
        self.software.clear();

        let persisted = self.store.save_epoch(epoch).await.is_ok();
        Ok(Correction { epoch, persisted })
    }

    /// Put back the last trusted reading after a rejected correction
    ///
    /// Returns the error to report for the correction.
    fn roll_back(&mut self, prior: Option<CivilTime>) -> ClockError {
        match prior {
            Some(prior) if self.rtc.write(&prior).is_err() => ClockError::RollbackFailed,
            _ => ClockError::SyncVerificationFailed,
        }
    }

    fn republish_rtc(&mut self) -> TickOutcome {
        match self.rtc.read() {
            Ok(now) => {
                self.publish(&now);
                TickOutcome::Rendered(now)
            }
            Err(e) => {
                self.display.show_pattern(Pattern::Fault);
                self.status.publish(&render::fault_line(e));
                TickOutcome::Fault(e)
            }
        }
    }

    fn publish(&mut self, utc: &CivilTime) {
        let local = utc
            .offset_by(i32::from(self.config.utc_offset_minutes))
            .unwrap_or(*utc);
        let dial = DialReading::from_local(&local);

        self.display.render(dial.hour, dial.minute, dial.colon);
        self.status
            .publish(&render::status_line(&local, &self.config.zone));
    }

    fn advance(&mut self, event: ClockEvent) {
        self.state = self.state.transition(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreError;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use heapless::{String, Vec};

    const FALLBACK: i64 = 1_735_689_600; // 2025-01-01T00:00:00Z

    fn t(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> CivilTime {
        CivilTime::new(year, month, day, hour, minute, second).unwrap()
    }

    struct MockRtc {
        time: CivilTime,
        fail_reads: bool,
        fail_writes: bool,
        /// Shift the next written time by a minute
        garble_next_write: bool,
        /// Start failing reads once a write has landed
        fail_reads_after_write: bool,
        /// Writes accepted before further writes fail
        write_budget: Option<usize>,
        writes: usize,
    }

    impl MockRtc {
        fn holding(time: CivilTime) -> Self {
            Self {
                time,
                fail_reads: false,
                fail_writes: false,
                garble_next_write: false,
                fail_reads_after_write: false,
                write_budget: None,
                writes: 0,
            }
        }
    }

    impl RtcClock for MockRtc {
        fn read(&mut self) -> Result<CivilTime, ClockError> {
            if self.fail_reads {
                return Err(ClockError::BusTimeout);
            }
            Ok(self.time)
        }

        fn write(&mut self, time: &CivilTime) -> Result<(), ClockError> {
            if self.fail_writes || self.write_budget == Some(self.writes) {
                return Err(ClockError::BusNack);
            }
            self.writes += 1;
            if self.fail_reads_after_write {
                self.fail_reads = true;
            }
            let skew = if self.garble_next_write { 60 } else { 0 };
            self.garble_next_write = false;
            self.time = CivilTime::from_epoch(time.to_epoch() + skew).unwrap();
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shown {
        Digits(u8, u8, bool),
        Pattern(Pattern),
    }

    #[derive(Default)]
    struct MockDisplay {
        brightness: Option<u8>,
        shown: Vec<Shown, 16>,
    }

    impl ClockDisplay for MockDisplay {
        fn initialize(&mut self, brightness: u8) {
            self.brightness = Some(brightness);
        }

        fn render(&mut self, hh: u8, mm: u8, colon: bool) {
            let _ = self.shown.push(Shown::Digits(hh, mm, colon));
        }

        fn show_pattern(&mut self, pattern: Pattern) {
            let _ = self.shown.push(Shown::Pattern(pattern));
        }
    }

    #[derive(Default)]
    struct MockStore {
        epoch: Option<i64>,
        fail_saves: bool,
        saves: usize,
    }

    impl EpochStore for MockStore {
        async fn load_epoch(&mut self) -> Option<i64> {
            self.epoch
        }

        async fn save_epoch(&mut self, epoch: i64) -> Result<(), StoreError> {
            if self.fail_saves {
                return Err(StoreError::Unavailable);
            }
            self.saves += 1;
            self.epoch = Some(epoch);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockStatus {
        last: String<64>,
        lines: usize,
    }

    impl StatusSink for MockStatus {
        fn publish(&mut self, line: &str) {
            self.last.clear();
            let _ = self.last.push_str(line);
            self.lines += 1;
        }
    }

    type TestOrchestrator = Orchestrator<MockRtc, MockDisplay, MockStore, MockStatus>;

    fn orchestrator(rtc: MockRtc, store: MockStore) -> TestOrchestrator {
        Orchestrator::new(
            rtc,
            MockDisplay::default(),
            store,
            MockStatus::default(),
            ClockConfig::default(),
            FALLBACK,
        )
    }

    fn latch() -> SyncLatch<NoopRawMutex> {
        SyncLatch::new()
    }

    #[test]
    fn test_boot_with_valid_rtc() {
        let now = t(2025, 3, 1, 10, 0, 0);
        let mut orch = orchestrator(MockRtc::holding(now), MockStore::default());

        let report = block_on(orch.boot(&latch(), 0));
        assert_eq!(report.state, ClockState::RtcAuthoritative);
        assert_eq!(report.source, Some(TimeSource::Rtc));
        assert_eq!(report.fault, None);

        let (rtc, display, _, _) = orch.release();
        assert_eq!(rtc.writes, 0);
        assert_eq!(display.brightness, Some(4));
        assert_eq!(display.shown[0], Shown::Pattern(Pattern::Waiting));
    }

    #[test]
    fn test_boot_restores_cached_epoch() {
        let cached = t(2025, 6, 15, 8, 30, 0);
        let store = MockStore {
            epoch: Some(cached.to_epoch()),
            ..Default::default()
        };
        let mut orch = orchestrator(MockRtc::holding(t(2000, 1, 1, 0, 0, 0)), store);

        let report = block_on(orch.boot(&latch(), 0));
        assert_eq!(report.state, ClockState::RtcAuthoritative);
        assert_eq!(report.source, Some(TimeSource::CachedEpoch));

        let (mut rtc, _, _, _) = orch.release();
        assert_eq!(rtc.writes, 1);
        assert_eq!(rtc.read(), Ok(cached));
    }

    #[test]
    fn test_boot_restores_build_fallback() {
        let mut orch = orchestrator(MockRtc::holding(t(2000, 1, 1, 0, 0, 0)), MockStore::default());

        let report = block_on(orch.boot(&latch(), 0));
        assert_eq!(report.source, Some(TimeSource::BuildFallback));

        let (mut rtc, _, _, _) = orch.release();
        assert_eq!(rtc.read().unwrap().to_epoch(), FALLBACK);
    }

    #[test]
    fn test_boot_prefers_pending_network_fix() {
        let network = t(2025, 9, 5, 7, 53, 45);
        let store = MockStore {
            epoch: Some(t(2024, 1, 1, 0, 0, 0).to_epoch()),
            ..Default::default()
        };
        let mut orch = orchestrator(MockRtc::holding(t(2000, 1, 1, 0, 0, 0)), store);
        let latch = latch();
        latch.post(network.to_epoch());

        let report = block_on(orch.boot(&latch, 0));
        assert_eq!(report.state, ClockState::RtcAuthoritative);
        assert_eq!(report.source, Some(TimeSource::Network));

        let (mut rtc, _, store, _) = orch.release();
        assert_eq!(rtc.read(), Ok(network));
        assert_eq!(store.epoch, Some(network.to_epoch()));
    }

    #[test]
    fn test_boot_with_unreadable_rtc() {
        let mut rtc = MockRtc::holding(t(2025, 1, 1, 0, 0, 0));
        rtc.fail_reads = true;
        let mut orch = orchestrator(rtc, MockStore::default());
        let latch = latch();

        let report = block_on(orch.boot(&latch, 0));
        assert_eq!(report.state, ClockState::AwaitingNetworkFix);
        assert_eq!(report.source, None);
        assert_eq!(report.fault, Some(ClockError::BusTimeout));

        assert_eq!(block_on(orch.tick(&latch, 1_000)), TickOutcome::Waiting);
        let (_, display, _, status) = orch.release();
        assert_eq!(display.shown.last(), Some(&Shown::Pattern(Pattern::Waiting)));
        assert_eq!(status.last.as_str(), "waiting for time sync");
    }

    #[test]
    fn test_recovers_when_rtc_comes_back() {
        let now = t(2025, 3, 1, 10, 0, 2);
        let mut rtc = MockRtc::holding(now);
        rtc.fail_reads = true;
        let mut orch = orchestrator(rtc, MockStore::default());
        let latch = latch();

        block_on(orch.boot(&latch, 0));
        assert_eq!(orch.state(), ClockState::AwaitingNetworkFix);

        orch.rtc.fail_reads = false;
        assert_eq!(block_on(orch.tick(&latch, 1_000)), TickOutcome::Rendered(now));
        assert_eq!(orch.state(), ClockState::Steady);
    }

    #[test]
    fn test_steady_tick_renders_local_time() {
        let utc = t(2025, 9, 5, 7, 53, 45);
        let mut config = ClockConfig::default();
        config.utc_offset_minutes = 330;
        config.zone.clear();
        let _ = config.zone.push_str("IST");

        let mut orch = Orchestrator::new(
            MockRtc::holding(utc),
            MockDisplay::default(),
            MockStore::default(),
            MockStatus::default(),
            config,
            FALLBACK,
        );
        let latch = latch();

        block_on(orch.boot(&latch, 0));
        assert_eq!(block_on(orch.tick(&latch, 1_000)), TickOutcome::Rendered(utc));
        assert_eq!(orch.state(), ClockState::Steady);

        let (_, display, _, status) = orch.release();
        // 13:23:45 local, odd second
        assert_eq!(display.shown.last(), Some(&Shown::Digits(1, 23, false)));
        assert_eq!(status.last.as_str(), "01:23:45 PM 05-09-2025 IST");
    }

    #[test]
    fn test_read_fault_during_steady_keeps_ticking() {
        let now = t(2025, 3, 1, 10, 0, 0);
        let mut orch = orchestrator(MockRtc::holding(now), MockStore::default());
        let latch = latch();

        block_on(orch.boot(&latch, 0));
        block_on(orch.tick(&latch, 1_000));

        orch.rtc.fail_reads = true;
        assert_eq!(
            block_on(orch.tick(&latch, 2_000)),
            TickOutcome::Fault(ClockError::BusTimeout)
        );
        assert_eq!(orch.state(), ClockState::Steady);
        assert_eq!(orch.status.last.as_str(), "RTC fault: bus timeout");
        assert_eq!(orch.display.shown.last(), Some(&Shown::Pattern(Pattern::Fault)));

        orch.rtc.fail_reads = false;
        assert_eq!(block_on(orch.tick(&latch, 3_000)), TickOutcome::Rendered(now));
        assert_eq!(orch.display.shown.last(), Some(&Shown::Digits(10, 0, true)));
    }

    #[test]
    fn test_sync_applies_once() {
        let mut orch = orchestrator(MockRtc::holding(t(2025, 3, 1, 10, 0, 0)), MockStore::default());
        let latch = latch();
        block_on(orch.boot(&latch, 0));

        let network = t(2025, 3, 1, 10, 0, 30);
        latch.post(network.to_epoch());

        let first = block_on(orch.on_sync(&latch, 1_000));
        assert_eq!(
            first,
            Ok(Some(Correction {
                epoch: network.to_epoch(),
                persisted: true
            }))
        );
        assert_eq!(block_on(orch.on_sync(&latch, 1_010)), Ok(None));
        assert_eq!(orch.source(), Some(TimeSource::Network));

        let (rtc, _, store, _) = orch.release();
        assert_eq!(rtc.writes, 1);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_failed_sync_write_keeps_rtc() {
        let before = t(2025, 3, 1, 10, 0, 0);
        let mut orch = orchestrator(MockRtc::holding(before), MockStore::default());
        let latch = latch();
        block_on(orch.boot(&latch, 0));

        orch.rtc.fail_writes = true;
        latch.post(t(2025, 3, 1, 11, 0, 0).to_epoch());
        assert_eq!(block_on(orch.on_sync(&latch, 1_000)), Err(ClockError::BusNack));

        // Dropped, not retried
        assert_eq!(block_on(orch.on_sync(&latch, 2_000)), Ok(None));

        let (mut rtc, _, store, _) = orch.release();
        assert_eq!(rtc.read(), Ok(before));
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn test_verification_mismatch_drops_correction() {
        let before = t(2025, 3, 1, 10, 0, 0);
        let mut orch = orchestrator(MockRtc::holding(before), MockStore::default());
        let latch = latch();
        block_on(orch.boot(&latch, 0));

        orch.rtc.garble_next_write = true;
        latch.post(t(2025, 3, 1, 11, 0, 0).to_epoch());
        assert_eq!(
            block_on(orch.on_sync(&latch, 1_000)),
            Err(ClockError::SyncVerificationFailed)
        );
        assert_eq!(orch.source(), Some(TimeSource::Rtc));
        assert_eq!(orch.store.saves, 0);

        // Prior reading written back
        assert_eq!(orch.rtc.read(), Ok(before));
    }

    #[test]
    fn test_unreadable_readback_restores_prior() {
        let before = t(2025, 3, 1, 10, 0, 0);
        let mut orch = orchestrator(MockRtc::holding(before), MockStore::default());
        let latch = latch();
        block_on(orch.boot(&latch, 0));

        orch.rtc.fail_reads_after_write = true;
        latch.post(t(2025, 3, 1, 11, 0, 0).to_epoch());
        assert_eq!(
            block_on(orch.on_sync(&latch, 1_000)),
            Err(ClockError::SyncVerificationFailed)
        );
        assert_eq!(orch.source(), Some(TimeSource::Rtc));
        assert_eq!(orch.store.saves, 0);

        // Correction and rollback both written
        assert_eq!(orch.rtc.writes, 2);
        orch.rtc.fail_reads = false;
        assert_eq!(orch.rtc.read(), Ok(before));
    }

    #[test]
    fn test_failed_rollback_is_reported() {
        let before = t(2025, 3, 1, 10, 0, 0);
        let mut orch = orchestrator(MockRtc::holding(before), MockStore::default());
        let latch = latch();
        block_on(orch.boot(&latch, 0));

        orch.rtc.garble_next_write = true;
        orch.rtc.write_budget = Some(1);
        latch.post(t(2025, 3, 1, 11, 0, 0).to_epoch());
        assert_eq!(
            block_on(orch.on_sync(&latch, 1_000)),
            Err(ClockError::RollbackFailed)
        );
        assert_eq!(orch.source(), Some(TimeSource::Rtc));
        assert_eq!(orch.store.saves, 0);
    }

    #[test]
    fn test_store_failure_is_not_fatal() {
        let store = MockStore {
            fail_saves: true,
            ..Default::default()
        };
        let mut orch = orchestrator(MockRtc::holding(t(2025, 3, 1, 10, 0, 0)), store);
        let latch = latch();
        block_on(orch.boot(&latch, 0));

        let network = t(2025, 3, 1, 10, 5, 0);
        latch.post(network.to_epoch());
        let correction = block_on(orch.on_sync(&latch, 1_000)).unwrap().unwrap();
        assert!(!correction.persisted);

        let (mut rtc, _, _, _) = orch.release();
        assert_eq!(rtc.read(), Ok(network));
    }

    #[test]
    fn test_implausible_correction_rejected() {
        let mut orch = orchestrator(MockRtc::holding(t(2025, 3, 1, 10, 0, 0)), MockStore::default());
        let latch = latch();
        block_on(orch.boot(&latch, 0));

        latch.post(0);
        assert_eq!(block_on(orch.on_sync(&latch, 1_000)), Err(ClockError::InvalidTime));
        assert_eq!(orch.rtc.writes, 0);
    }

    #[test]
    fn test_unwritable_rtc_runs_software_clock() {
        let mut rtc = MockRtc::holding(t(2000, 1, 1, 0, 0, 0));
        rtc.fail_writes = true;
        let mut orch = orchestrator(rtc, MockStore::default());
        let latch = latch();

        let report = block_on(orch.boot(&latch, 0));
        assert_eq!(report.state, ClockState::AwaitingNetworkFix);
        assert_eq!(report.source, Some(TimeSource::Software));
        assert_eq!(report.fault, Some(ClockError::BusNack));

        let expected = CivilTime::from_epoch(FALLBACK + 5).unwrap();
        assert_eq!(block_on(orch.tick(&latch, 5_000)), TickOutcome::Rendered(expected));
    }
}
