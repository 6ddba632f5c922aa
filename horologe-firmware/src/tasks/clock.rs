//! Clock task
//!
//! Owns the RTC, the display and the epoch store. Runs boot reconciliation
//! once, then republishes the time every tick and applies network
//! corrections as they arrive.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use horologe_core::reconcile::{Orchestrator, TickOutcome};
use horologe_drivers::display::Tm1637;
use horologe_drivers::rtc::Ds3231;
use horologe_hal_rp2040::{BlockingI2c, BusyDelay, FlexLine, PushPullLine, Rp2040FlashStorage};

use crate::channels::{SYNC_LATCH, SYNC_NOTIFY, SYNC_RESULT};
use crate::status::LinkStatusSink;
use crate::store::FlashEpochStore;

type RtcBus = BlockingI2c<I2c<'static, I2C0, Blocking>>;
type Display = Tm1637<PushPullLine<'static>, FlexLine<'static>, BusyDelay>;
type Store = FlashEpochStore<Rp2040FlashStorage<'static>>;

/// The orchestrator wired to this board's peripherals
pub type ClockOrchestrator = Orchestrator<Ds3231<RtcBus>, Display, Store, LinkStatusSink>;

fn uptime_ms() -> u64 {
    Instant::now().as_millis()
}

/// Clock task - keeps the display and status line current
#[embassy_executor::task]
pub async fn clock_task(mut clock: ClockOrchestrator) {
    info!("Clock task started");

    let report = clock.boot(&SYNC_LATCH, uptime_ms()).await;
    match report.source {
        Some(source) => info!("Boot: {:?} from {:?}", report.state, source),
        None => warn!("Boot: no usable time ({:?})", report.state),
    }
    if let Some(fault) = report.fault {
        warn!("Boot fault: {:?}", fault);
    }
    if report.state.is_degraded() {
        warn!("RTC unusable, waiting for a network fix");
    }

    let period = Duration::from_millis(u64::from(clock.config().tick_ms));
    let mut ticker = Ticker::every(period);

    loop {
        match select(ticker.next(), SYNC_NOTIFY.wait()).await {
            Either::First(()) => match clock.tick(&SYNC_LATCH, uptime_ms()).await {
                TickOutcome::Rendered(time) => trace!("Tick: {:?}", time),
                TickOutcome::Fault(e) => warn!("RTC read failed: {:?}", e),
                TickOutcome::Waiting => debug!("Waiting for time sync"),
            },
            Either::Second(()) => apply_sync(&mut clock).await,
        }
    }
}

async fn apply_sync(clock: &mut ClockOrchestrator) {
    match clock.on_sync(&SYNC_LATCH, uptime_ms()).await {
        Ok(Some(correction)) => {
            info!("Network time applied: {}", correction.epoch);
            if !correction.persisted {
                warn!("Correction not saved to flash");
            }
            SYNC_RESULT.signal(true);
        }
        Ok(None) => trace!("Sync notification with nothing pending"),
        Err(e) => {
            warn!("Network time rejected: {:?}", e);
            SYNC_RESULT.signal(false);
        }
    }
}
