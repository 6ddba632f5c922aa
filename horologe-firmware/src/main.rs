//! Horologe - Desk Clock Firmware
//!
//! Keeps a DS3231 battery-backed RTC in step with network time and shows
//! local time on a TM1637 four-digit display. A companion board on UART0
//! supplies network time and receives a status line every tick.
//!
//! Pin assignments (Raspberry Pi Pico):
//!
//! | Function        | GPIO |
//! |-----------------|------|
//! | Link UART TX    | 0    |
//! | Link UART RX    | 1    |
//! | TM1637 CLK      | 2    |
//! | TM1637 DIO      | 3    |
//! | DS3231 SDA      | 4    |
//! | DS3231 SCL      | 5    |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use horologe_core::reconcile::Orchestrator;
use horologe_drivers::display::Tm1637;
use horologe_drivers::rtc::Ds3231;
use horologe_hal::i2c::I2cConfig;
use horologe_hal_rp2040::i2c::rp_config;
use horologe_hal_rp2040::{BlockingI2c, BusyDelay, FlexLine, PushPullLine, Rp2040FlashStorage};

use crate::config::ConfigLoader;
use crate::status::LinkStatusSink;
use crate::store::FlashEpochStore;

mod channels;
mod config;
mod status;
mod store;
mod tasks;

/// Embedded default configuration (compiled into firmware)
/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

/// Build time in Unix seconds, set by build.rs
const BUILD_EPOCH: &str = env!("HOROLOGE_BUILD_EPOCH");

/// Used only if the build timestamp is somehow unparseable (2025-01-01)
const DEFAULT_FALLBACK_EPOCH: i64 = 1_735_689_600;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Horologe firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Configuration and epoch cache share the flash store partition
    let mut loader = ConfigLoader::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0));
    let config = loader.load(EMBEDDED_CONFIG).await;
    info!(
        "Config: UTC offset {} min ({=str}), tick {} ms, brightness {}, min year {}",
        config.utc_offset_minutes,
        config.zone.as_str(),
        config.tick_ms,
        config.brightness,
        config.min_valid_year
    );
    let store = FlashEpochStore::new(loader.into_storage());

    // DS3231 on I2C0 at 100 kHz
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, rp_config(I2cConfig::STANDARD));
    let rtc = Ds3231::new(BlockingI2c::new(i2c));

    let display = Tm1637::new(PushPullLine::new(p.PIN_2), FlexLine::new(p.PIN_3), BusyDelay);

    let fallback_epoch = BUILD_EPOCH.parse::<i64>().unwrap_or_else(|_| {
        warn!("Unparseable build epoch, using default fallback");
        DEFAULT_FALLBACK_EPOCH
    });
    debug!("Build fallback epoch: {}", fallback_epoch);

    let clock = Orchestrator::new(
        rtc,
        display,
        store,
        LinkStatusSink::new(),
        config,
        fallback_epoch,
    );

    // Link UART to the network companion
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for link communication");

    spawner.spawn(tasks::clock_task(clock)).unwrap();
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();

    info!("All tasks spawned");
}
