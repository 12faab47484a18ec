//! DC-Servo Controller Firmware — Main Entry Point
//!
//! Hexagonal architecture with a timer-driven event queue.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                      LogEventSink             │
//! │  (Sensor + Actuator + Serial)         (EventSink)              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlService (pure logic)                 │    │
//! │  │  Lifecycle · Reference entry · Sampling · Law          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  esp_timer ──Tick──▶ EVENTS ◀──ByteReceived── uart_rx task     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info, warn};

use dcservo::adapters::hardware::HardwareAdapter;
use dcservo::adapters::log_sink::LogEventSink;
use dcservo::app::service::ControlService;
use dcservo::config::ControllerConfig;
use dcservo::drivers::{hw_init, hw_timer, uart};
use dcservo::events::EVENTS;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  DC-Servo v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    // Validated by init_peripherals() before any peripheral is touched.
    let config = ControllerConfig::default();
    info!(
        "Config: tick={}ms ({} Hz), baud={}, neutral={}, reference={}",
        config.tick_period_ms,
        config.tick_hz(),
        config.baud_rate,
        config.neutral_command,
        config.initial_reference
    );

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals(&config) {
        // Without ADC/PWM/UART there is nothing safe to do. Halt and let
        // the task watchdog reset the chip.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Adapters + service ─────────────────────────────────
    let mut hw = HardwareAdapter::on_board(config.actuator_max);
    let mut log_sink = LogEventSink::new();
    let mut app = ControlService::with_neutral_law(config.clone());

    // Actuator goes neutral before any event source is live.
    app.boot(&mut hw, &mut log_sink);

    // ── 5. Event sources ──────────────────────────────────────
    uart::spawn_receiver()?;
    hw_timer::start_timer(config.tick_period_ms)?;

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    let mut last_dropped = 0;
    loop {
        app.run_pending(&EVENTS, &mut hw, &mut log_sink);

        let dropped = EVENTS.dropped();
        if dropped != last_dropped {
            warn!(
                "event queue overflow: {} timer tick(s) dropped since boot",
                dropped
            );
            last_dropped = dropped;
        }

        // Yield to the idle task; the next tick arrives via the queue.
        esp_idf_hal::delay::FreeRtos::delay_ms(1);
    }
}
