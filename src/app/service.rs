//! Application service — the hexagonal core.
//!
//! [`ControlService`] owns the controller state, the configuration and the
//! actuation law. Byte-arrival and tick events are fed to it one at a time;
//! each call runs to completion on `&mut self`, which is the critical
//! section for every read-modify-write on the state.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │      ControlService      │
//! ActuatorPort ◀──│ lifecycle · entry · tick │──▶ SerialPort
//!                 └──────────────────────────┘
//! ```

use log::{debug, info, trace};

use crate::config::ControllerConfig;
use crate::control::ControllerState;
use crate::control::law::{ActuationLaw, NeutralLaw};
use crate::control::lifecycle::Phase;
use crate::control::reference::EntryProgress;
use crate::control::sampling::{Channel, Sample};
use crate::events::{ControlEvent, EventQueue};

use super::commands::Command;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort, SerialPort};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct ControlService<L: ActuationLaw = NeutralLaw> {
    config: ControllerConfig,
    state: ControllerState,
    law: L,
    tick_count: u64,
}

impl ControlService<NeutralLaw> {
    /// Service that holds the actuator at neutral while running.
    pub fn with_neutral_law(config: ControllerConfig) -> Self {
        let law = NeutralLaw::new(config.neutral_command);
        Self::new(config, law)
    }
}

impl<L: ActuationLaw> ControlService<L> {
    /// Construct the service in its boot state.
    ///
    /// Does **not** touch the hardware — call [`boot`](Self::boot) next.
    pub fn new(config: ControllerConfig, law: L) -> Self {
        let state = ControllerState::new(config.initial_reference);
        Self {
            config,
            state,
            law,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Reset to the boot state and drive the actuator to neutral.
    pub fn boot(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.state = ControllerState::new(self.config.initial_reference);
        self.tick_count = 0;
        hw.write_actuator(self.config.neutral_command);
        sink.emit(&AppEvent::Booted {
            reference: self.state.reference.value(),
        });
        info!(
            "ControlService booted (reference={}, tick={}ms)",
            self.state.reference.value(),
            self.config.tick_period_ms
        );
    }

    // ── Event dispatch ────────────────────────────────────────

    /// Route one queued event.
    pub fn handle_event(
        &mut self,
        event: ControlEvent,
        hw: &mut (impl SensorPort + ActuatorPort + SerialPort),
        sink: &mut impl EventSink,
    ) {
        match event {
            ControlEvent::Tick => self.tick(hw, sink),
            ControlEvent::ByteReceived(byte) => self.handle_byte(byte, hw, sink),
        }
    }

    /// Drain `queue` in FIFO order. Returns the number of events handled.
    pub fn run_pending(
        &mut self,
        queue: &EventQueue,
        hw: &mut (impl SensorPort + ActuatorPort + SerialPort),
        sink: &mut impl EventSink,
    ) -> usize {
        let mut handled = 0;
        queue.drain(|event| {
            self.handle_event(event, hw, sink);
            handled += 1;
        });
        handled
    }

    // ── Command handling ──────────────────────────────────────

    /// Classify and act on one received byte. Noise is ignored silently.
    pub fn handle_byte(
        &mut self,
        byte: u8,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match Command::from_byte(byte) {
            Some(cmd) => self.handle_command(cmd, hw, sink),
            None => trace!("ignored byte 0x{:02x}", byte),
        }
    }

    /// Apply one operator command.
    pub fn handle_command(
        &mut self,
        cmd: Command,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            Command::Start => {
                if self.state.control.start() {
                    sink.emit(&AppEvent::Started);
                }
            }
            Command::Stop => {
                hw.write_actuator(self.config.neutral_command);
                let discarded_digits = self.state.entry.digits_received();
                self.state.entry.reset();
                self.state.channel.reset();
                self.state.control.stop();
                sink.emit(&AppEvent::Stopped { discarded_digits });
            }
            Command::FlipReference => {
                self.state.reference.flip_sign();
                sink.emit(&AppEvent::ReferenceFlipped {
                    value: self.state.reference.value(),
                });
            }
            Command::Digit(digit) => match self.state.entry.accept_digit(digit) {
                EntryProgress::Pending { received } => {
                    sink.emit(&AppEvent::DigitAccepted { digit, received });
                }
                EntryProgress::Complete(value) => {
                    let limit = self.config.full_scale.saturating_abs();
                    let value = value.clamp(-limit, limit);
                    self.state.reference.commit(value);
                    if self.state.control.is_on() {
                        hw.write_actuator(value);
                    }
                    sink.emit(&AppEvent::ReferenceCommitted { value });
                }
            },
        }
    }

    // ── Per-tick cycle ────────────────────────────────────────

    /// Run one sampling/actuation cycle: sample → report → actuate.
    ///
    /// A no-op while the controller is off: no conversion, no report, no
    /// actuator write, and the channel does not advance.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + SerialPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        if !self.state.control.is_on() {
            return;
        }

        // 1. Pick the channel and advance for the next tick
        let channel = self.state.channel.advance();

        // 2. Convert via SensorPort
        let sample = Sample {
            channel,
            raw: hw.read_channel(channel),
        };

        // 3. Report over SerialPort
        hw.send_bytes(sample.report_line().as_bytes());

        // 4. Actuation hook → ActuatorPort
        let command = self
            .law
            .compute_actuation(self.state.reference.value(), sample);
        hw.write_actuator(command);

        debug!("tick {}: {:?} -> {}", self.tick_count, sample, command);
        sink.emit(&AppEvent::Sampled { sample, command });
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the whole controller state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.control.phase()
    }

    pub fn is_on(&self) -> bool {
        self.state.control.is_on()
    }

    /// Committed reference value.
    pub fn reference(&self) -> i16 {
        self.state.reference.value()
    }

    /// Keystrokes of the entry in progress (0 when none).
    pub fn digits_received(&self) -> u8 {
        self.state.entry.digits_received()
    }

    /// Channel the next tick will sample.
    pub fn active_channel(&self) -> Channel {
        self.state.channel.active()
    }

    /// Timer ticks handled since boot, including those while off.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}
