//! Mock hardware adapter for integration tests.
//!
//! Records every port call in order so tests can assert on the full
//! conversion / actuator / serial history without touching real registers.

use dcservo::app::events::AppEvent;
use dcservo::app::ports::{ActuatorPort, EventSink, SensorPort, SerialPort};
use dcservo::control::sampling::Channel;

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Convert(Channel),
    Actuate(i16),
    Send(u8),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// Value returned for channel 0 / channel 1 conversions.
    pub readings: [i16; 2],
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            readings: [0, 0],
        }
    }

    pub fn with_readings(ch0: i16, ch1: i16) -> Self {
        Self {
            calls: Vec::new(),
            readings: [ch0, ch1],
        }
    }

    /// Actuator commands in write order.
    pub fn actuator_writes(&self) -> Vec<i16> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Actuate(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    /// Channels converted, in order.
    pub fn conversions(&self) -> Vec<Channel> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Convert(ch) => Some(*ch),
                _ => None,
            })
            .collect()
    }

    /// Everything transmitted on the operator link, as text.
    pub fn serial_text(&self) -> String {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Send(b) => Some(char::from(*b)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_channel(&mut self, channel: Channel) -> i16 {
        self.calls.push(HwCall::Convert(channel));
        self.readings[usize::from(channel.index())]
    }
}

impl ActuatorPort for MockHardware {
    fn write_actuator(&mut self, command: i16) {
        self.calls.push(HwCall::Actuate(command));
    }
}

impl SerialPort for MockHardware {
    fn send_byte(&mut self, byte: u8) {
        self.calls.push(HwCall::Send(byte));
    }
}

// ── LogSink ──────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
