//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. They are a
//! diagnostic side channel and never carry the operator report lines,
//! which go out through the serial port.

use crate::control::sampling::Sample;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service finished boot and drove the actuator to neutral.
    Booted { reference: i16 },

    /// `s` turned the controller on.
    Started,

    /// `t` turned the controller off (or re-asserted off).
    /// `discarded_digits` counts keystrokes of an abandoned entry.
    Stopped { discarded_digits: u8 },

    /// A keystroke was stored; the entry is not complete yet.
    DigitAccepted { digit: u8, received: u8 },

    /// A full 4-digit entry replaced the reference.
    ReferenceCommitted { value: i16 },

    /// `r` negated the reference.
    ReferenceFlipped { value: i16 },

    /// One sampling cycle ran.
    Sampled { sample: Sample, command: i16 },
}
