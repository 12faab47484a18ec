//! Controller state entities and the actuation hook.
//!
//! [`ControllerState`] is the single struct that command handlers and the
//! sampling cycle read from and write to. It is owned by the
//! [`ControlService`](crate::app::service::ControlService); nothing else
//! holds a reference to it, so the critical-section boundary is the
//! service's `&mut self`.

pub mod law;
pub mod lifecycle;
pub mod reference;
pub mod sampling;

use lifecycle::ControlState;
use reference::{DigitEntry, Reference};
use sampling::SampleChannel;

/// Every piece of mutable controller state, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    /// On/off gate for sampling and actuation.
    pub control: ControlState,
    /// Committed setpoint.
    pub reference: Reference,
    /// In-progress 4-digit entry.
    pub entry: DigitEntry,
    /// Channel the next tick samples.
    pub channel: SampleChannel,
}

impl ControllerState {
    /// Boot state: off, reference at its initial value, no entry in
    /// progress, channel 0 next.
    pub const fn new(initial_reference: i16) -> Self {
        Self {
            control: ControlState::new(),
            reference: Reference::new(initial_reference),
            entry: DigitEntry::new(),
            channel: SampleChannel::new(),
        }
    }
}
