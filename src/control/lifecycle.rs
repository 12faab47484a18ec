//! Start/stop lifecycle of the controller.
//!
//! ```text
//!        start()            stop()
//!  Off ──────────▶ On ──────────────▶ Off
//!   ▲  stop()       │ start()
//!   └──┘            └──┘   (both idempotent)
//! ```
//!
//! Only the flag lives here. The side effects of `stop` (neutral actuator
//! write, digit-entry reset, channel reset) are sequenced by the service so
//! that they happen inside the same handler invocation.

use log::info;

/// Lifecycle phase, for logging and queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Off = 0,
    On = 1,
}

/// Gates sampling and actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    on: bool,
}

impl ControlState {
    /// Boot state: off.
    pub const fn new() -> Self {
        Self { on: false }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn phase(&self) -> Phase {
        if self.on { Phase::On } else { Phase::Off }
    }

    /// Turn the controller on. Returns `true` if this changed the phase.
    pub fn start(&mut self) -> bool {
        let changed = !self.on;
        if changed {
            info!("Lifecycle: Off -> On");
        }
        self.on = true;
        changed
    }

    /// Turn the controller off. Returns `true` if this changed the phase.
    pub fn stop(&mut self) -> bool {
        let changed = self.on;
        if changed {
            info!("Lifecycle: On -> Off");
        }
        self.on = false;
        changed
    }
}
