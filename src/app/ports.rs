//! Port traits — the hexagonal boundary between domain logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! The peripheral shim is split into three driven ports. The
//! [`ControlService`](super::service::ControlService) consumes them via
//! generics, so the domain core never touches registers directly.
//!
//! None of these calls can fail: the adapter owns any hardware-fault
//! handling. None of them are reentrant either; the service only calls them
//! from inside its own `&mut self` methods.

use crate::control::sampling::Channel;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one analog conversion per call.
pub trait SensorPort {
    /// Convert `channel` and return the signed raw sample. Blocks briefly
    /// until the conversion completes.
    fn read_channel(&mut self, channel: Channel) -> i16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the PWM output stage.
pub trait ActuatorPort {
    /// Apply a signed actuator command. Fire-and-forget.
    fn write_actuator(&mut self, command: i16);
}

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: domain → operator terminal)
// ───────────────────────────────────────────────────────────────

/// Transmit side of the operator link.
pub trait SerialPort {
    /// Send one byte, waiting for the transmitter if it is busy.
    fn send_byte(&mut self, byte: u8);

    /// Send a run of bytes in order.
    fn send_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.send_byte(b);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
