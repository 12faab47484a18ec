//! Inbound operator commands.
//!
//! Every byte received on the serial link is classified into a
//! [`Command`]. Anything outside the command alphabet is line noise and
//! maps to `None`.

/// Commands that the operator can send, one byte each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `s` — start the controller.
    Start,
    /// `t` — stop the controller and return the actuator to neutral.
    Stop,
    /// `r` — negate the reference.
    FlipReference,
    /// `0`..`9` — one keystroke of a reference entry (value `0..=9`).
    Digit(u8),
}

impl Command {
    /// Classify one received byte. Unrecognised bytes yield `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b's' => Some(Self::Start),
            b't' => Some(Self::Stop),
            b'r' => Some(Self::FlipReference),
            b'0'..=b'9' => Some(Self::Digit(byte - b'0')),
            _ => None,
        }
    }
}
