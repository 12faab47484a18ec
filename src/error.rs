//! Unified error types for the DC-servo firmware.
//!
//! The control core is infallible: every operation on
//! [`ControlService`](crate::app::service::ControlService) is a pure state
//! transition. Errors only arise while bringing the board up, so this enum
//! stays small. All variants are `Copy`.

use core::fmt;

pub use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible boot-time operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(ConfigError),
    /// A peripheral could not be brought up.
    Peripheral(PeripheralError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Peripheral(e) => write!(f, "peripheral: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Peripheral errors
// ---------------------------------------------------------------------------

/// ESP-IDF return codes are carried verbatim for the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    AdcInitFailed(i32),
    LedcInitFailed(i32),
    UartInitFailed(i32),
    TimerInitFailed(i32),
    TaskSpawnFailed,
}

impl fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={rc})"),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={rc})"),
            Self::UartInitFailed(rc) => write!(f, "UART driver install failed (rc={rc})"),
            Self::TimerInitFailed(rc) => write!(f, "esp_timer setup failed (rc={rc})"),
            Self::TaskSpawnFailed => write!(f, "UART receive task spawn failed"),
        }
    }
}

impl core::error::Error for PeripheralError {}

impl From<PeripheralError> for Error {
    fn from(e: PeripheralError) -> Self {
        Self::Peripheral(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
