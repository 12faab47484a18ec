//! Controller configuration parameters
//!
//! Fixed at build time and validated once at boot. Nothing here is
//! persisted; changing a value means reflashing.

use core::fmt;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Sampling/actuation cycle period (milliseconds)
    pub tick_period_ms: u32,

    // --- Serial ---
    /// Operator link speed (bits per second)
    pub baud_rate: u32,

    // --- Actuator ---
    /// Command that corresponds to no applied force (0 V on the amplifier)
    pub neutral_command: i16,
    /// Largest command the PWM stage accepts (10-bit compare register)
    pub actuator_max: i16,

    // --- Reference ---
    /// Reference value at boot
    pub initial_reference: i16,
    /// Largest reference magnitude reachable through digit entry
    pub full_scale: i16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period_ms: 10, // ~100 Hz

            // Serial
            baud_rate: 38_400,

            // Actuator
            neutral_command: 540,
            actuator_max: 1023,

            // Reference
            initial_reference: 1,
            full_scale: 9999,
        }
    }
}

impl ControllerConfig {
    /// Reject values that would make the control loop misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_period_ms must be > 0"));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::ValidationFailed("baud_rate must be > 0"));
        }
        if self.actuator_max <= 0 {
            return Err(ConfigError::ValidationFailed("actuator_max must be > 0"));
        }
        if !(0..=self.actuator_max).contains(&self.neutral_command) {
            return Err(ConfigError::ValidationFailed(
                "neutral_command outside 0..=actuator_max",
            ));
        }
        if self.full_scale <= 0 {
            return Err(ConfigError::ValidationFailed("full_scale must be > 0"));
        }
        if self.initial_reference.unsigned_abs() > self.full_scale.unsigned_abs() {
            return Err(ConfigError::ValidationFailed(
                "initial_reference exceeds full_scale",
            ));
        }
        Ok(())
    }

    /// Tick frequency in Hz, rounded down.
    pub fn tick_hz(&self) -> u32 {
        1000 / self.tick_period_ms.max(1)
    }
}

/// Errors from [`ControllerConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}
