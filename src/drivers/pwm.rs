//! Actuator PWM stage.
//!
//! [`PwmActuator`] turns a signed actuator command into a duty cycle on any
//! [`SetDutyCycle`] output. Commands are clamped to `0..=actuator_max` and
//! scaled onto the output's duty range, so the domain never has to know the
//! timer resolution.
//!
//! [`LedcChannel`] is the board's implementation on top of the raw LEDC
//! helpers in [`hw_init`](super::hw_init).

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

use super::hw_init;
use crate::pins;

// ---------------------------------------------------------------------------
// PwmActuator
// ---------------------------------------------------------------------------

pub struct PwmActuator<P> {
    pwm: P,
    actuator_max: i16,
    last_duty: u16,
}

impl<P: SetDutyCycle> PwmActuator<P> {
    pub fn new(pwm: P, actuator_max: i16) -> Self {
        Self {
            pwm,
            actuator_max: actuator_max.max(1),
            last_duty: 0,
        }
    }

    /// Duty cycle that `command` maps to.
    pub fn duty_for(&self, command: i16) -> u16 {
        let clamped = u32::from(command.clamp(0, self.actuator_max).unsigned_abs());
        let max_duty = u32::from(self.pwm.max_duty_cycle());
        let max_command = u32::from(self.actuator_max.unsigned_abs());
        (clamped * max_duty / max_command) as u16
    }

    /// Apply `command` to the output.
    pub fn set_command(&mut self, command: i16) -> Result<(), P::Error> {
        let duty = self.duty_for(command);
        self.pwm.set_duty_cycle(duty)?;
        self.last_duty = duty;
        Ok(())
    }

    /// Duty of the last successful write.
    pub fn last_duty(&self) -> u16 {
        self.last_duty
    }
}

// ---------------------------------------------------------------------------
// LedcChannel
// ---------------------------------------------------------------------------

/// ESP-IDF return code from a failed LEDC call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcError(pub i32);

impl embedded_hal::pwm::Error for LedcError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One LEDC channel, configured by `hw_init::init_peripherals`.
pub struct LedcChannel {
    channel: u32,
    max_duty: u16,
}

impl LedcChannel {
    /// The actuator output channel.
    pub fn actuator() -> Self {
        Self {
            channel: hw_init::LEDC_CH_ACTUATOR,
            max_duty: ((1u32 << pins::ACTUATOR_PWM_RESOLUTION_BITS) - 1) as u16,
        }
    }
}

impl ErrorType for LedcChannel {
    type Error = LedcError;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        hw_init::ledc_set(self.channel, u32::from(duty.min(self.max_duty))).map_err(LedcError)
    }
}
