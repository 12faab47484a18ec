//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the actuator PWM stage and exposes ADC1, the PWM and the operator
//! UART through [`SensorPort`], [`ActuatorPort`] and [`SerialPort`]. On
//! non-espidf targets the underlying `hw_init` helpers are simulation stubs.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort, SerialPort};
use crate::control::sampling::Channel;
use crate::drivers::hw_init;
use crate::drivers::pwm::{LedcChannel, PwmActuator};
use crate::pins;

/// Convert a 12-bit mid-rail conversion into the signed 10-bit sample the
/// controller works with (`-512..=511`).
pub fn to_signed_sample(raw12: u16) -> i16 {
    ((raw12.min(4095) as i16) - pins::ADC_MIDSCALE) >> pins::ADC_SHIFT
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P = LedcChannel> {
    actuator: PwmActuator<P>,
}

impl HardwareAdapter<LedcChannel> {
    /// Adapter on the board's LEDC actuator channel.
    pub fn on_board(actuator_max: i16) -> Self {
        Self::new(PwmActuator::new(LedcChannel::actuator(), actuator_max))
    }
}

impl<P: SetDutyCycle> HardwareAdapter<P> {
    pub fn new(actuator: PwmActuator<P>) -> Self {
        Self { actuator }
    }

    /// Duty of the last successful actuator write.
    pub fn last_duty(&self) -> u16 {
        self.actuator.last_duty()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P> SensorPort for HardwareAdapter<P> {
    fn read_channel(&mut self, channel: Channel) -> i16 {
        let adc_channel = match channel {
            Channel::Zero => pins::POSITION_ADC_CHANNEL,
            Channel::One => pins::ANGLE_ADC_CHANNEL,
        };
        match hw_init::adc1_read(adc_channel) {
            Ok(raw12) => to_signed_sample(raw12),
            Err(rc) => {
                // Report mid-scale rather than a reading at an end stop.
                warn!(
                    "ADC1 CH{} conversion failed (rc={}), reporting mid-scale",
                    adc_channel, rc
                );
                0
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: SetDutyCycle> ActuatorPort for HardwareAdapter<P> {
    fn write_actuator(&mut self, command: i16) {
        if let Err(e) = self.actuator.set_command(command) {
            warn!("actuator write failed ({:?}), command={}", e, command);
        }
    }
}

// ── SerialPort implementation ─────────────────────────────────

impl<P> SerialPort for HardwareAdapter<P> {
    fn send_byte(&mut self, byte: u8) {
        hw_init::uart_write(&[byte]);
    }

    fn send_bytes(&mut self, bytes: &[u8]) {
        hw_init::uart_write(bytes);
    }
}
