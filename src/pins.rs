//! GPIO / peripheral pin assignments for the servo controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Actuator (PWM → servo amplifier input)
// ---------------------------------------------------------------------------

/// LEDC PWM output feeding the amplifier's command input.
pub const ACTUATOR_PWM_GPIO: i32 = 1;
/// PWM carrier frequency. Well above the motor's electrical bandwidth.
pub const ACTUATOR_PWM_FREQ_HZ: u32 = 20_000;
/// 10-bit duty resolution, matching the command range `0..=1023`.
pub const ACTUATOR_PWM_RESOLUTION_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Channel 0: ball position potentiometer. ADC1 channel 3 (GPIO 4).
pub const POSITION_ADC_CHANNEL: u32 = 3;
/// Channel 1: beam angle potentiometer. ADC1 channel 4 (GPIO 5).
pub const ANGLE_ADC_CHANNEL: u32 = 4;
/// Sensors are centred at mid-rail; subtracting this yields a signed sample.
pub const ADC_MIDSCALE: i16 = 2048;
/// 12-bit conversions are shifted down to the 10-bit range the reports use.
pub const ADC_SHIFT: u32 = 2;

// ---------------------------------------------------------------------------
// Operator serial link (UART1)
// ---------------------------------------------------------------------------

pub const OPERATOR_UART_PORT: i32 = 1;
pub const OPERATOR_UART_TX_GPIO: i32 = 17;
pub const OPERATOR_UART_RX_GPIO: i32 = 18;
/// Driver-side RX ring buffer (bytes). Must exceed the hardware FIFO (128).
pub const OPERATOR_UART_RX_BUF: i32 = 256;
