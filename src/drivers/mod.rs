//! Peripheral drivers: one-shot init, sampling timer, actuator PWM and the
//! operator UART receive task.

pub mod hw_init;
pub mod hw_timer;
pub mod pwm;
pub mod uart;
