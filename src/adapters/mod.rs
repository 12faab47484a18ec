//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC1 (oneshot)     |
//! |                | ActuatorPort       | LEDC PWM                 |
//! |                | SerialPort         | UART1 operator link      |
//! | `log_sink`     | EventSink          | Serial log output        |

pub mod hardware;
pub mod log_sink;
