//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                   |
//! |-------------|---------------------|-------------------------------|
//! | `hcsr04`    | RangingPort         | TRIG/ECHO GPIO                |
//! | `l298n`     | MotorPort           | IN1..IN4 GPIO, ENA/ENB PWM    |
//! | `time`      | ClockPort           | esp_timer / FreeRTOS delay    |
//! | `hardware`  | all three           | bundles the above             |
//! | `log_sink`  | EventSink           | Serial log output             |
//! | `telemetry` | EventSink           | JSON lines on any `io::Write` |

pub mod hardware;
pub mod hcsr04;
pub mod l298n;
pub mod log_sink;
pub mod telemetry;
pub mod time;
