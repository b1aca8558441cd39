//! Rover Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Hcsr04          L298n          MonotonicClock  LogEventSink   │
//! │  (RangingPort)   (MotorPort)    (ClockPort)     (EventSink)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Scan · DirectionMemory · Priority selection           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Watchdog (fed once per cycle)                                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, PinDriver};
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, config::TimerConfig};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;

use rover::adapters::hardware::HardwareAdapter;
use rover::adapters::hcsr04::Hcsr04;
use rover::adapters::l298n::{Channel, L298n};
use rover::adapters::log_sink::LogEventSink;
use rover::adapters::telemetry::JsonLineSink;
use rover::adapters::time::MonotonicClock;
use rover::app::service::AppService;
use rover::config::RobotConfig;
use rover::drivers::watchdog::Watchdog;
use rover::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Rover v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compiled-in) ────────────────────────
    let config = RobotConfig::default();
    let mut app = AppService::new(config.clone())?;

    // ── 3. Peripherals ────────────────────────────────────────
    let p = Peripherals::take()?;

    let pwm_timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::default().frequency(Hertz(pins::MOTOR_PWM_FREQ_HZ)),
    )?;

    // SAFETY: each GPIO number in `pins` is claimed exactly once here and
    // no other driver in the firmware touches these pins.
    let (left_en, right_en, in1, in2, in3, in4, trig, echo) = unsafe {
        (
            AnyOutputPin::new(pins::LEFT_EN_GPIO),
            AnyOutputPin::new(pins::RIGHT_EN_GPIO),
            AnyOutputPin::new(pins::LEFT_IN1_GPIO),
            AnyOutputPin::new(pins::LEFT_IN2_GPIO),
            AnyOutputPin::new(pins::RIGHT_IN3_GPIO),
            AnyOutputPin::new(pins::RIGHT_IN4_GPIO),
            AnyOutputPin::new(pins::SONAR_TRIG_GPIO),
            AnyInputPin::new(pins::SONAR_ECHO_GPIO),
        )
    };

    let left = Channel::new(
        PinDriver::output(in1)?,
        PinDriver::output(in2)?,
        LedcDriver::new(p.ledc.channel0, &pwm_timer, left_en)?,
    );
    let right = Channel::new(
        PinDriver::output(in3)?,
        PinDriver::output(in4)?,
        LedcDriver::new(p.ledc.channel1, &pwm_timer, right_en)?,
    );

    let clock = MonotonicClock::new();
    let sonar = Hcsr04::new(
        PinDriver::output(trig)?,
        PinDriver::input(echo)?,
        Ets,
        clock,
        config.trigger_pulse_us,
    );

    let mut hw = HardwareAdapter::new(sonar, L298n::new(left, right), clock);
    hw.all_stop();

    // ── 4. Supervision ────────────────────────────────────────
    let watchdog = Watchdog::new(config.worst_case_cycle_ms());
    // Console lines for a human, JSON lines for the host-side logger.
    let mut sink = (LogEventSink::new(), JsonLineSink::new(std::io::stdout()));

    // ── 5. Control loop ───────────────────────────────────────
    app.start(&mut hw, &mut sink);
    info!("System ready. Entering control loop.");

    loop {
        app.run_cycle(&mut hw, &mut sink);
        watchdog.feed();
    }
}
