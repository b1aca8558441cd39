//! Fuzz target: `DistanceSensor::classify`
//!
//! Any echo width must map to a reading inside the plausible window or to
//! `Far`, and never panic.
//!
//! cargo fuzz run fuzz_echo_classify

#![no_main]

use libfuzzer_sys::fuzz_target;
use rover::config::RobotConfig;
use rover::nav::DistanceSample;
use rover::sensors::DistanceSensor;

fuzz_target!(|echo_us: u32| {
    let cfg = RobotConfig::default();
    let sensor = DistanceSensor::new(&cfg);

    match sensor.classify(echo_us) {
        DistanceSample::Cm(cm) => {
            assert!(cm >= cfg.min_range_cm && cm <= cfg.max_range_cm);
        }
        DistanceSample::Far => {}
    }
});
