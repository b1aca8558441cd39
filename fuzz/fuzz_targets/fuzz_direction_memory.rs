//! Fuzz target: `DecisionEngine::assess`
//!
//! Replays arbitrary scan snapshots at non-decreasing timestamps and
//! checks the memory against a shadow model of the block windows.
//!
//! cargo fuzz run fuzz_direction_memory

#![no_main]

use libfuzzer_sys::fuzz_target;
use rover::config::RobotConfig;
use rover::nav::decision::{Action, DecisionEngine, select_action};
use rover::nav::{DistanceSample, Heading, ScanSnapshot};

fn sample(byte: u8) -> DistanceSample {
    // 0 stands for a timed-out echo; everything else is a centimetre reading.
    if byte == 0 { DistanceSample::Far } else { DistanceSample::Cm(u16::from(byte)) }
}

fuzz_target!(|data: &[u8]| {
    let cfg = RobotConfig::default();
    let block = u64::from(cfg.block_duration_ms);
    let mut engine = DecisionEngine::new(&cfg);
    let mut shadow: [Option<u64>; 3] = [None; 3];
    let mut now = 0u64;

    for chunk in data.chunks_exact(5) {
        now += u64::from(u16::from_le_bytes([chunk[0], chunk[1]]));
        let snap = ScanSnapshot::new(sample(chunk[2]), sample(chunk[3]), sample(chunk[4]));
        let avail = engine.assess(&snap, now);

        for h in Heading::ALL {
            let open = snap.get(h).is_open(cfg.obstacle_threshold_cm);
            let slot = &mut shadow[h.index()];
            let expected = if !open {
                *slot = Some(now + block);
                false
            } else if slot.is_some_and(|until| now < until) {
                false
            } else {
                *slot = None;
                true
            };
            assert_eq!(avail.get(h), expected, "{h:?} at {now}");
        }

        let action = select_action(&avail);
        if avail.front {
            assert_eq!(action, Action::MoveForward);
        }
        if !avail.front && !avail.left && !avail.right {
            assert_eq!(action, Action::SpinInPlace);
        }
    }
});
