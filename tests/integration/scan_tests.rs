//! Integration tests: ScanProtocol + DecisionEngine against the simulated rover.

use rover::app::ports::{Side, Sign};
use rover::config::RobotConfig;
use rover::drivers::motion::MotionActuator;
use rover::nav::decision::{Action, DecisionEngine};
use rover::nav::scan::ScanProtocol;
use rover::nav::{DistanceSample, ScanSnapshot};

use super::mock_hw::{Call, EAST, NORTH, SOUTH, SimRover, WEST};

fn config() -> RobotConfig {
    RobotConfig::default()
}

#[test]
fn scan_reads_front_left_right_and_returns_home() {
    let cfg = config();
    let mut sim = SimRover::new(cfg.quarter_turn_ms, [Some(15), Some(60), Some(5), Some(90)]);
    let scanner = ScanProtocol::new(&cfg);
    let mut motion = MotionActuator::new(&cfg);

    let snap = scanner.scan(&mut motion, &mut sim);

    assert_eq!(
        snap,
        ScanSnapshot::new(
            DistanceSample::Cm(15),
            DistanceSample::Cm(60),
            DistanceSample::Cm(90),
        )
    );
    assert_eq!(sim.trigger_facings(), vec![NORTH, WEST, EAST]);
    assert_eq!(sim.rotation_ms, 0);
    assert_eq!(sim.facing(), NORTH);
    assert!(sim.is_stopped());
    assert_eq!(sim.forward_ms, 0);
}

#[test]
fn scan_is_stopped_and_settled_before_every_trigger() {
    let cfg = config();
    let mut sim = SimRover::new(cfg.quarter_turn_ms, [None; 4]);
    let scanner = ScanProtocol::new(&cfg);
    let mut motion = MotionActuator::new(&cfg);

    // Rover arrives still moving from the previous action.
    motion.drive(&mut sim, Sign::Forward, 180, Sign::Forward, 180);
    sim.clear_calls();

    scanner.scan(&mut motion, &mut sim);

    let calls = &sim.calls;
    for (i, call) in calls.iter().enumerate() {
        if matches!(call, Call::Trigger { .. }) {
            assert_eq!(calls[i - 1], Call::Sleep(cfg.settle_ms), "call {i}");
            assert_eq!(
                calls[i - 2],
                Call::Motor { side: Side::Right, sign: Sign::Stop, magnitude: 0 }
            );
        }
    }
}

#[test]
fn scan_timing_matches_calibration() {
    let cfg = config();
    let mut sim = SimRover::new(cfg.quarter_turn_ms, [Some(100); 4]);
    let scanner = ScanProtocol::new(&cfg);
    let mut motion = MotionActuator::new(&cfg);

    scanner.scan(&mut motion, &mut sim);

    let pivots: Vec<u32> = sim
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Sleep(ms) if *ms != cfg.settle_ms => Some(*ms),
            _ => None,
        })
        .collect();
    assert_eq!(pivots, vec![400, 800, 400]);
    assert_eq!(sim.clock_ms, 4 * 100 + 1600);
}

#[test]
fn silent_sensor_reads_far_and_costs_bounded_time() {
    let cfg = config();
    let mut sim = SimRover::new(cfg.quarter_turn_ms, [None; 4]);
    let mut engine = DecisionEngine::new(&cfg);

    let decision = engine.decide(&mut sim, 0);

    assert_eq!(decision.snapshot, ScanSnapshot::default());
    assert_eq!(decision.action, Action::MoveForward);
    assert!(sim.clock_ms <= u64::from(cfg.worst_case_cycle_ms()));
}

#[test]
fn decide_leaves_orientation_unchanged_until_execute() {
    let cfg = config();
    let mut sim = SimRover::new(cfg.quarter_turn_ms, [Some(15), Some(10), Some(50), Some(50)]);
    let mut engine = DecisionEngine::new(&cfg);

    let decision = engine.decide(&mut sim, 0);
    assert_eq!(decision.action, Action::TurnThenMoveRight);
    assert_eq!(sim.facing(), NORTH);

    engine.execute(decision.action, &mut sim);
    assert_eq!(sim.facing(), EAST);
    assert_eq!(sim.forward_ms, u64::from(cfg.move_step_ms));
    assert!(sim.is_stopped());
}

#[test]
fn half_turn_recovery_faces_back() {
    let cfg = RobotConfig {
        recovery_spin: rover::config::RecoverySpin::HalfTurn,
        ..config()
    };
    let mut sim = SimRover::new(cfg.quarter_turn_ms, [Some(15), Some(10), Some(50), Some(10)]);
    let mut engine = DecisionEngine::new(&cfg);

    let decision = engine.decide(&mut sim, 0);
    assert_eq!(decision.action, Action::SpinInPlace);

    engine.execute(decision.action, &mut sim);
    assert_eq!(sim.facing(), SOUTH);
    assert_eq!(sim.forward_ms, 0);
}
