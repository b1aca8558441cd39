//! Integration tests: AppService → scan → memory → actuators → events.

use rover::adapters::telemetry::JsonLineSink;
use rover::app::events::AppEvent;
use rover::app::ports::{Side, Sign};
use rover::app::service::AppService;
use rover::config::{BOOT_SETTLE_MS, RobotConfig};
use rover::nav::decision::Action;
use rover::nav::{DistanceSample, Heading};

use super::mock_hw::{Call, EAST, NORTH, RecordingSink, SOUTH, SimRover, WEST};

fn service() -> AppService {
    AppService::new(RobotConfig::default()).unwrap()
}

fn sim(world: [Option<u16>; 4]) -> SimRover {
    SimRover::new(RobotConfig::default().quarter_turn_ms, world)
}

#[test]
fn start_emits_started_event() {
    let mut app = service();
    let mut hw = sim([None; 4]);
    let mut sink = RecordingSink::default();
    app.start(&mut hw, &mut sink);
    assert!(matches!(
        sink.events.as_slice(),
        [AppEvent::Started { block_duration_ms: 10_000, obstacle_threshold_cm: 20 }]
    ));
}

#[test]
fn start_stops_motors_and_waits_before_first_scan() {
    let mut app = service();
    let mut hw = sim([None; 4]);

    app.start(&mut hw, &mut RecordingSink::default());

    assert_eq!(
        hw.calls,
        vec![
            Call::Motor { side: Side::Left, sign: Sign::Stop, magnitude: 0 },
            Call::Motor { side: Side::Right, sign: Sign::Stop, magnitude: 0 },
            Call::Sleep(BOOT_SETTLE_MS),
        ]
    );
    assert_eq!(hw.clock_ms, u64::from(BOOT_SETTLE_MS));
    assert!(hw.trigger_facings().is_empty());
}

#[test]
fn paired_sinks_both_receive_every_event() {
    let mut app = service();
    let mut hw = sim([Some(15), Some(50), Some(200), Some(50)]);
    let mut sink = (RecordingSink::default(), JsonLineSink::new(Vec::<u8>::new()));

    app.start(&mut hw, &mut sink);
    app.run_cycle(&mut hw, &mut sink);

    let (recorder, json) = sink;
    assert_eq!(recorder.events.len(), 2);
    let text = String::from_utf8(json.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(r#"{"event":"started""#));
    assert!(lines[1].contains(r#""action":"TurnThenMoveLeft""#));
}

#[test]
fn open_field_moves_forward() {
    let mut app = service();
    let mut hw = sim([Some(200); 4]);
    let mut sink = RecordingSink::default();

    let report = app.run_cycle(&mut hw, &mut sink);

    assert_eq!(report.action, Action::MoveForward);
    assert_eq!(hw.facing(), NORTH);
    assert_eq!(hw.forward_ms, 300);
    assert!(hw.is_stopped());
}

#[test]
fn blocked_front_with_open_sides_turns_left() {
    let mut app = service();
    let mut hw = sim([Some(15), Some(50), Some(200), Some(50)]);
    let mut sink = RecordingSink::default();

    let report = app.run_cycle(&mut hw, &mut sink);

    assert_eq!(report.action, Action::TurnThenMoveLeft);
    assert_eq!(hw.facing(), WEST);
}

#[test]
fn blocked_front_and_left_turns_right() {
    let mut app = service();
    let mut hw = sim([Some(15), Some(10), Some(200), Some(50)]);
    let report = app.run_cycle(&mut hw, &mut RecordingSink::default());

    assert_eq!(report.action, Action::TurnThenMoveRight);
    assert_eq!(hw.facing(), EAST);
}

#[test]
fn boxed_in_spins_full_turn_without_reversing() {
    let mut app = service();
    let mut hw = sim([Some(15), Some(10), Some(200), Some(10)]);
    let report = app.run_cycle(&mut hw, &mut RecordingSink::default());

    assert_eq!(report.action, Action::SpinInPlace);
    assert_eq!(hw.facing(), NORTH);
    assert_eq!(hw.rotation_ms, 1600);
    assert_eq!(hw.forward_ms, 0);

    let motors: Vec<(Side, Sign)> = hw
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Motor { side, sign, .. } => Some((*side, *sign)),
            _ => None,
        })
        .collect();
    assert!(
        motors
            .chunks(2)
            .all(|pair| pair != [(Side::Left, Sign::Backward), (Side::Right, Sign::Backward)]),
        "reverse drive issued"
    );
}

#[test]
fn recently_blocked_front_is_not_retrusted() {
    let mut app = service();
    // Only north is close; every other quarter is wide open.
    let mut hw = sim([Some(15), Some(80), Some(80), Some(80)]);
    let mut sink = RecordingSink::default();

    // Cycle 1: front blocked, turn to face west.
    let first = app.run_cycle(&mut hw, &mut sink);
    assert_eq!(first.action, Action::TurnThenMoveLeft);
    assert_eq!(hw.facing(), WEST);

    // Cycle 2: the new front reads clear, but the Front slot is still in
    // its block window, so the rover turns left again instead.
    let second = app.run_cycle(&mut hw, &mut sink);
    assert!(second.now_ms < 10_000);
    assert_eq!(second.snapshot.front, DistanceSample::Cm(80));
    assert!(!second.available.front);
    assert_eq!(second.action, Action::TurnThenMoveLeft);
    assert_eq!(hw.facing(), SOUTH);

    // After the window, a clear front is trusted again.
    hw.clock_ms = 10_001;
    let third = app.run_cycle(&mut hw, &mut sink);
    assert!(third.available.front);
    assert_eq!(third.action, Action::MoveForward);
    assert!(!app.memory().is_blocked(Heading::Front));
}

#[test]
fn every_cycle_reports_through_the_sink() {
    let mut app = service();
    let mut hw = sim([None; 4]);
    let mut sink = RecordingSink::default();

    app.start(&mut hw, &mut sink);
    for _ in 0..3 {
        app.run_cycle(&mut hw, &mut sink);
    }

    let cycles: Vec<u64> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CycleCompleted(r) => Some(r.cycle),
            AppEvent::Started { .. } => None,
        })
        .collect();
    assert_eq!(cycles, vec![1, 2, 3]);
    assert_eq!(app.cycle_count(), 3);
}

#[test]
fn cycles_stay_within_worst_case_budget() {
    let cfg = RobotConfig::default();
    let mut app = service();
    let mut hw = sim([None, Some(10), Some(10), Some(10)]);
    let mut sink = RecordingSink::default();

    for _ in 0..5 {
        let before = hw.clock_ms;
        app.run_cycle(&mut hw, &mut sink);
        assert!(hw.clock_ms - before <= u64::from(cfg.worst_case_cycle_ms()));
    }
}
