//! Integration tests: AppService → PressSequencer → servo port.
//!
//! Uses a recording mock servo and sink so the full command history and
//! event stream can be asserted without touching GPIO/PWM registers.

use switchpress::app::commands::AppCommand;
use switchpress::app::events::AppEvent;
use switchpress::app::ports::{EventSink, ServoPort};
use switchpress::app::service::AppService;
use switchpress::config::SystemConfig;
use switchpress::error::{DriverError, SequencerError};
use switchpress::sequencer::SequencerState;

// ── Mock implementations ──────────────────────────────────────

struct MockServo {
    angles: Vec<u8>,
    fail_all: bool,
}

impl MockServo {
    fn new() -> Self {
        Self {
            angles: Vec::new(),
            fail_all: false,
        }
    }

    fn failing() -> Self {
        Self {
            angles: Vec::new(),
            fail_all: true,
        }
    }
}

impl ServoPort for MockServo {
    fn set_angle(&mut self, angle: u8) -> Result<(), DriverError> {
        if self.fail_all {
            return Err(DriverError::HardwareFault);
        }
        self.angles.push(angle);
        Ok(())
    }

    fn commanded_angle(&self) -> Option<u8> {
        self.angles.last().copied()
    }
}

struct RecordingSink {
    events: Vec<String>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn saw(&self, needle: &str) -> bool {
        self.events.iter().any(|e| e.contains(needle))
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(format!("{:?}", event));
    }
}

fn make_app() -> AppService {
    AppService::new(&SystemConfig::default())
}

// ── Scenarios ─────────────────────────────────────────────────

/// The concrete scenario from the board's shipping configuration:
/// neutral 90°, amplitude 60°, hold 500 ms.
#[test]
fn press_cycle_end_to_end() {
    let mut app = make_app();
    let mut servo = MockServo::new();
    let mut sink = RecordingSink::new();

    app.start(&mut sink);
    app.handle_command(AppCommand::Press, 1_000, &mut servo, &mut sink)
        .unwrap();
    assert_eq!(app.state(), SequencerState::Holding);
    assert_eq!(servo.angles, vec![150]);
    assert!(sink.saw("PressStarted"));

    // Ticks before the deadline hold the press position.
    for t in [1_050, 1_200, 1_499] {
        app.tick(t, &mut servo, &mut sink);
        assert_eq!(app.state(), SequencerState::Holding);
    }
    assert_eq!(servo.angles, vec![150]);

    // Deadline reached: release to neutral and report completion.
    app.tick(1_500, &mut servo, &mut sink);
    assert_eq!(app.state(), SequencerState::Idle);
    assert_eq!(servo.angles, vec![150, 90]);
    assert!(sink.saw("PressCompleted"));
    assert_eq!(app.presses_completed(), 1);
}

#[test]
fn press_while_busy_is_rejected_without_side_effects() {
    let mut app = make_app();
    let mut servo = MockServo::new();
    let mut sink = RecordingSink::new();

    app.handle_command(AppCommand::Press, 0, &mut servo, &mut sink)
        .unwrap();

    let err = app
        .handle_command(AppCommand::Press, 100, &mut servo, &mut sink)
        .unwrap_err();
    assert_eq!(err, SequencerError::Busy);
    assert_eq!(app.state(), SequencerState::Holding);
    assert_eq!(servo.angles, vec![150], "rejected press must not move the servo");
    assert!(sink.saw("PressFailed(Busy)"));

    // The in-flight cycle still completes normally afterwards.
    app.tick(500, &mut servo, &mut sink);
    assert_eq!(app.state(), SequencerState::Idle);
    assert_eq!(servo.angles, vec![150, 90]);
}

#[test]
fn back_to_back_cycles_after_completion() {
    let mut app = make_app();
    let mut servo = MockServo::new();
    let mut sink = RecordingSink::new();

    for cycle in 0u64..3 {
        let t0 = cycle * 10_000;
        app.handle_command(AppCommand::Press, t0, &mut servo, &mut sink)
            .unwrap();
        app.tick(t0 + 500, &mut servo, &mut sink);
        assert_eq!(app.state(), SequencerState::Idle);
    }
    assert_eq!(app.presses_completed(), 3);
    assert_eq!(servo.angles, vec![150, 90, 150, 90, 150, 90]);
}

#[test]
fn hardware_fault_surfaces_and_leaves_idle() {
    let mut app = make_app();
    let mut servo = MockServo::failing();
    let mut sink = RecordingSink::new();

    let err = app
        .handle_command(AppCommand::Press, 0, &mut servo, &mut sink)
        .unwrap_err();
    assert_eq!(err, SequencerError::Driver(DriverError::HardwareFault));
    assert_eq!(app.state(), SequencerState::Idle, "no Holding after a failed press");
    assert!(sink.saw("DriverFault(HardwareFault)"));

    // Counters unaffected; a later press on healthy hardware works.
    assert_eq!(app.presses_completed(), 0);
    let mut good = MockServo::new();
    app.handle_command(AppCommand::Press, 0, &mut good, &mut sink)
        .unwrap();
    app.tick(500, &mut good, &mut sink);
    assert_eq!(app.presses_completed(), 1);
}

#[test]
fn telemetry_reflects_cycle_history() {
    let mut app = make_app();
    let mut servo = MockServo::new();
    let mut sink = RecordingSink::new();

    app.handle_command(AppCommand::Press, 0, &mut servo, &mut sink)
        .unwrap();
    // Rejected while holding.
    let _ = app.handle_command(AppCommand::Press, 10, &mut servo, &mut sink);
    app.tick(500, &mut servo, &mut sink);

    let t = app.build_telemetry(&servo, Some(-55));
    assert_eq!(t.state, SequencerState::Idle);
    assert_eq!(t.presses_completed, 1);
    assert_eq!(t.presses_rejected, 1);
    assert_eq!(t.commanded_angle, Some(90));
    assert_eq!(t.wifi_rssi, Some(-55));
}

#[test]
fn custom_geometry_drives_configured_angles() {
    let config = SystemConfig {
        neutral_angle: 30,
        press_amplitude: 45,
        press_hold_ms: 200,
        ..SystemConfig::default()
    };
    config.validate().unwrap();

    let mut app = AppService::new(&config);
    let mut servo = MockServo::new();
    let mut sink = RecordingSink::new();

    app.handle_command(AppCommand::Press, 0, &mut servo, &mut sink)
        .unwrap();
    app.tick(199, &mut servo, &mut sink);
    assert_eq!(app.state(), SequencerState::Holding);
    app.tick(200, &mut servo, &mut sink);
    assert_eq!(servo.angles, vec![75, 30]);
}
