//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the press sequencer and its counters.  It exposes
//! a clean, hardware-agnostic API; all I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!               ┌────────────────────────┐ ──▶ EventSink
//!   AppCommand ▶│       AppService        │
//!   ServoPort ◀─│     PressSequencer      │
//!               └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::SequencerError;
use crate::sequencer::{PressProgress, PressSequencer, SequencerState};

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, ServoPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    seq: PressSequencer,
    presses_completed: u32,
    presses_rejected: u32,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from validated configuration.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            seq: PressSequencer::new(config),
            presses_completed: 0,
            presses_rejected: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup through the sink.  The sequencer always begins
    /// in `Idle` with the servo parked at neutral by `main`.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.seq.state()));
        info!("AppService started in {:?}", self.seq.state());
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (button, remote dispatch).
    ///
    /// Returns the sequencer's verdict so the dispatch layer can relay
    /// success / busy / failure to its own caller.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u64,
        servo: &mut impl ServoPort,
        sink: &mut impl EventSink,
    ) -> Result<(), SequencerError> {
        match cmd {
            AppCommand::Press => self.request_press(now_ms, servo, sink),
        }
    }

    fn request_press(
        &mut self,
        now_ms: u64,
        servo: &mut impl ServoPort,
        sink: &mut impl EventSink,
    ) -> Result<(), SequencerError> {
        match self.seq.request_press(now_ms, servo) {
            Ok(()) => {
                sink.emit(&AppEvent::PressStarted);
                Ok(())
            }
            Err(SequencerError::Busy) => {
                self.presses_rejected += 1;
                warn!("press rejected: cycle already in flight");
                sink.emit(&AppEvent::PressFailed(SequencerError::Busy));
                Err(SequencerError::Busy)
            }
            Err(e @ SequencerError::Driver(cause)) => {
                sink.emit(&AppEvent::DriverFault(cause));
                sink.emit(&AppEvent::PressFailed(e));
                Err(e)
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: advance the sequencer against the clock.
    pub fn tick(&mut self, now_ms: u64, servo: &mut impl ServoPort, sink: &mut impl EventSink) {
        self.tick_count += 1;

        match self.seq.poll(now_ms, servo) {
            Ok(PressProgress::Completed) => {
                self.presses_completed += 1;
                sink.emit(&AppEvent::PressCompleted);
            }
            Ok(PressProgress::Idle | PressProgress::InFlight) => {}
            Err(e) => {
                if let SequencerError::Driver(cause) = e {
                    sink.emit(&AppEvent::DriverFault(cause));
                }
                sink.emit(&AppEvent::PressFailed(e));
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    /// `wifi_rssi`: signal strength when associated; `None` when offline.
    pub fn build_telemetry(
        &self,
        servo: &impl ServoPort,
        wifi_rssi: Option<i8>,
    ) -> TelemetryData {
        TelemetryData {
            state: self.seq.state(),
            presses_completed: self.presses_completed,
            presses_rejected: self.presses_rejected,
            commanded_angle: servo.commanded_angle(),
            wifi_rssi,
        }
    }

    /// Current sequencer state.
    pub fn state(&self) -> SequencerState {
        self.seq.state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Cycles completed since boot.
    pub fn presses_completed(&self) -> u32 {
        self.presses_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DriverError;

    struct NullServo;

    impl ServoPort for NullServo {
        fn set_angle(&mut self, _angle: u8) -> Result<(), DriverError> {
            Ok(())
        }
        fn commanded_angle(&self) -> Option<u8> {
            None
        }
    }

    struct NullSink;

    impl EventSink for NullSink {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    #[test]
    fn build_telemetry_wifi_rssi_propagates() {
        let app = AppService::new(&SystemConfig::default());
        let servo = NullServo;
        let t_none = app.build_telemetry(&servo, None);
        assert!(t_none.wifi_rssi.is_none());
        let t_some = app.build_telemetry(&servo, Some(-42));
        assert_eq!(t_some.wifi_rssi, Some(-42));
    }

    #[test]
    fn rejected_press_increments_counter() {
        let mut app = AppService::new(&SystemConfig::default());
        let mut servo = NullServo;
        let mut sink = NullSink;

        app.handle_command(AppCommand::Press, 0, &mut servo, &mut sink)
            .unwrap();
        let err = app
            .handle_command(AppCommand::Press, 10, &mut servo, &mut sink)
            .unwrap_err();
        assert_eq!(err, SequencerError::Busy);
        assert_eq!(app.build_telemetry(&servo, None).presses_rejected, 1);
    }
}
