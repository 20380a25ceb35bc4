//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, push a network
//! notification, etc.

use crate::error::{DriverError, SequencerError};
use crate::sequencer::SequencerState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(SequencerState),

    /// A press cycle began — servo commanded to the press angle.
    PressStarted,

    /// A press cycle finished — servo back at neutral.
    PressCompleted,

    /// A press request was rejected or aborted.
    PressFailed(SequencerError),

    /// The servo driver reported a fault; the cycle was abandoned.
    DriverFault(DriverError),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryData {
    pub state: SequencerState,
    pub presses_completed: u32,
    pub presses_rejected: u32,
    /// Last angle the driver acknowledged, if any.
    pub commanded_angle: Option<u8>,
    /// WiFi signal strength in dBm when associated; `None` when offline.
    pub wifi_rssi: Option<i8>,
}
