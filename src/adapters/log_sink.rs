//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future network-notification adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} | presses={} rejected={} | angle={:?} | rssi={:?}dBm",
                    t.state,
                    t.presses_completed,
                    t.presses_rejected,
                    t.commanded_angle,
                    t.wifi_rssi,
                );
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::PressStarted => {
                info!("PRESS | cycle started");
            }
            AppEvent::PressCompleted => {
                info!("PRESS | cycle completed");
            }
            AppEvent::PressFailed(e) => {
                warn!("PRESS | failed: {}", e);
            }
            AppEvent::DriverFault(e) => {
                warn!("FAULT | servo driver: {}", e);
            }
        }
    }
}
