//! Error types for the SwitchPress firmware.
//!
//! Two small `Copy` enums cover every fallible runtime path: the servo
//! driver's command verdicts and the sequencer's cycle verdicts.  They
//! pass through the event loop and telemetry without allocation.
//! Startup-only failures (configuration, peripheral init) carry their
//! own types next to the code that raises them.

use core::fmt;

// ---------------------------------------------------------------------------
// Servo driver errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Commanded angle lies outside the servo's physical output range.
    /// The output signal is left unchanged.
    InvalidAngle,
    /// The PWM output channel could not be driven (peripheral not
    /// initialised or register write failed).  Surfaced to the caller,
    /// never retried blind — the servo's position is unknown after this.
    HardwareFault,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAngle => write!(f, "angle out of range"),
            Self::HardwareFault => write!(f, "PWM channel write failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sequencer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerError {
    /// A press was requested while a cycle is already in flight.
    /// The request is rejected with no state change; retry once the
    /// sequencer returns to idle.
    Busy,
    /// The servo driver failed mid-cycle; the sequencer aborted to idle
    /// without a compensating move.
    Driver(DriverError),
}

impl fmt::Display for SequencerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "press cycle already in flight"),
            Self::Driver(e) => write!(f, "cycle aborted: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(DriverError::InvalidAngle.to_string(), "angle out of range");
        assert_eq!(
            SequencerError::Driver(DriverError::HardwareFault).to_string(),
            "cycle aborted: PWM channel write failed"
        );
        assert_eq!(
            SequencerError::Busy.to_string(),
            "press cycle already in flight"
        );
    }
}
