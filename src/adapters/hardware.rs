//! Hardware adapter — bridges the real servo to the domain port trait.
//!
//! Owns the [`ServoDriver`], exposing it through [`ServoPort`].  This is
//! the only module in the system that hands the output channel to the
//! domain, which gives the sequencer the exclusive ownership the design
//! relies on: no other component can write the control line.  On
//! non-espidf targets the underlying driver uses cfg-gated simulation
//! stubs.

use crate::app::ports::ServoPort;
use crate::drivers::servo::ServoDriver;
use crate::error::DriverError;

/// Concrete adapter wrapping the servo behind the port trait.
pub struct HardwareAdapter {
    servo: ServoDriver,
}

impl HardwareAdapter {
    pub fn new(servo: ServoDriver) -> Self {
        Self { servo }
    }
}

// ── ServoPort implementation ──────────────────────────────────

impl ServoPort for HardwareAdapter {
    fn set_angle(&mut self, angle: u8) -> Result<(), DriverError> {
        self.servo.set_angle(angle)
    }

    fn commanded_angle(&self) -> Option<u8> {
        self.servo.commanded_angle()
    }
}
