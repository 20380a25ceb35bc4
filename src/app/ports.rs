//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the servo output channel, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly and the
//! whole press cycle is testable against a recording mock.

use crate::error::DriverError;

// ───────────────────────────────────────────────────────────────
// Servo port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the sequencer commands the servo through this.
///
/// `set_angle` is fire-and-forget with respect to mechanical settling —
/// the implementation must not block waiting for the arm to arrive.
/// Timing of "has it arrived" belongs to the sequencer's hold duration,
/// not to this port.
pub trait ServoPort {
    /// Command the servo to `angle` degrees (0–180).
    ///
    /// Out-of-range angles fail with [`DriverError::InvalidAngle`] and
    /// leave the physical output unchanged.  An undriveable output
    /// channel fails with [`DriverError::HardwareFault`].
    fn set_angle(&mut self, angle: u8) -> Result<(), DriverError>;

    /// Last successfully commanded angle, if any command has gone out.
    fn commanded_angle(&self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, a
/// network notification, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
