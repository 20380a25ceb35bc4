//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (button,
//! network dispatch layer) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Trigger one press-and-release cycle.  Carries no payload — the
    /// geometry comes from configuration.
    Press,
}
