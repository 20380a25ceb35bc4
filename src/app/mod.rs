//! Application layer — hexagonal core of the firmware.
//!
//! Domain logic (the press sequencer) talks to the outside world only
//! through the port traits in [`ports`]; adapters on the other side of
//! the boundary implement them.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
