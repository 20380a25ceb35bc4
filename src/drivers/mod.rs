//! Hardware drivers.
//!
//! Each driver is a dumb actuator or input stage; policy lives in the
//! sequencer and app service.  ESP-IDF register access is cfg-gated on
//! `target_os = "espidf"` with in-memory stubs everywhere else.

pub mod button;
pub mod hw_init;
pub mod servo;
