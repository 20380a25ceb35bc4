//! Adapters — the outer ring of the hexagon.
//!
//! Each adapter binds a port trait (or a collaborator contract) to a
//! concrete platform facility: the servo output channel, the serial
//! log, the monotonic clock, the WiFi station.

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod wifi;
