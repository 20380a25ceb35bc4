//! GPIO / peripheral pin assignments for the SwitchPress board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Servo (SG90-class positional servo, wall-switch lever arm)
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the servo signal line.
pub const SERVO_PWM_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// User button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button for a locally triggered press.
pub const BUTTON_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Servo PWM configuration
// ---------------------------------------------------------------------------

/// Standard hobby-servo frame rate (20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits).  14-bit gives ~1.2 µs pulse granularity
/// at 50 Hz — well under the ~10 µs/degree a 180° servo resolves.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Pulse width commanding the 0° end stop.
pub const SERVO_MIN_PULSE_US: u32 = 500;
/// Pulse width commanding the 180° end stop.
pub const SERVO_MAX_PULSE_US: u32 = 2500;
/// One PWM frame at 50 Hz.
pub const SERVO_PERIOD_US: u32 = 20_000;

/// Physical angular range of the servo class in use (degrees).
pub const SERVO_MAX_ANGLE_DEG: u8 = 180;
