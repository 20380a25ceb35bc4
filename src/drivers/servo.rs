//! Positional servo driver (SG90-class, LEDC PWM).
//!
//! Translates an angle command (0–180°) into a 500–2500 µs pulse on the
//! 50 Hz servo frame via LEDC channel 0.
//!
//! ## Contract
//!
//! `set_angle` is fire-and-forget: it commands the new pulse width and
//! returns without waiting for the horn to physically arrive.  Travel
//! time is the sequencer's problem (hold duration), not the driver's —
//! there is no position feedback to wait on.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real LEDC channel via hw_init helpers.
//! On host/test: tracks the commanded angle in-memory only.

use crate::drivers::hw_init;
use crate::error::DriverError;
use crate::pins;

pub struct ServoDriver {
    gpio: i32,
    /// Last angle the output channel acknowledged.
    commanded: Option<u8>,
}

impl ServoDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            commanded: None,
        }
    }

    /// GPIO pin carrying the servo signal.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Command the servo to `angle` degrees.
    ///
    /// Out-of-range angles fail with `InvalidAngle` before any register
    /// is touched; a rejected command leaves the physical output exactly
    /// where it was.  A failed LEDC write surfaces as `HardwareFault`
    /// and is never retried here — the caller decides what a blind
    /// actuator with unknown position is allowed to do next.
    pub fn set_angle(&mut self, angle: u8) -> Result<(), DriverError> {
        if angle > pins::SERVO_MAX_ANGLE_DEG {
            return Err(DriverError::InvalidAngle);
        }

        let duty = angle_to_duty(angle);
        let rc = hw_init::ledc_set(hw_init::LEDC_CH_SERVO, duty);
        if rc != 0 {
            return Err(DriverError::HardwareFault);
        }

        self.commanded = Some(angle);
        Ok(())
    }

    /// Last successfully commanded angle, if any.  The neutral pulse
    /// stays active between cycles so the arm holds position against
    /// the switch spring; the signal line is never released.
    pub fn commanded_angle(&self) -> Option<u8> {
        self.commanded
    }
}

/// Convert an angle (0–180) to a raw LEDC duty value.
///
/// pulse = 500 µs + angle/180 × 2000 µs, scaled into the 14-bit duty
/// range over the 20 ms frame.
fn angle_to_duty(angle: u8) -> u32 {
    let span_us = pins::SERVO_MAX_PULSE_US - pins::SERVO_MIN_PULSE_US;
    let pulse_us = pins::SERVO_MIN_PULSE_US
        + (u32::from(angle) * span_us) / u32::from(pins::SERVO_MAX_ANGLE_DEG);
    let max_duty = (1u32 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;
    (pulse_us * max_duty) / pins::SERVO_PERIOD_US
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_endpoints_match_pulse_limits() {
        // 500 µs / 20 ms of 16383 ≈ 409; 2500 µs ≈ 2047.
        assert_eq!(angle_to_duty(0), 409);
        assert_eq!(angle_to_duty(180), 2047);
    }

    #[test]
    fn duty_is_monotonic_in_angle() {
        let mut prev = angle_to_duty(0);
        for angle in 1..=180 {
            let duty = angle_to_duty(angle);
            assert!(duty >= prev, "duty regressed at {angle}°");
            prev = duty;
        }
    }

    #[test]
    fn centre_angle_is_midpulse() {
        // 90° → 1500 µs → 16383 × 1500 / 20000 = 1228.
        assert_eq!(angle_to_duty(90), 1228);
    }

    #[test]
    fn rejects_out_of_range_angle() {
        let mut servo = ServoDriver::new(crate::pins::SERVO_PWM_GPIO);
        assert_eq!(servo.set_angle(181), Err(DriverError::InvalidAngle));
        // A rejected command must not update the commanded angle.
        assert_eq!(servo.commanded_angle(), None);
    }

    #[test]
    fn tracks_commanded_angle() {
        let mut servo = ServoDriver::new(crate::pins::SERVO_PWM_GPIO);
        servo.set_angle(90).unwrap();
        assert_eq!(servo.commanded_angle(), Some(90));
        servo.set_angle(150).unwrap();
        assert_eq!(servo.commanded_angle(), Some(150));
    }
}
