//! System configuration parameters
//!
//! All tunable parameters for the SwitchPress actuator.  Defaults mirror
//! the values the board ships with; WiFi credentials are blank until
//! provisioned and are consumed only by the network adapter.

use serde::{Deserialize, Serialize};

use crate::pins;

/// Core system configuration, loaded once at startup and validated
/// before any press attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Servo geometry ---
    /// Resting position of the servo arm (degrees, 0–180).
    pub neutral_angle: u8,
    /// Angular offset from neutral that presses the switch (degrees).
    /// `neutral_angle + press_amplitude` must stay within 0–180.
    pub press_amplitude: u8,
    /// Time the arm stays at the press position before returning
    /// (milliseconds).  Open-loop: must be calibrated to exceed the
    /// worst-case mechanical travel time, since there is no position
    /// feedback to confirm arrival.
    pub press_hold_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).  Bounds the jitter on the
    /// hold-timer release above `press_hold_ms`.
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,

    // --- Network (consumed by the WiFi adapter only) ---
    /// WiFi station SSID.  Empty = not provisioned, stay offline.
    pub wifi_ssid: heapless::String<32>,
    /// WiFi WPA2 passphrase (8–64 bytes, or empty for an open network).
    pub wifi_password: heapless::String<64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Servo: centred arm, 60° throw, half-second press
            neutral_angle: 90,
            press_amplitude: 60,
            press_hold_ms: 500,

            // Timing
            control_loop_interval_ms: 50, // 20 Hz
            telemetry_interval_secs: 60,  // 1/min

            // Network
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
        }
    }
}

impl SystemConfig {
    /// Angle commanded during the press phase.
    pub fn press_angle(&self) -> u8 {
        self.neutral_angle.saturating_add(self.press_amplitude)
    }

    /// Control ticks between telemetry reports.  Valid because the main
    /// loop delays for exactly one `control_loop_interval_ms` per
    /// iteration before pushing its tick.
    pub fn ticks_per_telemetry(&self) -> u64 {
        u64::from(self.telemetry_interval_secs) * 1_000 / u64::from(self.control_loop_interval_ms)
    }

    /// Validate the configuration against the servo's physical range.
    ///
    /// A violated configuration is a startup-fatal condition — `main`
    /// refuses to enter the control loop on `Err`, so an out-of-range
    /// angle can never surprise the driver at runtime.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.neutral_angle > pins::SERVO_MAX_ANGLE_DEG {
            return Err("neutral_angle exceeds servo range");
        }
        let press = u16::from(self.neutral_angle) + u16::from(self.press_amplitude);
        if press > u16::from(pins::SERVO_MAX_ANGLE_DEG) {
            return Err("neutral_angle + press_amplitude exceeds servo range");
        }
        if self.control_loop_interval_ms == 0 {
            return Err("control_loop_interval_ms must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let c = SystemConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.press_angle(), 150);
    }

    #[test]
    fn rejects_press_angle_past_end_stop() {
        let c = SystemConfig {
            neutral_angle: 150,
            press_amplitude: 60,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_neutral_past_end_stop() {
        let c = SystemConfig {
            neutral_angle: 181,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn accepts_zero_hold_duration() {
        let c = SystemConfig {
            press_hold_ms: 0,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let c = SystemConfig {
            control_loop_interval_ms: 0,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn boundary_sum_of_180_is_valid() {
        let c = SystemConfig {
            neutral_angle: 120,
            press_amplitude: 60,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_ok());
        assert_eq!(c.press_angle(), 180);
    }

    #[test]
    fn telemetry_period_counts_whole_ticks() {
        // 60 s at one tick per 50 ms.
        let c = SystemConfig::default();
        assert_eq!(c.ticks_per_telemetry(), 1_200);

        let c = SystemConfig {
            control_loop_interval_ms: 7,
            telemetry_interval_secs: 1,
            ..SystemConfig::default()
        };
        assert_eq!(c.ticks_per_telemetry(), 142);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.neutral_angle, c2.neutral_angle);
        assert_eq!(c.press_amplitude, c2.press_amplitude);
        assert_eq!(c.press_hold_ms, c2.press_hold_ms);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = SystemConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: SystemConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.press_hold_ms, c2.press_hold_ms);
        assert_eq!(c.control_loop_interval_ms, c2.control_loop_interval_ms);
    }
}
