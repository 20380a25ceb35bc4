//! SwitchPress Firmware — Main Entry Point
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter   LogEventSink   Esp32TimeAdapter           │
//! │  (ServoPort)       (EventSink)    (monotonic clock)          │
//! │  WifiAdapter       ButtonDriver                              │
//! │  (association)     (local trigger)                           │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ────────────────        │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │             AppService (pure logic)                  │    │
//! │  │             PressSequencer                           │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod app;
pub mod config;
pub mod error;
mod events;
mod pins;
pub mod sequencer;

mod adapters;
mod drivers;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::Esp32TimeAdapter;
use adapters::wifi::{ConnectivityPort, WifiAdapter};
use app::commands::AppCommand;
use app::events::AppEvent;
use app::ports::{EventSink, ServoPort};
use app::service::AppService;
use config::SystemConfig;
use drivers::button::ButtonDriver;
use drivers::servo::ServoDriver;
use events::{push_event, Event};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SwitchPress v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load and validate configuration ────────────────────
    let config = SystemConfig::default();
    if let Err(msg) = config.validate() {
        // An out-of-range servo geometry must never reach the driver.
        // Halting here leaves the arm unpowered instead of slamming an
        // end stop; the watchdog reset gives the operator a retry after
        // reflashing a sane config.
        error!("config invalid: {} — halting", msg);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    info!(
        "config: neutral={}° press={}° hold={}ms",
        config.neutral_angle,
        config.press_angle(),
        config.press_hold_ms
    );

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        error!("ISR service init failed: {} — continuing without button", e);
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(ServoDriver::new(pins::SERVO_PWM_GPIO));
    let mut log_sink = LogEventSink::new();
    let time_adapter = Esp32TimeAdapter::new();
    let mut button = ButtonDriver::new(pins::BUTTON_GPIO);

    // ── 5. WiFi station (association collaborator) ────────────
    let mut wifi = WifiAdapter::new();
    #[cfg(target_os = "espidf")]
    {
        let peripherals = esp_idf_svc::hal::peripherals::Peripherals::take()?;
        let sysloop = esp_idf_svc::eventloop::EspSystemEventLoop::take()?;
        let nvs = esp_idf_svc::nvs::EspDefaultNvsPartition::take()?;
        wifi.attach_driver(esp_idf_svc::wifi::EspWifi::new(
            peripherals.modem,
            sysloop,
            Some(nvs),
        )?);
    }
    if config.wifi_ssid.is_empty() {
        warn!("WiFi: no credentials provisioned, staying offline");
    } else if let Err(e) = wifi.set_credentials(&config.wifi_ssid, &config.wifi_password) {
        warn!("WiFi: invalid credentials — {}", e);
    } else if let Err(e) = wifi.connect() {
        // Backoff retry continues in wifi.poll(); presses still work
        // from the local button while offline.
        warn!("WiFi: initial connect failed ({}), retrying in background", e);
    }

    // ── 6. Construct app service ──────────────────────────────
    let mut app = AppService::new(&config);

    // Park the arm at neutral before accepting any trigger.
    if let Err(e) = hw.set_angle(config.neutral_angle) {
        error!("servo park failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    app.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 7. Event loop ─────────────────────────────────────────
    let ticks_per_telemetry = config.ticks_per_telemetry();
    let mut telemetry_counter: u64 = 0;

    loop {
        // Pace the loop to the control interval.  On target this yields
        // to FreeRTOS for the interval, so the idle task runs and its
        // watchdog feed stays alive; on host a plain sleep stands in.
        #[cfg(target_os = "espidf")]
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(config.control_loop_interval_ms);
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));
        push_event(Event::ControlTick);

        telemetry_counter += 1;
        if telemetry_counter >= ticks_per_telemetry {
            push_event(Event::TelemetryTick);
            telemetry_counter = 0;
        }

        let now_ms = time_adapter.uptime_ms();

        // Button debounce (runs outside drain_events since it uses its
        // own atomic).
        if button.tick(now_ms as u32) {
            push_event(Event::ButtonPress);
        }

        // Process all pending events.
        events::drain_events(|event| match event {
            Event::ControlTick => {
                app.tick(now_ms, &mut hw, &mut log_sink);
            }

            Event::ButtonPress => {
                info!("Button: press trigger");
                // Busy/fault verdicts were already emitted through the
                // sink; nothing more to relay locally.
                let _ = app.handle_command(AppCommand::Press, now_ms, &mut hw, &mut log_sink);
            }

            Event::CommandReceived => {
                info!("Remote: press trigger");
                let _ = app.handle_command(AppCommand::Press, now_ms, &mut hw, &mut log_sink);
            }

            Event::TelemetryTick => {
                let t = app.build_telemetry(&hw, wifi.rssi());
                log_sink.emit(&AppEvent::Telemetry(t));
            }
        });

        // WiFi reconnection poll (exponential backoff).
        wifi.poll();
    }
}
