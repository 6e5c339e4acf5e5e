//! Example: a minimal headless control surface.
//!
//! Connects to the broker configured through `NEOLAMP_MQTT_*` environment
//! variables, turns the whole strip red, and starts a 45 minute timer once
//! the broker link is up. Telemetry from the lamp is printed as it arrives.
//!
//! Run with: `cargo run --example control_panel`

use neolamp_core::{
    start_timer, BrokerConfig, LampLink, LampState, MqttSession, SystemColor, TimerMinutes,
};
use std::time::Duration;

/// The fixed control tick interval.
const TICK: Duration = Duration::from_secs(2);

/// How long each tick may spend driving connection I/O.
const POLL_BUDGET: Duration = Duration::from_millis(100);

fn main() -> Result<(), neolamp_core::LampError> {
    // Initialize logging (optional)
    env_logger::init();

    let mut session = MqttSession::new(BrokerConfig::from_env());
    let mut state = LampState::new();

    state.set_all_leds(SystemColor::Red.rgb());
    state.set_timer_minutes(TimerMinutes::new(45)?);

    loop {
        session.ensure_connected();
        session.poll(POLL_BUDGET);

        if let Some(text) = session.last_telemetry() {
            state.record_telemetry(text.to_string());
            println!("lamp says: {text}");
        }

        if session.is_connected() {
            session.publish_leds(state.leds(), state.brightness())?;
            if start_timer(&mut session, &state)? {
                println!(
                    "timer started for {} minutes",
                    state.timer_minutes().get()
                );
                break;
            }
        } else {
            println!("waiting for broker...");
        }

        std::thread::sleep(TICK);
    }

    Ok(())
}
