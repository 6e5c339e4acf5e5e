//! Device session: the MQTT link between the control panel and the lamp.

use crate::error::LampError;
use crate::frame;
use crate::state::{LampState, LedArray, TimerMinutes};

use log::{debug, info, warn};
use rumqttc::{Client, Connection, Event, MqttOptions, Packet, QoS, Transport};
use std::time::{Duration, Instant};

/// Broker connection settings.
///
/// The values are opaque to the core; they are handed to the MQTT client
/// as-is. Defaults match the lamp's stock deployment: TLS on port 8883,
/// commands on `lamp/control`, telemetry on `lamp/data`.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Broker hostname.
    pub host: String,
    /// Broker TLS port.
    pub port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Username credential.
    pub username: String,
    /// Password credential.
    pub password: String,
    /// Topic command frames are published to.
    pub command_topic: String,
    /// Topic the lamp publishes telemetry on.
    pub telemetry_topic: String,
    /// MQTT keep-alive interval.
    pub keep_alive: Duration,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8883,
            client_id: "neolamp-panel".to_string(),
            username: String::new(),
            password: String::new(),
            command_topic: "lamp/control".to_string(),
            telemetry_topic: "lamp/data".to_string(),
            keep_alive: Duration::from_secs(60),
        }
    }
}

impl BrokerConfig {
    /// Load settings from `NEOLAMP_MQTT_*` environment variables, falling
    /// back to the defaults for anything unset: `HOST`, `PORT`, `CLIENT_ID`,
    /// `USERNAME`, `PASSWORD`, `COMMAND_TOPIC`, `TELEMETRY_TOPIC`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, fallback: String| -> String {
            std::env::var(name).unwrap_or(fallback)
        };
        let port = std::env::var("NEOLAMP_MQTT_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.port);
        Self {
            host: var("NEOLAMP_MQTT_HOST", defaults.host),
            port,
            client_id: var("NEOLAMP_MQTT_CLIENT_ID", defaults.client_id),
            username: var("NEOLAMP_MQTT_USERNAME", defaults.username),
            password: var("NEOLAMP_MQTT_PASSWORD", defaults.password),
            command_topic: var("NEOLAMP_MQTT_COMMAND_TOPIC", defaults.command_topic),
            telemetry_topic: var("NEOLAMP_MQTT_TELEMETRY_TOPIC", defaults.telemetry_topic),
            keep_alive: defaults.keep_alive,
        }
    }
}

/// Trait for lamp command links.
///
/// This allows for mock implementations in tests.
pub trait LampLink {
    /// Make sure a connection attempt is underway and the telemetry
    /// subscription has been requested. Idempotent; failures are logged and
    /// retried on the next tick, never raised.
    fn ensure_connected(&mut self);

    /// Drive connection I/O for at most `budget`, picking up inbound
    /// telemetry and connection state changes. Must be called once per
    /// control tick; returns within the budget even when the broker is slow
    /// or unreachable.
    fn poll(&mut self, budget: Duration);

    /// Whether the broker handshake has completed.
    fn is_connected(&self) -> bool;

    /// Publish the current strip colors and global brightness.
    fn publish_leds(&mut self, leds: &LedArray, brightness: u8) -> Result<(), LampError>;

    /// Publish the full-shutdown command.
    fn publish_off(&mut self) -> Result<(), LampError>;

    /// Publish a timer command.
    fn publish_timer(&mut self, minutes: TimerMinutes) -> Result<(), LampError>;

    /// The last telemetry message received, if any.
    fn last_telemetry(&self) -> Option<&str>;
}

/// The real device session, backed by rumqttc's synchronous client.
///
/// All I/O runs on the caller's thread inside [`poll`](LampLink::poll), so
/// the session fits a single-threaded tick loop: no background tasks, no
/// locking. Publishes are queued on the client and flushed as the connection
/// is driven; delivery is at-most-once (QoS 0) and never awaited.
pub struct MqttSession {
    client: Client,
    connection: Connection,
    config: BrokerConfig,
    connected: bool,
    subscribe_requested: bool,
    telemetry: Option<String>,
}

impl MqttSession {
    /// Create a session from broker settings.
    ///
    /// No I/O happens here; the TLS handshake is driven lazily by
    /// [`poll`](LampLink::poll) and retried automatically after transport
    /// errors.
    pub fn new(config: BrokerConfig) -> Self {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.host.clone(),
            config.port,
        );
        options.set_keep_alive(config.keep_alive);
        options.set_credentials(config.username.clone(), config.password.clone());
        options.set_transport(Transport::tls_with_default_config());

        let (client, connection) = Client::new(options, 10);
        Self {
            client,
            connection,
            config,
            connected: false,
            subscribe_requested: false,
            telemetry: None,
        }
    }

    /// The settings this session was created with.
    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    fn publish_frame(&mut self, payload: Vec<u8>) -> Result<(), LampError> {
        self.client.publish(
            self.config.command_topic.as_str(),
            QoS::AtMostOnce,
            false,
            payload,
        )?;
        Ok(())
    }

    fn handle_incoming(&mut self, packet: Packet) {
        match packet {
            Packet::ConnAck(_) => {
                info!(
                    "mqtt connected to {}:{}",
                    self.config.host, self.config.port
                );
                self.connected = true;
                // Re-subscribe on every (re)connect; the broker may have
                // dropped the session.
                if let Err(err) = self
                    .client
                    .subscribe(self.config.telemetry_topic.as_str(), QoS::AtMostOnce)
                {
                    warn!("telemetry re-subscribe failed: {err}");
                }
            }
            Packet::Publish(publish) => {
                if publish.topic != self.config.telemetry_topic {
                    debug!("ignoring message on unexpected topic {}", publish.topic);
                    return;
                }
                match String::from_utf8(publish.payload.to_vec()) {
                    Ok(text) => {
                        debug!("telemetry: {text}");
                        self.telemetry = Some(text);
                    }
                    // Keep the previous value; a bad payload never clobbers
                    // the stored message.
                    Err(err) => warn!("undecodable telemetry payload: {err}"),
                }
            }
            Packet::Disconnect => {
                warn!("mqtt broker sent disconnect");
                self.connected = false;
            }
            _ => {}
        }
    }
}

impl LampLink for MqttSession {
    fn ensure_connected(&mut self) {
        if self.connected {
            return;
        }
        if !self.subscribe_requested {
            match self
                .client
                .subscribe(self.config.telemetry_topic.as_str(), QoS::AtMostOnce)
            {
                Ok(()) => self.subscribe_requested = true,
                Err(err) => warn!("telemetry subscribe request failed: {err}"),
            }
        }
        debug!(
            "mqtt not connected; handshake with {}:{} is driven on poll",
            self.config.host, self.config.port
        );
    }

    fn poll(&mut self, budget: Duration) {
        let deadline = Instant::now() + budget;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.connection.recv_timeout(remaining) {
                Ok(Ok(Event::Incoming(packet))) => self.handle_incoming(packet),
                Ok(Ok(Event::Outgoing(_))) => {}
                Ok(Err(err)) => {
                    if self.connected {
                        warn!("mqtt connection lost: {err}");
                    } else {
                        debug!("mqtt connect attempt failed: {err}");
                    }
                    self.connected = false;
                    // Stop for this tick instead of hot-looping on a dead
                    // transport; the next poll retries the handshake.
                    break;
                }
                // Budget exhausted.
                Err(_) => break,
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish_leds(&mut self, leds: &LedArray, brightness: u8) -> Result<(), LampError> {
        self.publish_frame(frame::encode_led_frame(leds, brightness).to_vec())
    }

    fn publish_off(&mut self) -> Result<(), LampError> {
        self.publish_frame(frame::encode_off_frame().to_vec())
    }

    fn publish_timer(&mut self, minutes: TimerMinutes) -> Result<(), LampError> {
        self.publish_frame(frame::encode_timer_frame(minutes).to_vec())
    }

    fn last_telemetry(&self) -> Option<&str> {
        self.telemetry.as_deref()
    }
}

/// Run the timer start sequence against the current state: everything off,
/// then the chosen colors, then the timer command, in that order.
///
/// Returns `Ok(false)` without publishing anything when fewer than the
/// required number of LEDs hold system colors; ineligibility is a gated
/// state, not an error.
pub fn start_timer(link: &mut dyn LampLink, state: &LampState) -> Result<bool, LampError> {
    if !state.timer_eligible() {
        debug!("timer start refused: strip colors not eligible");
        return Ok(false);
    }
    link.publish_off()?;
    link.publish_leds(state.leds(), state.brightness())?;
    link.publish_timer(state.timer_minutes())?;
    info!("timer started for {} minutes", state.timer_minutes().get());
    Ok(true)
}
