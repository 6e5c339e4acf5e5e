//! Mock session for testing.

use crate::error::LampError;
use crate::frame;
use crate::session::LampLink;
use crate::state::{LedArray, TimerMinutes};

use std::collections::VecDeque;
use std::time::Duration;

/// A mock lamp link for testing without a broker.
///
/// Frames that would have been published are recorded in order, and telemetry
/// can be scripted to arrive on the next [`poll`](LampLink::poll).
///
/// # Example
///
/// ```
/// use neolamp_core::{LampLink, MockSession};
/// use std::time::Duration;
///
/// let mut mock = MockSession::new();
/// mock.ensure_connected();
/// mock.push_telemetry("brightness=255");
/// mock.poll(Duration::from_millis(100));
/// assert_eq!(mock.last_telemetry(), Some("brightness=255"));
/// ```
#[derive(Debug)]
pub struct MockSession {
    connected: bool,
    reachable: bool,
    published: Vec<Vec<u8>>,
    inbound: VecDeque<String>,
    telemetry: Option<String>,
}

impl MockSession {
    /// Create a disconnected mock with a reachable broker.
    pub fn new() -> Self {
        Self {
            connected: false,
            reachable: true,
            published: Vec::new(),
            inbound: VecDeque::new(),
            telemetry: None,
        }
    }

    /// Control whether connection attempts succeed. Turning reachability off
    /// also drops an established connection.
    pub fn set_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
        if !reachable {
            self.connected = false;
        }
    }

    /// Queue a telemetry message for delivery on the next poll.
    pub fn push_telemetry(&mut self, text: impl Into<String>) {
        self.inbound.push_back(text.into());
    }

    /// Frames published so far, oldest first.
    pub fn published(&self) -> &[Vec<u8>] {
        &self.published
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LampLink for MockSession {
    fn ensure_connected(&mut self) {
        if self.reachable {
            self.connected = true;
        }
    }

    fn poll(&mut self, _budget: Duration) {
        if !self.connected {
            return;
        }
        // Later messages overwrite earlier ones, as on the real link.
        while let Some(text) = self.inbound.pop_front() {
            self.telemetry = Some(text);
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish_leds(&mut self, leds: &LedArray, brightness: u8) -> Result<(), LampError> {
        self.published
            .push(frame::encode_led_frame(leds, brightness).to_vec());
        Ok(())
    }

    fn publish_off(&mut self) -> Result<(), LampError> {
        self.published.push(frame::encode_off_frame().to_vec());
        Ok(())
    }

    fn publish_timer(&mut self, minutes: TimerMinutes) -> Result<(), LampError> {
        self.published
            .push(frame::encode_timer_frame(minutes).to_vec());
        Ok(())
    }

    fn last_telemetry(&self) -> Option<&str> {
        self.telemetry.as_deref()
    }
}
