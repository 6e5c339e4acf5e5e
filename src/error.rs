//! Error types for the lamp control core.

/// Errors that can occur when driving the lamp control core.
#[derive(Debug, thiserror::Error)]
pub enum LampError {
    /// A timer duration was outside the valid range.
    #[error("Invalid timer duration {value} (expected 1-180 minutes)")]
    InvalidTimerMinutes {
        /// The rejected value.
        value: u16,
    },

    /// An LED index was outside the strip.
    #[error("Invalid LED index {index} (strip has {} LEDs)", crate::state::NUM_LEDS)]
    InvalidLedIndex {
        /// The rejected index.
        index: usize,
    },

    /// The MQTT client rejected a request (request queue full or the
    /// connection handle was dropped).
    #[error("MQTT request failed: {0}")]
    Client(#[from] rumqttc::ClientError),
}
