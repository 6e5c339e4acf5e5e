//! Lamp data model and the in-memory state store.

use crate::error::LampError;
use crate::modes::{Mode, TimerAdjustScope};
use crate::palette;

/// Number of addressable LEDs on the lamp.
pub const NUM_LEDS: usize = 12;

/// One LED's color. Channels are full-range 8-bit, so every value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The full strip, ordered by physical LED position. Index identity matters:
/// position `i` here is position `i` on the lamp.
pub type LedArray = [Rgb; NUM_LEDS];

/// A validated LED position in `[0, NUM_LEDS)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedIndex(usize);

impl LedIndex {
    /// Validate a strip position.
    ///
    /// # Errors
    /// Returns [`LampError::InvalidLedIndex`] if `index >= NUM_LEDS`.
    pub fn new(index: usize) -> Result<Self, LampError> {
        if index >= NUM_LEDS {
            return Err(LampError::InvalidLedIndex { index });
        }
        Ok(Self(index))
    }

    /// The zero-based position.
    pub fn get(self) -> usize {
        self.0
    }
}

/// A validated timer duration in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerMinutes(u16);

impl TimerMinutes {
    /// Shortest accepted duration.
    pub const MIN: u16 = 1;
    /// Longest accepted duration.
    pub const MAX: u16 = 180;

    /// Validate a duration.
    ///
    /// # Errors
    /// Returns [`LampError::InvalidTimerMinutes`] if the value is outside
    /// `MIN..=MAX`.
    pub fn new(value: u16) -> Result<Self, LampError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(LampError::InvalidTimerMinutes { value });
        }
        Ok(Self(value))
    }

    /// The duration in minutes.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl Default for TimerMinutes {
    /// 10 minutes, the duration the panel seeds before the user touches it.
    fn default() -> Self {
        Self(10)
    }
}

/// The authoritative in-memory record of the control session.
///
/// Owns per-LED colors, global brightness, panel mode, timer settings and the
/// last telemetry message. Constructed once at session start and passed by
/// reference; there are no process-wide globals.
///
/// Every setter reports whether the stored value actually changed, so the
/// control surface can skip publishing on unrelated re-renders.
#[derive(Debug, Clone, Default)]
pub struct LampState {
    leds: LedArray,
    brightness: u8,
    mode: Mode,
    adjust_scope: TimerAdjustScope,
    timer_minutes: TimerMinutes,
    telemetry: Option<String>,
}

impl LampState {
    /// Create the session-start state: all LEDs dark, full brightness.
    pub fn new() -> Self {
        Self {
            brightness: 255,
            ..Self::default()
        }
    }

    /// The current strip colors.
    pub fn leds(&self) -> &LedArray {
        &self.leds
    }

    /// The color at one strip position.
    pub fn led(&self, index: LedIndex) -> Rgb {
        self.leds[index.get()]
    }

    /// The global brightness.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// The active panel mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// How timer-mode color selection is applied.
    pub fn adjust_scope(&self) -> TimerAdjustScope {
        self.adjust_scope
    }

    /// The stored timer duration.
    pub fn timer_minutes(&self) -> TimerMinutes {
        self.timer_minutes
    }

    /// The last telemetry message recorded, if any.
    pub fn telemetry(&self) -> Option<&str> {
        self.telemetry.as_deref()
    }

    /// Set one LED's color. Returns whether the stored value changed.
    pub fn set_led(&mut self, index: LedIndex, rgb: Rgb) -> bool {
        let slot = &mut self.leds[index.get()];
        if *slot == rgb {
            return false;
        }
        *slot = rgb;
        true
    }

    /// Set every LED to one color. Returns true if at least one position
    /// changed.
    pub fn set_all_leds(&mut self, rgb: Rgb) -> bool {
        let changed = self.leds.iter().any(|led| *led != rgb);
        self.leds = [rgb; NUM_LEDS];
        changed
    }

    /// Set the global brightness. Returns whether the stored value changed.
    pub fn set_brightness(&mut self, value: u8) -> bool {
        if self.brightness == value {
            return false;
        }
        self.brightness = value;
        true
    }

    /// Switch the panel mode. Returns whether the stored value changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Switch the timer-mode adjustment scope. Returns whether the stored
    /// value changed.
    pub fn set_adjust_scope(&mut self, scope: TimerAdjustScope) -> bool {
        if self.adjust_scope == scope {
            return false;
        }
        self.adjust_scope = scope;
        true
    }

    /// Store a timer duration. Returns whether the stored value changed.
    ///
    /// Eligibility is checked at the point of action (starting the timer),
    /// not here, so the duration can be adjusted while the strip colors are
    /// still ineligible.
    pub fn set_timer_minutes(&mut self, minutes: TimerMinutes) -> bool {
        if self.timer_minutes == minutes {
            return false;
        }
        self.timer_minutes = minutes;
        true
    }

    /// Overwrite the stored telemetry with a freshly received message.
    pub fn record_telemetry(&mut self, text: String) {
        self.telemetry = Some(text);
    }

    /// Whether the current strip colors permit starting a timer.
    pub fn timer_eligible(&self) -> bool {
        palette::is_timer_eligible(&self.leds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::SystemColor;

    #[test]
    fn test_session_start_state() {
        let state = LampState::new();
        assert_eq!(state.leds(), &[Rgb::default(); NUM_LEDS]);
        assert_eq!(state.brightness(), 255);
        assert_eq!(state.mode(), Mode::Lamp);
        assert_eq!(state.adjust_scope(), TimerAdjustScope::All);
        assert_eq!(state.timer_minutes().get(), 10);
        assert_eq!(state.telemetry(), None);
    }

    #[test]
    fn test_set_led_change_detection() {
        let mut state = LampState::new();
        let index = LedIndex::new(3).unwrap();

        assert!(state.set_led(index, Rgb::new(10, 20, 30)));
        assert_eq!(state.led(index), Rgb::new(10, 20, 30));

        // Re-applying the current color is a no-op.
        assert!(!state.set_led(index, Rgb::new(10, 20, 30)));

        assert!(state.set_led(index, Rgb::new(10, 20, 31)));
        assert_eq!(state.led(index), Rgb::new(10, 20, 31));
    }

    #[test]
    fn test_set_all_leds_aggregated_change_flag() {
        let mut state = LampState::new();
        let red = SystemColor::Red.rgb();

        assert!(state.set_all_leds(red));
        assert!(state.leds().iter().all(|led| *led == red));

        // Nothing changes the second time around.
        assert!(!state.set_all_leds(red));

        // One deviating position is enough to report a change.
        state.set_led(LedIndex::new(7).unwrap(), Rgb::new(1, 2, 3));
        assert!(state.set_all_leds(red));
    }

    #[test]
    fn test_set_brightness_change_detection() {
        let mut state = LampState::new();
        assert!(!state.set_brightness(255));
        assert!(state.set_brightness(128));
        assert_eq!(state.brightness(), 128);
    }

    #[test]
    fn test_mode_and_scope_change_detection() {
        let mut state = LampState::new();
        assert!(state.set_mode(Mode::Timer));
        assert!(!state.set_mode(Mode::Timer));
        assert!(state.set_adjust_scope(TimerAdjustScope::Each));
        assert!(!state.set_adjust_scope(TimerAdjustScope::Each));
    }

    #[test]
    fn test_timer_minutes_stored_while_ineligible() {
        let mut state = LampState::new();
        assert!(!state.timer_eligible());

        // Storage is not gated on eligibility.
        assert!(state.set_timer_minutes(TimerMinutes::new(45).unwrap()));
        assert!(!state.set_timer_minutes(TimerMinutes::new(45).unwrap()));
        assert_eq!(state.timer_minutes().get(), 45);
    }

    #[test]
    fn test_record_telemetry_overwrites() {
        let mut state = LampState::new();
        state.record_telemetry("first".to_string());
        state.record_telemetry("second".to_string());
        assert_eq!(state.telemetry(), Some("second"));
    }

    #[test]
    fn test_led_index_validation() {
        assert!(LedIndex::new(0).is_ok());
        assert!(LedIndex::new(11).is_ok());
        assert!(matches!(
            LedIndex::new(12),
            Err(LampError::InvalidLedIndex { index: 12 })
        ));
    }

    #[test]
    fn test_timer_minutes_validation() {
        assert!(TimerMinutes::new(1).is_ok());
        assert!(TimerMinutes::new(180).is_ok());
        assert!(matches!(
            TimerMinutes::new(0),
            Err(LampError::InvalidTimerMinutes { value: 0 })
        ));
        assert!(matches!(
            TimerMinutes::new(181),
            Err(LampError::InvalidTimerMinutes { value: 181 })
        ));
    }
}
