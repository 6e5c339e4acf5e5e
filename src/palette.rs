//! The fixed palette of system colors and the timer eligibility rule.

use crate::state::{LedArray, Rgb};

/// Minimum number of palette-colored LEDs required before a timer may start.
pub const ELIGIBLE_MIN: usize = 5;

/// The six system colors the timer sequence understands.
///
/// Each is a pure primary or secondary: one or two channels at 255, the rest
/// at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemColor {
    /// Pure red.
    Red,
    /// Pure green.
    Green,
    /// Pure blue.
    Blue,
    /// Red + green.
    Yellow,
    /// Red + blue.
    Magenta,
    /// Green + blue.
    Cyan,
}

impl SystemColor {
    /// All system colors, in palette order.
    pub const ALL: [SystemColor; 6] = [
        SystemColor::Red,
        SystemColor::Green,
        SystemColor::Blue,
        SystemColor::Yellow,
        SystemColor::Magenta,
        SystemColor::Cyan,
    ];

    /// The exact RGB value the firmware expects for this color.
    pub const fn rgb(self) -> Rgb {
        match self {
            SystemColor::Red => Rgb::new(255, 0, 0),
            SystemColor::Green => Rgb::new(0, 255, 0),
            SystemColor::Blue => Rgb::new(0, 0, 255),
            SystemColor::Yellow => Rgb::new(255, 255, 0),
            SystemColor::Magenta => Rgb::new(255, 0, 255),
            SystemColor::Cyan => Rgb::new(0, 255, 255),
        }
    }

    /// Human-readable name, as shown on the panel.
    pub const fn name(self) -> &'static str {
        match self {
            SystemColor::Red => "Red",
            SystemColor::Green => "Green",
            SystemColor::Blue => "Blue",
            SystemColor::Yellow => "Yellow",
            SystemColor::Magenta => "Magenta",
            SystemColor::Cyan => "Cyan",
        }
    }
}

/// Whether the current strip colors permit starting a timer.
///
/// Counts LEDs whose color exactly matches one of the six system colors; at
/// least [`ELIGIBLE_MIN`] matches are required. Equality is structural, so a
/// freehand color pick that happens to land on a palette value counts too.
pub fn is_timer_eligible(leds: &LedArray) -> bool {
    let matches = leds
        .iter()
        .filter(|led| SystemColor::ALL.iter().any(|color| color.rgb() == **led))
        .count();
    matches >= ELIGIBLE_MIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NUM_LEDS;

    fn strip_with_palette_prefix(count: usize) -> LedArray {
        let mut leds = [Rgb::new(13, 37, 73); NUM_LEDS];
        for (i, slot) in leds.iter_mut().take(count).enumerate() {
            *slot = SystemColor::ALL[i % SystemColor::ALL.len()].rgb();
        }
        leds
    }

    #[test]
    fn test_eligible_with_six_distinct_palette_colors() {
        // Six distinct palette colors plus six arbitrary ones.
        assert!(is_timer_eligible(&strip_with_palette_prefix(6)));
    }

    #[test]
    fn test_boundary_at_five_matches() {
        assert!(is_timer_eligible(&strip_with_palette_prefix(5)));
        assert!(!is_timer_eligible(&strip_with_palette_prefix(4)));
    }

    #[test]
    fn test_dark_strip_is_ineligible() {
        assert!(!is_timer_eligible(&[Rgb::default(); NUM_LEDS]));
    }

    #[test]
    fn test_coincidental_match_counts() {
        // A freehand pick of pure red is indistinguishable from the palette
        // entry; structural equality counts it.
        let mut leds = [Rgb::default(); NUM_LEDS];
        for slot in leds.iter_mut().take(ELIGIBLE_MIN) {
            *slot = Rgb::new(255, 0, 0);
        }
        assert!(is_timer_eligible(&leds));
    }
}
