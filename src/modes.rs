//! Control panel mode definitions.

/// Which set of panel affordances is active.
///
/// The mode gates what the control surface shows; it does not restrict which
/// core operations may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Free per-LED color adjustment.
    #[default]
    Lamp,
    /// Palette-restricted colors with a countdown timer.
    Timer,
}

/// How a color selection is applied while in [`Mode::Timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerAdjustScope {
    /// One color for the whole strip.
    #[default]
    All,
    /// A separate color per LED.
    Each,
}
