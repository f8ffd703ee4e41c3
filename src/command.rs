//! Command-based control for the indicator and sound engines.

use crate::colors::Color;
use crate::time::TimeDuration;

/// Actions for starting indicator animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimatorAction<D: TimeDuration> {
    /// Change the fallback color and show it.
    SetDefault(Color),
    /// Show a color until something else starts.
    SetColor(Color),
    /// Show a color for a duration, then fall back to the default.
    SetColorFor(Color, D),
    /// Blink a color.
    Flash {
        color: Color,
        num_flashes: u8,
        speed: D,
    },
    /// Linear transition between two colors.
    InterpolateTo {
        source: Color,
        dest: Color,
        duration: D,
        remain_on: bool,
    },
    /// Black, then the default color on the next poll.
    Off,
}

/// Game events the feedback layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackEvent {
    /// The fire button was accepted.
    Fire,
    /// Hit by another player.
    Hit,
    /// Hit with no health left.
    Died,
}
