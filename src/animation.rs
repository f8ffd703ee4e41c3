use crate::colors::{BLACK, Color};
use crate::time::TimeDuration;

/// A single timed indicator animation.
///
/// An animation is a pure description: two endpoint colors, a total duration,
/// what to do once the duration has elapsed, and an optional flash cadence.
/// [`Animation::evaluate`] maps an elapsed time onto the [`Frame`] that should
/// be shown; the [`ColorAnimator`](crate::ColorAnimator) owns the start time and
/// the hardware writes.
///
/// # Type Parameters
/// * `D` - The duration type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation<D: TimeDuration> {
    source: Color,
    dest: Color,
    duration: D,
    remain_on_after_animation: bool,
    num_flashes: u8,
    flash_duration: D,
}

/// What the indicator should do at a given point of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// The duration has elapsed. The animation is over.
    Finished(Landing),
    /// Flash mode: whether the current half-period is an "on" phase.
    Flash { on: bool },
    /// Mid-transition color.
    Blend(Color),
    /// Nothing to write; the color shown when the animation began still holds.
    Hold,
}

/// The final write performed when an animation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Landing {
    /// Fall back to the indicator's default color.
    Default,
    /// Write the destination color exactly, correcting interpolation drift.
    Exact(Color),
    /// Leave the output as it is.
    Keep,
}

impl<D: TimeDuration> Animation<D> {
    /// Shows `color` and keeps it until something else starts.
    pub fn hold(color: Color) -> Self {
        Self::interpolate(color, color, D::ZERO, true)
    }

    /// Shows `color` for `duration`, then reverts to the default color.
    pub fn show_for(color: Color, duration: D) -> Self {
        Self::interpolate(color, color, duration, false)
    }

    /// Blinks `color` `num_flashes` times with on and off phases of `speed` each.
    ///
    /// The total duration is `num_flashes * speed * 2 - speed`: the trailing off
    /// phase is dropped so the animation ends exactly when the last flash does.
    pub fn flash(color: Color, num_flashes: u8, speed: D) -> Self {
        let speed_millis = speed.as_millis();
        let total = (num_flashes as u64)
            .saturating_mul(speed_millis)
            .saturating_mul(2)
            .saturating_sub(speed_millis);

        Self {
            source: color,
            dest: color,
            duration: D::from_millis(total),
            remain_on_after_animation: false,
            num_flashes,
            flash_duration: speed,
        }
    }

    /// Linear transition from `source` to `dest` over `duration`.
    pub fn interpolate(source: Color, dest: Color, duration: D, remain_on: bool) -> Self {
        Self {
            source,
            dest,
            duration,
            remain_on_after_animation: remain_on,
            num_flashes: 0,
            flash_duration: D::ZERO,
        }
    }

    /// Calculates what to show at `elapsed` time since the animation started.
    ///
    /// Once `elapsed` reaches the duration the result is always
    /// [`Frame::Finished`], no matter how late the poll is.
    pub fn evaluate(&self, elapsed: D) -> Frame {
        let duration_millis = self.duration.as_millis();
        let elapsed_millis = elapsed.as_millis();

        if elapsed_millis >= duration_millis {
            return Frame::Finished(self.landing());
        }

        if self.num_flashes > 0 {
            let on = match elapsed_millis.checked_div(self.flash_duration.as_millis()) {
                Some(phase) => phase % 2 == 0,
                None => true,
            };
            return Frame::Flash { on };
        }

        if self.source != self.dest {
            let remaining = (duration_millis - elapsed_millis) as f32;
            let factor = 1.0 - remaining / duration_millis as f32;
            return Frame::Blend(blend(self.source, self.dest, factor));
        }

        Frame::Hold
    }

    fn landing(&self) -> Landing {
        if !self.remain_on_after_animation {
            Landing::Default
        } else if self.source != self.dest {
            Landing::Exact(self.dest)
        } else {
            Landing::Keep
        }
    }

    /// Color written during an "on" flash phase.
    ///
    /// Red and green come from the source color, blue from the destination. The
    /// two are the same for every flash built with [`Animation::flash`].
    pub fn flash_on_color(&self) -> Color {
        Color::from_rgb(self.source.red(), self.source.green(), self.dest.blue())
    }

    /// Color written during an "off" flash phase.
    pub fn flash_off_color(&self) -> Color {
        BLACK
    }

    /// Time left at `elapsed`, or `None` once the animation is over.
    pub fn remaining(&self, elapsed: D) -> Option<D> {
        let remaining = self.duration.saturating_sub(elapsed);
        if remaining.as_millis() == 0 { None } else { Some(remaining) }
    }

    /// Returns the starting color.
    pub fn source(&self) -> Color {
        self.source
    }

    /// Returns the final color.
    pub fn dest(&self) -> Color {
        self.dest
    }

    /// Returns the total animation duration.
    pub fn duration(&self) -> D {
        self.duration
    }

    /// Returns true if the final color stays on after the animation ends.
    pub fn remain_on_after_animation(&self) -> bool {
        self.remain_on_after_animation
    }

    /// Returns the number of flashes, zero for non-flash animations.
    pub fn num_flashes(&self) -> u8 {
        self.num_flashes
    }

    /// Returns the length of each flash phase.
    pub fn flash_duration(&self) -> D {
        self.flash_duration
    }

    /// Returns true for flash animations.
    pub fn is_flash(&self) -> bool {
        self.num_flashes > 0
    }
}

/// Per-channel `source + (dest - source) * factor`, truncated.
fn blend(source: Color, dest: Color, factor: f32) -> Color {
    Color::from_rgb(
        lerp_channel(source.red(), dest.red(), factor),
        lerp_channel(source.green(), dest.green(), factor),
        lerp_channel(source.blue(), dest.blue(), factor),
    )
}

#[inline]
fn lerp_channel(source: u8, dest: u8, factor: f32) -> u8 {
    let source = source as f32;
    (source + (dest as f32 - source) * factor) as u8
}
