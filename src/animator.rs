//! Non-blocking RGB indicator animations.
//!
//! Provides [`ColorAnimator`] which drives a single RGB LED through color
//! transitions and flashes, advanced by calling [`ColorAnimator::process`] once
//! per main-loop iteration. Also defines the [`RgbLed`] trait for hardware
//! abstraction.

use crate::animation::{Animation, Frame, Landing};
use crate::colors::{BLACK, Color};
use crate::command::AnimatorAction;
use crate::time::{Millis, TimeDuration, TimeInstant, TimeSource};
use palette::Srgb;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (usually three PWM channels) to allow
/// the animator to control it.
pub trait RgbLed {
    /// Writes one 0-255 value to each channel.
    ///
    /// Handle any hardware errors internally - this method cannot fail.
    fn set_color(&mut self, color: Srgb<u8>);
}

/// What the animator is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimatorState {
    /// No animation. The LED shows whatever was last written.
    Idle,
    /// A fixed color is shown, possibly until a timeout.
    Holding,
    /// Blending between two colors.
    Transitioning,
    /// Blinking.
    Flashing,
}

#[derive(Clone, Copy)]
struct ActiveAnimation<I: TimeInstant> {
    animation: Animation<I::Duration>,
    started_at: I,
}

/// Controls a single RGB LED through timed color animations.
///
/// At most one animation runs at a time; every entry point replaces whatever
/// was running. Nothing blocks: the animator only acts when polled, and each
/// poll derives the output from the time elapsed since the animation started,
/// so a late poll catches up instead of drifting.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `L` - LED implementation type
/// * `T` - Time source implementation type
/// * `DAMPEN` - Every channel is divided by this before reaching the LED
pub struct ColorAnimator<'t, I: TimeInstant, L: RgbLed, T: TimeSource<I>, const DAMPEN: u8 = 1> {
    led: L,
    time_source: &'t T,
    active: Option<ActiveAnimation<I>>,
    default_color: Color,
    flash_on: bool,
    current_color: Color,
}

/// Animator driven by a wrapping millisecond counter.
pub type MillisAnimator<'t, L, T> = ColorAnimator<'t, Millis, L, T>;

impl<'t, I: TimeInstant, L: RgbLed, T: TimeSource<I>, const DAMPEN: u8>
    ColorAnimator<'t, I, L, T, DAMPEN>
{
    /// Creates an idle animator with the LED turned off.
    pub fn new(led: L, time_source: &'t T) -> Self {
        const { assert!(DAMPEN > 0, "DAMPEN must be non-zero") };

        let mut animator = Self {
            led,
            time_source,
            active: None,
            default_color: BLACK,
            flash_on: false,
            current_color: BLACK,
        };
        animator.write(BLACK);
        animator
    }

    /// Handles an animator action by dispatching to the appropriate method.
    pub fn handle_action(&mut self, action: AnimatorAction<I::Duration>) {
        match action {
            AnimatorAction::SetDefault(color) => self.set_default_color(color),
            AnimatorAction::SetColor(color) => self.set_color(color),
            AnimatorAction::SetColorFor(color, duration) => self.set_color_for(color, duration),
            AnimatorAction::Flash {
                color,
                num_flashes,
                speed,
            } => self.flash(color, num_flashes, speed),
            AnimatorAction::InterpolateTo {
                source,
                dest,
                duration,
                remain_on,
            } => self.interpolate_to(source, dest, duration, remain_on),
            AnimatorAction::Off => self.off(),
        }
    }

    /// Sets the color shown whenever an animation ends without remaining on.
    ///
    /// Written immediately. Does not touch a running animation.
    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
        self.write(color);
    }

    /// Shows `color` until another animation starts.
    pub fn set_color(&mut self, color: Color) {
        self.begin(Animation::hold(color));
        self.write(color);
    }

    /// Shows `color` for `duration`, then reverts to the default color.
    pub fn set_color_for(&mut self, color: Color, duration: I::Duration) {
        self.begin(Animation::show_for(color, duration));
        self.write(color);
    }

    /// Blinks `color` `num_flashes` times, each phase lasting `speed`.
    ///
    /// Nothing is written until the next [`process`](Self::process).
    pub fn flash(&mut self, color: Color, num_flashes: u8, speed: I::Duration) {
        self.begin(Animation::flash(color, num_flashes, speed));
    }

    /// Shows black, then lets the next poll land on the default color.
    pub fn off(&mut self) {
        self.set_color_for(BLACK, I::Duration::ZERO);
    }

    /// Blends linearly from `source` to `dest` over `duration`.
    ///
    /// With `remain_on` the LED keeps `dest` afterwards, otherwise it reverts to
    /// the default color. Nothing is written until the next
    /// [`process`](Self::process).
    pub fn interpolate_to(
        &mut self,
        source: Color,
        dest: Color,
        duration: I::Duration,
        remain_on: bool,
    ) {
        self.begin(Animation::interpolate(source, dest, duration, remain_on));
    }

    /// Advances the running animation. Call once per loop iteration.
    pub fn process(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        let elapsed = self.time_source.now().duration_since(active.started_at);
        match active.animation.evaluate(elapsed) {
            Frame::Finished(landing) => {
                match landing {
                    Landing::Default => self.write(self.default_color),
                    Landing::Exact(color) => self.write(color),
                    Landing::Keep => {}
                }
                self.active = None;
                self.flash_on = false;
                debug!("animation finished after {=u64} ms", elapsed.as_millis());
            }
            Frame::Flash { on } => {
                if on != self.flash_on {
                    self.flash_on = on;
                    let color = if on {
                        active.animation.flash_on_color()
                    } else {
                        active.animation.flash_off_color()
                    };
                    self.write(color);
                }
            }
            Frame::Blend(color) => self.write(color),
            Frame::Hold => {}
        }
    }

    fn begin(&mut self, animation: Animation<I::Duration>) {
        trace!(
            "animation start: {} -> {} over {=u64} ms",
            animation.source(),
            animation.dest(),
            animation.duration().as_millis()
        );
        self.active = Some(ActiveAnimation {
            animation,
            started_at: self.time_source.now(),
        });
        self.flash_on = false;
    }

    fn write(&mut self, color: Color) {
        self.current_color = color;
        self.led.set_color(Srgb::new(
            color.red() / DAMPEN,
            color.green() / DAMPEN,
            color.blue() / DAMPEN,
        ));
    }

    /// Returns the current state of the animator.
    pub fn state(&self) -> AnimatorState {
        match &self.active {
            None => AnimatorState::Idle,
            Some(active) if active.animation.is_flash() => AnimatorState::Flashing,
            Some(active) if active.animation.source() != active.animation.dest() => {
                AnimatorState::Transitioning
            }
            Some(_) => AnimatorState::Holding,
        }
    }

    /// Returns true while an animation has not yet reached its end.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the last color written, before dampening.
    pub fn current_color(&self) -> Color {
        self.current_color
    }

    /// Returns the color shown when an animation ends without remaining on.
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Returns the running animation, if any.
    pub fn animation(&self) -> Option<&Animation<I::Duration>> {
        self.active.as_ref().map(|active| &active.animation)
    }

    /// Time left on the running animation.
    pub fn remaining_time(&self) -> Option<I::Duration> {
        let active = self.active.as_ref()?;
        let elapsed = self.time_source.now().duration_since(active.started_at);
        active.animation.remaining(elapsed)
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Consumes the animator, returning the LED.
    pub fn release(self) -> L {
        self.led
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{GREEN, RED, WHITE};
    use crate::time::MillisDuration;
    use core::cell::Cell;

    struct MockLed {
        last: Srgb<u8>,
        writes: usize,
    }

    impl MockLed {
        fn new() -> Self {
            Self {
                last: Srgb::new(0, 0, 0),
                writes: 0,
            }
        }
    }

    impl RgbLed for MockLed {
        fn set_color(&mut self, color: Srgb<u8>) {
            self.last = color;
            self.writes += 1;
        }
    }

    struct MockClock {
        now: Cell<Millis>,
    }

    impl MockClock {
        fn at(millis: u32) -> Self {
            Self {
                now: Cell::new(Millis(millis)),
            }
        }

        fn advance(&self, millis: u32) {
            let now = self.now.get();
            self.now.set(Millis(now.0.wrapping_add(millis)));
        }
    }

    impl TimeSource<Millis> for MockClock {
        fn now(&self) -> Millis {
            self.now.get()
        }
    }

    #[test]
    fn new_writes_off() {
        let clock = MockClock::at(0);
        let animator = MillisAnimator::new(MockLed::new(), &clock);
        assert_eq!(animator.current_color(), BLACK);
        assert_eq!(animator.state(), AnimatorState::Idle);

        let led = animator.release();
        assert_eq!(led.writes, 1);
        assert_eq!(led.last, Srgb::new(0, 0, 0));
    }

    #[test]
    fn dampen_divides_every_channel() {
        let clock = MockClock::at(0);
        let mut animator: ColorAnimator<'_, Millis, MockLed, MockClock, 4> =
            ColorAnimator::new(MockLed::new(), &clock);

        animator.set_color(Color::new(0xFF8010));
        assert_eq!(animator.current_color(), Color::new(0xFF8010));

        let led = animator.release();
        assert_eq!(led.last, Srgb::new(63, 32, 4));
    }

    #[test]
    fn state_tracks_animation_kind() {
        let clock = MockClock::at(100);
        let mut animator = MillisAnimator::new(MockLed::new(), &clock);

        animator.set_color_for(RED, MillisDuration(50));
        assert_eq!(animator.state(), AnimatorState::Holding);

        animator.flash(WHITE, 2, MillisDuration(50));
        assert_eq!(animator.state(), AnimatorState::Flashing);

        animator.interpolate_to(RED, GREEN, MillisDuration(50), true);
        assert_eq!(animator.state(), AnimatorState::Transitioning);

        clock.advance(50);
        animator.process();
        assert_eq!(animator.state(), AnimatorState::Idle);
        assert_eq!(animator.current_color(), GREEN);
    }

    #[test]
    fn handle_action_dispatches_entry_points() {
        let clock = MockClock::at(10);
        let mut animator = MillisAnimator::new(MockLed::new(), &clock);

        animator.handle_action(AnimatorAction::SetDefault(GREEN));
        assert_eq!(animator.default_color(), GREEN);

        animator.handle_action(AnimatorAction::SetColor(RED));
        assert_eq!(animator.current_color(), RED);

        animator.handle_action(AnimatorAction::Flash {
            color: WHITE,
            num_flashes: 1,
            speed: MillisDuration(200),
        });
        animator.process();
        assert_eq!(animator.current_color(), WHITE);

        animator.handle_action(AnimatorAction::Off);
        assert_eq!(animator.current_color(), BLACK);
        animator.process();
        assert_eq!(animator.current_color(), GREEN);
    }

    #[test]
    fn remaining_time_counts_down() {
        let clock = MockClock::at(0);
        let mut animator = MillisAnimator::new(MockLed::new(), &clock);
        assert_eq!(animator.remaining_time(), None);

        animator.set_color_for(RED, MillisDuration(300));
        clock.advance(120);
        assert_eq!(animator.remaining_time(), Some(MillisDuration(180)));
    }
}
