//! Player feedback: one status LED and one speaker reacting to game events.

use crate::animator::{ColorAnimator, RgbLed};
use crate::colors::Color;
use crate::command::FeedbackEvent;
use crate::player::SoundPlayer;
use crate::presets;
use crate::sound::{RandomSource, Sound, ToneOutput};
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// How the device looks and sounds for each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedbackProfile<D: TimeDuration> {
    /// Shown whenever no animation holds the LED (e.g. the team color).
    pub default_color: Color,
    pub fire_color: Color,
    pub hit_color: Color,
    /// Flash phase length for fire and hit flashes.
    pub flash_speed: D,
    pub fire_sound: Sound<D>,
    pub hit_sound: Sound<D>,
    pub die_sound: Sound<D>,
}

impl<D: TimeDuration> Default for FeedbackProfile<D> {
    fn default() -> Self {
        Self {
            default_color: presets::DEFAULT_COLOR,
            fire_color: presets::FIRE_FLASH_COLOR,
            hit_color: presets::HIT_FLASH_COLOR,
            flash_speed: presets::flash_fast(),
            fire_sound: presets::fire_sound(),
            hit_sound: presets::hit_sound(),
            die_sound: presets::die_sound(),
        }
    }
}

/// The device's feedback outputs, driven together.
///
/// Owns the status LED animator and the sound player, so the "current sound"
/// slot lives here rather than in a global. Call [`trigger`](Self::trigger)
/// when something happens and [`process`](Self::process) every loop
/// iteration.
pub struct Feedback<'t, I, L, T, O, R, const DAMPEN: u8 = 1>
where
    I: TimeInstant,
    L: RgbLed,
    T: TimeSource<I>,
    O: ToneOutput<I::Duration>,
    R: RandomSource,
{
    animator: ColorAnimator<'t, I, L, T, DAMPEN>,
    player: SoundPlayer<'t, I, T, O, R>,
    profile: FeedbackProfile<I::Duration>,
}

impl<'t, I, L, T, O, R, const DAMPEN: u8> Feedback<'t, I, L, T, O, R, DAMPEN>
where
    I: TimeInstant,
    L: RgbLed,
    T: TimeSource<I>,
    O: ToneOutput<I::Duration>,
    R: RandomSource,
{
    /// Wraps the outputs and shows the profile's default color.
    pub fn new(
        mut animator: ColorAnimator<'t, I, L, T, DAMPEN>,
        player: SoundPlayer<'t, I, T, O, R>,
        profile: FeedbackProfile<I::Duration>,
    ) -> Self {
        animator.set_default_color(profile.default_color);
        Self {
            animator,
            player,
            profile,
        }
    }

    /// Starts the flash and sound for `event`, replacing any in progress.
    pub fn trigger(&mut self, event: FeedbackEvent) {
        debug!("feedback for {}", event);

        let profile = self.profile;
        let (color, sound) = match event {
            FeedbackEvent::Fire => (profile.fire_color, profile.fire_sound),
            FeedbackEvent::Hit => (profile.hit_color, profile.hit_sound),
            FeedbackEvent::Died => (profile.hit_color, profile.die_sound),
        };

        self.animator.flash(color, 1, profile.flash_speed);
        self.player.play(sound);
    }

    /// Advances sound, then light. Call once per loop iteration.
    pub fn process(&mut self) {
        self.player.process();
        self.animator.process();
    }

    /// Changes the profile; the new default color is shown at once.
    pub fn set_profile(&mut self, profile: FeedbackProfile<I::Duration>) {
        self.profile = profile;
        self.animator.set_default_color(profile.default_color);
    }

    /// Returns the active profile.
    pub fn profile(&self) -> &FeedbackProfile<I::Duration> {
        &self.profile
    }

    /// Returns a reference to the color animator.
    pub fn animator(&self) -> &ColorAnimator<'t, I, L, T, DAMPEN> {
        &self.animator
    }

    /// Returns a mutable reference to the color animator.
    pub fn animator_mut(&mut self) -> &mut ColorAnimator<'t, I, L, T, DAMPEN> {
        &mut self.animator
    }

    /// Returns a reference to the sound player.
    pub fn player(&self) -> &SoundPlayer<'t, I, T, O, R> {
        &self.player
    }

    /// Returns a mutable reference to the sound player.
    pub fn player_mut(&mut self) -> &mut SoundPlayer<'t, I, T, O, R> {
        &mut self.player
    }
}
