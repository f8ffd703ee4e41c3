//! Single-slot sound dispatcher.

use crate::sound::{NoteProgress, RandomSource, Sound, ToneOutput};
use crate::time::{Millis, TimeInstant, TimeSource};

struct ActiveSound<I: TimeInstant> {
    sound: Sound<I::Duration>,
    progress: NoteProgress<I>,
}

/// Plays at most one [`Sound`] at a time on a tone output.
///
/// Starting a sound replaces the one playing, mid-note if need be, with no
/// queueing and no notification. Polling with [`process`](Self::process)
/// advances the current sound and empties the slot once it has finished.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `O` - Tone output implementation type
/// * `R` - Random number source
pub struct SoundPlayer<'t, I, T, O, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    O: ToneOutput<I::Duration>,
    R: RandomSource,
{
    output: O,
    rng: R,
    time_source: &'t T,
    current: Option<ActiveSound<I>>,
}

/// Player driven by a wrapping millisecond counter.
pub type MillisSoundPlayer<'t, T, O, R> = SoundPlayer<'t, Millis, T, O, R>;

impl<'t, I, T, O, R> SoundPlayer<'t, I, T, O, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    O: ToneOutput<I::Duration>,
    R: RandomSource,
{
    /// Creates a silent player.
    pub fn new(output: O, rng: R, time_source: &'t T) -> Self {
        Self {
            output,
            rng,
            time_source,
            current: None,
        }
    }

    /// Starts `sound` from its first note, abandoning whatever was playing.
    ///
    /// The first note sounds on the next [`process`](Self::process).
    pub fn play(&mut self, sound: impl Into<Sound<I::Duration>>) {
        let sound = sound.into();
        debug!("playing sound with {=u16} notes", sound.note_count());

        self.current = Some(ActiveSound {
            sound,
            progress: NoteProgress::new(),
        });
    }

    /// Advances the current sound. Call once per loop iteration.
    ///
    /// Returns true while a sound is still playing.
    pub fn process(&mut self) -> bool {
        let Some(active) = self.current.as_mut() else {
            return false;
        };

        let now = self.time_source.now();
        let playing =
            active
                .sound
                .process_sound(&mut active.progress, now, &mut self.output, &mut self.rng);
        if !playing {
            debug!("sound finished");
            self.current = None;
        }
        playing
    }

    /// Silences the output and forgets the current sound.
    pub fn stop(&mut self) {
        self.output.silence();
        self.current = None;
    }

    /// Returns true if a sound occupies the slot.
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the sound being played, if any.
    pub fn current(&self) -> Option<&Sound<I::Duration>> {
        self.current.as_ref().map(|active| &active.sound)
    }

    /// Returns the playback position of the current sound.
    pub fn progress(&self) -> Option<&NoteProgress<I>> {
        self.current.as_ref().map(|active| &active.progress)
    }

    /// Returns a reference to the tone output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Returns a mutable reference to the tone output.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consumes the player, returning the output and random source.
    pub fn release(self) -> (O, R) {
        (self.output, self.rng)
    }
}
