//! Procedurally generated note sequences.
//!
//! A sound is a short burst of notes whose pitch falls as the sequence
//! progresses, with a little randomness in both pitch and length. Nothing
//! blocks: [`Sound::process_sound`] is polled every loop iteration and only
//! starts the next note once the previous one has run its course.

use crate::time::{TimeDuration, TimeInstant};
use rand::{Rng, RngCore};

/// Trait for abstracting a tone-capable output (piezo, speaker behind a timer).
pub trait ToneOutput<D: TimeDuration> {
    /// Starts a square wave at `frequency_hz` that stops by itself after `duration`.
    ///
    /// Must return immediately; the hardware keeps the tone going.
    fn tone(&mut self, frequency_hz: u32, duration: D);

    /// Stops any tone in progress.
    fn silence(&mut self);
}

/// Source of non-cryptographic random integers.
pub trait RandomSource {
    /// Returns a value in `min..max_exclusive`, or `min` when that range is empty.
    fn random(&mut self, min: u32, max_exclusive: u32) -> u32;
}

impl<R: RngCore> RandomSource for R {
    fn random(&mut self, min: u32, max_exclusive: u32) -> u32 {
        if min >= max_exclusive {
            min
        } else {
            self.gen_range(min..max_exclusive)
        }
    }
}

/// Sound configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoundError {
    /// A sound needs at least one note.
    NoNotes,

    /// Minimum note duration is longer than the maximum.
    InvertedDurationRange,

    /// Minimum frequency is above the maximum.
    InvertedFrequencyRange,
}

impl core::fmt::Display for SoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SoundError::NoNotes => write!(f, "sound must have at least one note"),
            SoundError::InvertedDurationRange => {
                write!(f, "minimum note duration exceeds maximum note duration")
            }
            SoundError::InvertedFrequencyRange => {
                write!(f, "minimum frequency exceeds maximum frequency")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SoundError {}

/// A run of randomized notes with falling pitch.
///
/// Note `i` (1-based) of `n` is centred on `(n - i) * step`, where
/// `step = (max_frequency - min_frequency) / n`, plus up to
/// `frequency_variation` Hz of random jitter. Its length is drawn from
/// `min_note_duration..max_note_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DescendingNotes<D: TimeDuration> {
    min_note_duration: D,
    max_note_duration: D,
    note_count: u16,
    max_frequency: u32,
    min_frequency: u32,
    frequency_variation: u32,
    frequency_step_per_note: u32,
}

impl<D: TimeDuration> DescendingNotes<D> {
    /// Creates and validates a note sequence.
    ///
    /// # Errors
    /// * `NoNotes` - `note_count` is zero
    /// * `InvertedDurationRange` - `min_note_duration > max_note_duration`
    /// * `InvertedFrequencyRange` - `min_frequency > max_frequency`
    pub fn new(
        min_note_duration: D,
        max_note_duration: D,
        note_count: u16,
        max_frequency: u32,
        min_frequency: u32,
        frequency_variation: u32,
    ) -> Result<Self, SoundError> {
        if note_count == 0 {
            return Err(SoundError::NoNotes);
        }
        if min_note_duration.as_millis() > max_note_duration.as_millis() {
            return Err(SoundError::InvertedDurationRange);
        }
        if min_frequency > max_frequency {
            return Err(SoundError::InvertedFrequencyRange);
        }

        Ok(Self {
            min_note_duration,
            max_note_duration,
            note_count,
            max_frequency,
            min_frequency,
            frequency_variation,
            frequency_step_per_note: (max_frequency - min_frequency) / note_count as u32,
        })
    }

    /// Builds a sequence from parameters already known to be valid.
    pub(crate) fn from_trusted(
        min_note_duration: D,
        max_note_duration: D,
        note_count: u16,
        max_frequency: u32,
        min_frequency: u32,
        frequency_variation: u32,
    ) -> Self {
        let note_count = note_count.max(1);
        Self {
            min_note_duration,
            max_note_duration,
            note_count,
            max_frequency,
            min_frequency,
            frequency_variation,
            frequency_step_per_note: max_frequency.saturating_sub(min_frequency)
                / note_count as u32,
        }
    }

    /// Plays the next note if the current one is over.
    ///
    /// # Returns
    /// * `true` - Still playing (a note is sounding or was just started)
    /// * `false` - All notes played; the output has been silenced
    pub fn process_sound<I, O, R>(
        &self,
        progress: &mut NoteProgress<I>,
        now: I,
        output: &mut O,
        rng: &mut R,
    ) -> bool
    where
        I: TimeInstant<Duration = D>,
        O: ToneOutput<D>,
        R: RandomSource,
    {
        let last_note_reached = progress.current_note_index >= self.note_count;
        let Some(started) = progress.note_started else {
            if last_note_reached {
                // Finished (or handed a sequence shorter than this progress)
                return false;
            }
            return self.start_next_note(progress, now, output, rng);
        };

        if now.duration_since(started).as_millis() <= progress.note_length.as_millis() {
            return true;
        }

        if last_note_reached {
            output.silence();
            progress.note_started = None;
            return false;
        }

        self.start_next_note(progress, now, output, rng)
    }

    fn start_next_note<I, O, R>(
        &self,
        progress: &mut NoteProgress<I>,
        now: I,
        output: &mut O,
        rng: &mut R,
    ) -> bool
    where
        I: TimeInstant<Duration = D>,
        O: ToneOutput<D>,
        R: RandomSource,
    {
        progress.current_note_index += 1;

        let jitter = rng.random(0, self.frequency_variation);
        let frequency = self
            .base_frequency(progress.current_note_index)
            .saturating_add(jitter);
        let length = D::from_millis(rng.random(
            clamp_millis(self.min_note_duration),
            clamp_millis(self.max_note_duration),
        ) as u64);

        progress.note_started = Some(now);
        progress.note_length = length;
        trace!(
            "note {=u16}/{=u16}: {=u32} Hz for {=u64} ms",
            progress.current_note_index,
            self.note_count,
            frequency,
            length.as_millis()
        );
        output.tone(frequency, length);
        true
    }

    /// Frequency of note `index` (1-based) before random jitter is added.
    pub fn base_frequency(&self, index: u16) -> u32 {
        self.note_count.saturating_sub(index) as u32 * self.frequency_step_per_note
    }

    /// Returns the shortest note length.
    pub fn min_note_duration(&self) -> D {
        self.min_note_duration
    }

    /// Returns the upper bound (exclusive) on note length.
    pub fn max_note_duration(&self) -> D {
        self.max_note_duration
    }

    /// Returns the number of notes in the sequence.
    pub fn note_count(&self) -> u16 {
        self.note_count
    }

    /// Returns the top of the frequency span.
    pub fn max_frequency(&self) -> u32 {
        self.max_frequency
    }

    /// Returns the bottom of the frequency span.
    pub fn min_frequency(&self) -> u32 {
        self.min_frequency
    }

    /// Returns the upper bound (exclusive) on random pitch jitter, in Hz.
    pub fn frequency_variation(&self) -> u32 {
        self.frequency_variation
    }

    /// Returns the pitch drop between consecutive notes, in Hz.
    pub fn frequency_step_per_note(&self) -> u32 {
        self.frequency_step_per_note
    }
}

fn clamp_millis<D: TimeDuration>(duration: D) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Playback position within a note sequence.
#[derive(Debug, Clone, Copy)]
pub struct NoteProgress<I: TimeInstant> {
    current_note_index: u16,
    note_started: Option<I>,
    note_length: I::Duration,
}

impl<I: TimeInstant> NoteProgress<I> {
    /// Progress positioned before the first note, with that note due immediately.
    pub fn new() -> Self {
        Self {
            current_note_index: 0,
            note_started: None,
            note_length: I::Duration::ZERO,
        }
    }

    /// Rewinds to before the first note, due on the very next poll.
    pub fn start(&mut self) {
        *self = Self::new();
    }

    /// 0 before the first note, then 1-based index of the note sounding.
    pub fn current_note_index(&self) -> u16 {
        self.current_note_index
    }

    /// When the next note becomes due. `None` means due now.
    pub fn next_note_time(&self) -> Option<I> {
        self.note_started
            .and_then(|started| started.checked_add(self.note_length))
    }
}

impl<I: TimeInstant> Default for NoteProgress<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every kind of sound the device can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sound<D: TimeDuration> {
    /// Randomized notes with falling pitch.
    DescendingNotes(DescendingNotes<D>),
}

impl<D: TimeDuration> Sound<D> {
    /// Advances the sound by at most one note.
    ///
    /// Returns false once the sound has finished.
    pub fn process_sound<I, O, R>(
        &self,
        progress: &mut NoteProgress<I>,
        now: I,
        output: &mut O,
        rng: &mut R,
    ) -> bool
    where
        I: TimeInstant<Duration = D>,
        O: ToneOutput<D>,
        R: RandomSource,
    {
        match self {
            Sound::DescendingNotes(notes) => notes.process_sound(progress, now, output, rng),
        }
    }

    /// Total number of notes in the sound.
    pub fn note_count(&self) -> u16 {
        match self {
            Sound::DescendingNotes(notes) => notes.note_count(),
        }
    }
}

impl<D: TimeDuration> From<DescendingNotes<D>> for Sound<D> {
    fn from(notes: DescendingNotes<D>) -> Self {
        Sound::DescendingNotes(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{Millis, MillisDuration};

    #[test]
    fn step_is_frequency_span_over_note_count() {
        let notes =
            DescendingNotes::new(MillisDuration(30), MillisDuration(60), 10, 150, 50, 50).unwrap();
        assert_eq!(notes.frequency_step_per_note(), 10);
        assert_eq!(notes.base_frequency(1), 90);
        assert_eq!(notes.base_frequency(10), 0);
    }

    #[test]
    fn step_uses_integer_division() {
        let notes =
            DescendingNotes::new(MillisDuration(30), MillisDuration(60), 7, 300, 240, 50).unwrap();
        assert_eq!(notes.frequency_step_per_note(), 8);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(
            DescendingNotes::new(MillisDuration(30), MillisDuration(60), 0, 150, 50, 50),
            Err(SoundError::NoNotes)
        );
        assert_eq!(
            DescendingNotes::new(MillisDuration(61), MillisDuration(60), 3, 150, 50, 50),
            Err(SoundError::InvertedDurationRange)
        );
        assert_eq!(
            DescendingNotes::new(MillisDuration(30), MillisDuration(60), 3, 50, 150, 50),
            Err(SoundError::InvertedFrequencyRange)
        );
    }

    #[test]
    fn random_source_handles_empty_range() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        assert_eq!(rng.random(5, 5), 5);
        assert_eq!(rng.random(9, 3), 9);
        for _ in 0..100 {
            let value = rng.random(10, 20);
            assert!((10..20).contains(&value));
        }
    }

    #[test]
    fn fresh_progress_is_due_immediately() {
        let progress = NoteProgress::<Millis>::new();
        assert_eq!(progress.current_note_index(), 0);
        assert_eq!(progress.next_note_time(), None);
    }
}
