//! Stock colors, flash speeds and sounds.

use crate::colors::{Color, GREEN, RED, WHITE};
use crate::sound::{DescendingNotes, Sound};
use crate::time::TimeDuration;

/// Phase length of a slow flash, in milliseconds.
pub const FLASH_SLOW_MS: u64 = 400;

/// Phase length of a fast flash, in milliseconds.
pub const FLASH_FAST_MS: u64 = 200;

/// Idle indicator color.
pub const DEFAULT_COLOR: Color = GREEN;

/// Flash shown when firing.
pub const FIRE_FLASH_COLOR: Color = WHITE;

/// Flash shown when hit.
pub const HIT_FLASH_COLOR: Color = RED;

/// Slow flash phase length as a duration.
pub fn flash_slow<D: TimeDuration>() -> D {
    D::from_millis(FLASH_SLOW_MS)
}

/// Fast flash phase length as a duration.
pub fn flash_fast<D: TimeDuration>() -> D {
    D::from_millis(FLASH_FAST_MS)
}

/// Five short, high notes.
pub fn fire_sound<D: TimeDuration>() -> Sound<D> {
    notes(30, 60, 5, 300, 240, 50)
}

/// Ten short notes, medium duration and low pitched.
pub fn hit_sound<D: TimeDuration>() -> Sound<D> {
    notes(30, 60, 10, 150, 50, 50)
}

/// Thirty longer notes sweeping down from high pitch.
pub fn die_sound<D: TimeDuration>() -> Sound<D> {
    notes(50, 100, 30, 360, 0, 120)
}

fn notes<D: TimeDuration>(
    min_note_ms: u64,
    max_note_ms: u64,
    note_count: u16,
    max_frequency: u32,
    min_frequency: u32,
    frequency_variation: u32,
) -> Sound<D> {
    Sound::DescendingNotes(DescendingNotes::from_trusted(
        D::from_millis(min_note_ms),
        D::from_millis(max_note_ms),
        note_count,
        max_frequency,
        min_frequency,
        frequency_variation,
    ))
}
