//! Shared test infrastructure for tag-feedback integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use palette::Srgb;
use tag_feedback::{Color, RandomSource, RgbLed, TimeDuration, TimeInstant, TimeSource, ToneOutput};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(TestInstant(self.0 + duration.0))
    }

    fn checked_sub(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_sub(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource<I: Copy> {
    current_time: core::cell::Cell<I>,
}

impl MockTimeSource<TestInstant> {
    pub fn new() -> Self {
        Self::starting_at(TestInstant(0))
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }
}

impl MockTimeSource<tag_feedback::Millis> {
    /// Advance a wrapping millisecond clock
    pub fn advance_millis(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(tag_feedback::Millis(current.0.wrapping_add(millis)));
    }
}

impl<I: Copy> MockTimeSource<I> {
    pub fn starting_at(time: I) -> Self {
        Self {
            current_time: core::cell::Cell::new(time),
        }
    }

    pub fn set_time(&self, time: I) {
        self.current_time.set(time);
    }
}

impl<I: TimeInstant> TimeSource<I> for MockTimeSource<I> {
    fn now(&self) -> I {
        self.current_time.get()
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every write
pub struct MockLed {
    current_color: Srgb<u8>,
    color_history: heapless::Vec<Srgb<u8>, 64>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0, 0, 0),
            color_history: heapless::Vec::new(),
        }
    }

    pub fn last_color(&self) -> Color {
        self.current_color.into()
    }

    pub fn write_count(&self) -> usize {
        self.color_history.len()
    }

    pub fn color_history(&self) -> &[Srgb<u8>] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb<u8>) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Mock Tone Output
// ============================================================================

/// One call made on a tone output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent<D> {
    Tone { frequency: u32, duration: D },
    Silence,
}

/// Mock speaker that records every call
pub struct MockTone<D> {
    events: heapless::Vec<ToneEvent<D>, 64>,
}

impl<D: Copy> MockTone<D> {
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
        }
    }

    pub fn events(&self) -> &[ToneEvent<D>] {
        &self.events
    }

    /// Frequencies of all tones, in order
    pub fn frequencies(&self) -> heapless::Vec<u32, 64> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ToneEvent::Tone { frequency, .. } => Some(*frequency),
                ToneEvent::Silence => None,
            })
            .collect()
    }

    pub fn tone_count(&self) -> usize {
        self.frequencies().len()
    }

    pub fn last_event(&self) -> Option<ToneEvent<D>> {
        self.events.last().copied()
    }
}

impl<D: TimeDuration> ToneOutput<D> for MockTone<D> {
    fn tone(&mut self, frequency_hz: u32, duration: D) {
        let _ = self.events.push(ToneEvent::Tone {
            frequency: frequency_hz,
            duration,
        });
    }

    fn silence(&mut self) {
        let _ = self.events.push(ToneEvent::Silence);
    }
}

/// Tone output that only counts calls, for sequences too long to record
pub struct CountingTone {
    pub tones: usize,
    pub silences: usize,
}

impl CountingTone {
    pub fn new() -> Self {
        Self {
            tones: 0,
            silences: 0,
        }
    }
}

impl<D: TimeDuration> ToneOutput<D> for CountingTone {
    fn tone(&mut self, _frequency_hz: u32, _duration: D) {
        self.tones += 1;
    }

    fn silence(&mut self) {
        self.silences += 1;
    }
}

// ============================================================================
// Mock Random Source
// ============================================================================

/// Random source that always picks the same offset into the requested range
pub struct FixedRandom {
    offset: u32,
}

impl FixedRandom {
    /// Always returns `min` (the low end of every range)
    pub fn low() -> Self {
        Self { offset: 0 }
    }

    /// Returns `min + offset`, clamped below `max_exclusive`
    pub fn offset(offset: u32) -> Self {
        Self { offset }
    }
}

impl RandomSource for FixedRandom {
    fn random(&mut self, min: u32, max_exclusive: u32) -> u32 {
        if min >= max_exclusive {
            return min;
        }
        min.saturating_add(self.offset).min(max_exclusive - 1)
    }
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use tag_feedback::{BLACK, BLUE, GREEN, RED, WHITE};
