#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Color`**: A packed `0xRRGGBB` value
//! - **`Animation`**: A timed color transition or flash, evaluated against elapsed time
//! - **`ColorAnimator`**: Drives a single RGB LED through animations, one at a time
//! - **`RgbLed`**: Trait to implement for your LED hardware
//! - **`Sound`**: A procedurally generated note sequence (`DescendingNotes` today)
//! - **`SoundPlayer`**: Plays one sound at a time on a `ToneOutput`
//! - **`ToneOutput`** / **`RandomSource`**: Traits for the speaker and the random numbers
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Feedback`**: LED + speaker reacting to `FeedbackEvent`s
//!
//! Everything is polled. Each component keeps the instant its current behavior
//! started and works out what to do from the time elapsed since then, so a
//! component that is polled late simply catches up.

#[macro_use]
mod fmt;

pub mod animation;
pub mod animator;
pub mod colors;
pub mod command;
pub mod feedback;
pub mod player;
pub mod presets;
pub mod sound;
pub mod time;

pub use animation::{Animation, Frame, Landing};
pub use animator::{AnimatorState, ColorAnimator, MillisAnimator, RgbLed};
pub use colors::{BLACK, BLUE, Color, GREEN, RED, WHITE};
pub use command::{AnimatorAction, FeedbackEvent};
pub use feedback::{Feedback, FeedbackProfile};
pub use player::{MillisSoundPlayer, SoundPlayer};
pub use sound::{DescendingNotes, NoteProgress, RandomSource, Sound, SoundError, ToneOutput};
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};

/// Default pseudo-random generator for [`SoundPlayer`].
pub use rand::rngs::SmallRng;
