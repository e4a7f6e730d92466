//! Animation: Accumulated time quantized to a frame index.
//!
//! An [`Animation`] owns a fixed sequence of frame references and a total
//! duration. Every frame lasts `total / N` seconds; advancing by the tick's
//! delta picks the frame for the accumulated time:
//!
//! ```text
//! n = floor(elapsed / (total / N))
//! Looping:   index = n mod N
//! Clamping:  index = min(n, N - 1)
//! ```

use crate::error::ConfigError;

/// How the index behaves once the elapsed time passes the total duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Wrap around to the first frame.
    Looping,
    /// Stay on the last frame.
    Clamping {
        /// Index of the last frame.
        max_index: usize,
    },
}

/// A frame sequence driven by elapsed time.
///
/// `F` is whatever the application uses to refer to a frame: a sprite
/// handle, a color, a pre-rendered [`Frame`](crate::Frame).
#[derive(Debug, Clone)]
pub struct Animation<F> {
    frames: Vec<F>,
    total_duration: f32,
    frame_duration: f32,
    playback: Playback,
    elapsed: f32,
    current_index: usize,
}

impl<F> Animation<F> {
    /// Create an animation that repeats every `total_duration` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `frames` is empty or `total_duration` is not a
    /// positive, finite number of seconds.
    pub fn looping(total_duration: f32, frames: Vec<F>) -> Result<Self, ConfigError> {
        Self::build(total_duration, frames, |_| Playback::Looping)
    }

    /// Create an animation that plays once and holds its last frame.
    ///
    /// # Errors
    ///
    /// Returns an error if `frames` is empty or `total_duration` is not a
    /// positive, finite number of seconds.
    pub fn clamping(total_duration: f32, frames: Vec<F>) -> Result<Self, ConfigError> {
        Self::build(total_duration, frames, |len| Playback::Clamping {
            max_index: len - 1,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn build(
        total_duration: f32,
        frames: Vec<F>,
        playback: impl FnOnce(usize) -> Playback,
    ) -> Result<Self, ConfigError> {
        if frames.is_empty() {
            return Err(ConfigError::EmptyFrames);
        }
        if !(total_duration.is_finite() && total_duration > 0.0) {
            return Err(ConfigError::NonPositiveDuration(total_duration));
        }

        let playback = playback(frames.len());
        Ok(Self {
            frame_duration: total_duration / frames.len() as f32,
            frames,
            total_duration,
            playback,
            elapsed: 0.0,
            current_index: 0,
        })
    }

    /// Add `delta` seconds and recompute the current frame.
    ///
    /// Negative and NaN deltas are ignored so elapsed time never decreases.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance(&mut self, delta: f32) {
        if delta > 0.0 {
            self.elapsed += delta;
        }

        // Float to int casts saturate, so very long runs stay in range.
        let steps = (self.elapsed / self.frame_duration).floor() as usize;
        self.current_index = match self.playback {
            Playback::Looping => steps % self.frames.len(),
            Playback::Clamping { max_index } => steps.min(max_index),
        };
    }

    /// The frame for the current elapsed time.
    #[inline]
    pub fn current_frame(&self) -> &F {
        &self.frames[self.current_index]
    }

    /// Index of the current frame.
    #[inline]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether a clamping animation has played to its end.
    ///
    /// Looping animations never end.
    pub fn is_ended(&self) -> bool {
        matches!(self.playback, Playback::Clamping { .. }) && self.elapsed >= self.total_duration
    }

    /// Seconds accumulated so far.
    #[inline]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Length of the whole sequence in seconds.
    #[inline]
    pub const fn total_duration(&self) -> f32 {
        self.total_duration
    }

    /// Playback policy.
    #[inline]
    pub const fn playback(&self) -> Playback {
        self.playback
    }

    /// All frames in order.
    #[inline]
    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    /// Give the frames back to the owner.
    pub fn into_frames(self) -> Vec<F> {
        self.frames
    }
}
