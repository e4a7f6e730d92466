//! Error types.
//!
//! Configuration problems are rejected at construction time, presentation
//! failures travel from the surface up to whoever owns the pacer.

use std::io;
use thiserror::Error;

/// Invalid construction parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An object pool must be able to hold at least one instance.
    #[error("pool capacity must be positive")]
    ZeroPoolCapacity,

    /// The tracker needs at least one pointer slot.
    #[error("max pointers must be positive")]
    ZeroPointerSlots,

    /// An animation needs at least one frame.
    #[error("animation has no frames")]
    EmptyFrames,

    /// Animation durations must be finite and strictly positive.
    #[error("animation duration must be positive, got {0}")]
    NonPositiveDuration(f32),
}

/// Failure while presenting a frame on a surface.
#[derive(Debug, Error)]
pub enum PresentError {
    /// The underlying writer failed.
    #[error("surface I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The surface rejected the frame for a backend-specific reason.
    #[error("surface failure: {0}")]
    Surface(String),
}

/// Errors reported by [`FramePacer`](crate::FramePacer).
#[derive(Debug, Error)]
pub enum PacerError {
    /// `resume` was called while the loop is already running.
    #[error("frame pacer is already running")]
    AlreadyRunning,

    /// `pause` was called while the loop is not running.
    #[error("frame pacer is not running")]
    NotRunning,

    /// The loop thread could not be spawned.
    #[error("failed to spawn the pacer thread: {0}")]
    Spawn(#[source] io::Error),

    /// The loop stopped because presentation failed.
    #[error("presentation failed: {0}")]
    Present(#[from] PresentError),

    /// The loop thread panicked; the consumer and surface were lost with it.
    #[error("pacer thread panicked")]
    LoopPanicked,
}
