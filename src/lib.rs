//! # Touchloop
//!
//! A free-running frame pacer with pooled, double-buffered multi-touch input
//! for 2D soft-real-time applications.
//!
//! One thread paces "update the simulation, then draw a frame" as fast as the
//! surface accepts frames; the host's input thread records pointer contacts
//! as they happen. Every event recorded during one tick reaches the next
//! tick's update exactly once and in order.
//!
//! ## Core Concepts
//!
//! - **Object pool**: Event records are recycled instead of allocated per event
//! - **Double-buffered events**: The host writes one buffer while the loop reads the other
//! - **Free-running pacer**: No fixed tick rate; idles only when nothing changed
//! - **Time-to-frame mapping**: Looping and clamping animations driven by elapsed time
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use touchloop::{FramePacer, HeadlessSurface, PointerTracker};
//!
//! let tracker = Arc::new(PointerTracker::new());
//! let mut pacer = FramePacer::new(my_consumer, HeadlessSurface::new(320, 240), tracker.clone());
//! pacer.resume()?;
//! // host input thread: tracker.on_host_event(...)
//! pacer.pause()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod animation;
pub mod config;
pub mod error;
pub mod input;
pub mod pacer;
pub mod pool;
pub mod render;
pub mod terminal;

// Re-exports for convenience
pub use animation::{Animation, Playback};
pub use config::LoopConfig;
pub use error::{ConfigError, PacerError, PresentError};
pub use input::{Contact, EventBatch, HostEvent, PointerEvent, PointerKind, PointerListener, PointerTracker};
pub use pacer::{Consumer, FramePacer};
pub use pool::ObjectPool;
pub use render::{Canvas, DrawTarget, Frame, HeadlessHandle, HeadlessSurface, Rect, Rgb, Surface};
