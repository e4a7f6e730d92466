//! Input module: Pointer tracking between the host and the pacer.
//!
//! This module contains:
//! - [`PointerTracker`]: Pointer state plus the double-buffered event queue
//! - [`PointerListener`]: The hook a host input adapter calls into
//! - [`EventBatch`]: One tick's worth of [`PointerEvent`]s

mod event;
mod host;
mod tracker;

pub use event::{EventBatch, PointerEvent, PointerKind};
pub use host::{Contact, HostEvent, PointerListener};
pub use tracker::PointerTracker;
