//! Render module: Frames and the surfaces they are presented on.
//!
//! This module contains:
//! - [`Frame`]: An owned RGB pixel grid produced by the consumer
//! - [`Surface`] / [`DrawTarget`]: The presentation contract the pacer drives
//! - [`HeadlessSurface`]: A surface that presents into memory

mod frame;
mod headless;
mod rect;
mod surface;

pub use frame::{Frame, Rgb};
pub use headless::{Canvas, HeadlessHandle, HeadlessSurface};
pub use rect::Rect;
pub use surface::{present, DrawTarget, Surface};
