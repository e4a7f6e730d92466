//! Surface contract: where the pacer presents frames.

use super::frame::{Frame, Rgb};
use super::rect::Rect;
use crate::error::PresentError;

/// Something frames can be drawn onto for one presentation.
pub trait DrawTarget {
    /// Current pixel bounds of the target.
    fn bounds(&self) -> Rect;

    /// Write one pixel. Coordinates outside [`DrawTarget::bounds`] are ignored.
    fn put_pixel(&mut self, x: u16, y: u16, color: Rgb);
}

/// A presentation surface owned by the pacer's loop thread.
pub trait Surface: Send {
    /// Target handed out for one presentation.
    type Target: DrawTarget;

    /// Whether frames can be presented right now.
    ///
    /// An invalid surface is not an error; the pacer keeps polling.
    fn is_valid(&self) -> bool;

    /// Start a presentation.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot provide a target.
    fn begin_present(&mut self) -> Result<Self::Target, PresentError>;

    /// Finish a presentation started with [`Surface::begin_present`].
    ///
    /// # Errors
    ///
    /// Returns an error if the drawn target cannot be shown.
    fn end_present(&mut self, target: Self::Target) -> Result<(), PresentError>;
}

/// Present `frame` stretched over the whole target.
///
/// Returns the bounds the frame was fitted to.
///
/// # Errors
///
/// Propagates any error raised by the surface.
pub fn present<S: Surface + ?Sized>(surface: &mut S, frame: &Frame) -> Result<Rect, PresentError> {
    let mut target = surface.begin_present()?;
    let bounds = target.bounds();
    frame.stretch_onto(&mut target, bounds);
    surface.end_present(target)?;
    Ok(bounds)
}
