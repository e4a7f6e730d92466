//! Consumer contract: the application side of the loop.

use crate::input::EventBatch;
use crate::render::Frame;

/// The application driven by a [`FramePacer`](super::FramePacer).
///
/// Each tick calls [`Consumer::update`] and then [`Consumer::draw_request`],
/// always on the pacer's thread and never overlapping.
pub trait Consumer: Send {
    /// Advance the simulation.
    ///
    /// # Arguments
    ///
    /// * `delta` - Seconds since the previous tick started.
    /// * `events` - Pointer events recorded since the previous tick, in the
    ///   order they were reported. The batch is only valid for this call.
    fn update(&mut self, delta: f32, events: &EventBatch);

    /// Return the frame to present, or `None` if nothing changed.
    ///
    /// Returning `None` lets the pacer idle instead of redrawing.
    fn draw_request(&mut self) -> Option<&Frame>;

    /// Called with the surface's pixel size the first time a frame is
    /// presented and whenever that size changes afterwards.
    fn surface_measured(&mut self, _width: u16, _height: u16) {}
}
