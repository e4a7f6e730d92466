//! Headless surface: Presents into memory.
//!
//! Useful for hosts without a display and for observing the pacer from
//! another thread. The surface moves into the pacer; a [`HeadlessHandle`]
//! stays behind to toggle validity, resize, inject failures and inspect what
//! was presented.

use super::frame::{Frame, Rgb};
use super::rect::Rect;
use super::surface::{DrawTarget, Surface};
use crate::error::PresentError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// An in-memory draw target.
#[derive(Debug, Clone)]
pub struct Canvas {
    frame: Frame,
}

impl Canvas {
    /// Create a black canvas.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            frame: Frame::new(width, height),
        }
    }

    /// Wrap an existing frame.
    pub const fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }

    /// The pixels drawn so far.
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Unwrap into the drawn frame.
    pub fn into_frame(self) -> Frame {
        self.frame
    }
}

impl DrawTarget for Canvas {
    fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    fn put_pixel(&mut self, x: u16, y: u16, color: Rgb) {
        self.frame.set(x, y, color);
    }
}

#[derive(Debug)]
struct Shared {
    valid: AtomicBool,
    presents: AtomicU64,
    size: Mutex<(u16, u16)>,
    last: Mutex<Option<Frame>>,
    failure: Mutex<Option<String>>,
}

/// A surface that keeps the last presented frame in memory.
#[derive(Debug)]
pub struct HeadlessSurface {
    shared: Arc<Shared>,
    /// Previously presented frame, reused as the next canvas.
    spare: Option<Frame>,
}

/// Control and inspection side of a [`HeadlessSurface`].
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    shared: Arc<Shared>,
}

impl HeadlessSurface {
    /// Create a valid surface of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            shared: Arc::new(Shared {
                valid: AtomicBool::new(true),
                presents: AtomicU64::new(0),
                size: Mutex::new((width, height)),
                last: Mutex::new(None),
                failure: Mutex::new(None),
            }),
            spare: None,
        }
    }

    /// Get a handle for controlling the surface from another thread.
    pub fn handle(&self) -> HeadlessHandle {
        HeadlessHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Surface for HeadlessSurface {
    type Target = Canvas;

    fn is_valid(&self) -> bool {
        self.shared.valid.load(Ordering::Acquire)
    }

    fn begin_present(&mut self) -> Result<Canvas, PresentError> {
        let (width, height) = *self.shared.size.lock();
        let frame = match self.spare.take() {
            Some(mut frame) => {
                if frame.width() == width && frame.height() == height {
                    frame.fill(Rgb::BLACK);
                } else {
                    frame.resize(width, height);
                }
                frame
            }
            None => Frame::new(width, height),
        };
        Ok(Canvas::from_frame(frame))
    }

    fn end_present(&mut self, target: Canvas) -> Result<(), PresentError> {
        if let Some(reason) = self.shared.failure.lock().take() {
            return Err(PresentError::Surface(reason));
        }
        self.spare = self.shared.last.lock().replace(target.into_frame());
        self.shared.presents.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

impl HeadlessHandle {
    /// Mark the surface valid or invalid.
    pub fn set_valid(&self, valid: bool) {
        self.shared.valid.store(valid, Ordering::Release);
    }

    /// Change the size used for the next presentation.
    pub fn resize(&self, width: u16, height: u16) {
        *self.shared.size.lock() = (width, height);
    }

    /// Make the next presentation fail with `reason`.
    pub fn fail_next_present(&self, reason: impl Into<String>) {
        *self.shared.failure.lock() = Some(reason.into());
    }

    /// Number of successful presentations.
    pub fn present_count(&self) -> u64 {
        self.shared.presents.load(Ordering::Acquire)
    }

    /// Copy of the most recently presented frame.
    pub fn last_frame(&self) -> Option<Frame> {
        self.shared.last.lock().clone()
    }
}
