//! Frame: An owned grid of RGB pixels.
//!
//! Consumers draw into a [`Frame`] and hand it to the pacer, which fits it
//! onto the surface with [`Frame::stretch_onto`]. Pixels are stored
//! row-major: `index = y * width + x`.

use super::rect::Rect;
use super::surface::DrawTarget;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A grid of pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<Rgb>,
    width: u16,
    height: u16,
}

impl Frame {
    /// Create a black frame. Zero-sized frames are allowed and draw nothing.
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create a frame filled with one color.
    pub fn filled(width: u16, height: u16, color: Rgb) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            pixels: vec![color; size],
            width,
            height,
        }
    }

    /// Get the frame width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the frame height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounds anchored at the origin.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Check if the frame has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get the underlying pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if self.bounds().contains(x, y) {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Get the pixel at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Returns `false` if out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, color: Rgb) -> bool {
        match self.index_of(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Fill the whole frame.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let clip = rect.intersection(&self.bounds());
        for y in clip.y..clip.bottom() {
            let start = usize::from(y) * usize::from(self.width);
            self.pixels[start + usize::from(clip.x)..start + usize::from(clip.right())].fill(color);
        }
    }

    /// Resize to new dimensions, clearing to black.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(usize::from(width) * usize::from(height), Rgb::BLACK);
    }

    /// Draw the frame scaled to `dst` with nearest-neighbour sampling.
    ///
    /// Pixels of `dst` outside the target's bounds are clipped.
    pub fn stretch_onto<T: DrawTarget + ?Sized>(&self, target: &mut T, dst: Rect) {
        let clip = dst.intersection(&target.bounds());
        if clip.is_empty() || self.is_empty() {
            return;
        }

        for ty in clip.y..clip.bottom() {
            let sy = scale(ty - dst.y, dst.height, self.height);
            let row = usize::from(sy) * usize::from(self.width);
            for tx in clip.x..clip.right() {
                let sx = scale(tx - dst.x, dst.width, self.width);
                target.put_pixel(tx, ty, self.pixels[row + usize::from(sx)]);
            }
        }
    }
}

/// Map an offset in a `dst_len` span onto a `src_len` span.
#[allow(clippy::cast_possible_truncation)]
#[inline]
fn scale(offset: u16, dst_len: u16, src_len: u16) -> u16 {
    // offset < dst_len, so the result is < src_len
    (u32::from(offset) * u32::from(src_len) / u32::from(dst_len)) as u16
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({}x{})", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Canvas;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(Rgb::from_u32(0xFF5500), Rgb::new(0xFF, 0x55, 0x00));
        assert_eq!(format!("{:?}", Rgb::from((1, 2, 3))), "#010203");
    }

    #[test]
    fn test_get_set_bounds() {
        let mut frame = Frame::new(4, 3);
        assert!(frame.set(3, 2, RED));
        assert!(!frame.set(4, 0, RED));
        assert_eq!(frame.get(3, 2), Some(RED));
        assert_eq!(frame.get(0, 3), None);
    }

    #[test]
    fn test_empty_frame_has_no_pixels() {
        let mut frame = Frame::new(0, 5);
        assert!(frame.is_empty());
        assert!(!frame.set(0, 0, RED));
        assert_eq!(frame.get(0, 4), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut frame = Frame::new(4, 4);
        frame.fill_rect(Rect::new(2, 2, 10, 10), BLUE);
        assert_eq!(frame.get(1, 1), Some(Rgb::BLACK));
        assert_eq!(frame.get(3, 3), Some(BLUE));
        assert_eq!(frame.pixels().iter().filter(|&&p| p == BLUE).count(), 4);
    }

    #[test]
    fn test_stretch_upscale() {
        let mut frame = Frame::new(2, 1);
        frame.set(0, 0, RED);
        frame.set(1, 0, BLUE);

        let mut canvas = Canvas::new(4, 2);
        let bounds = canvas.bounds();
        frame.stretch_onto(&mut canvas, bounds);

        let out = canvas.frame();
        for y in 0..2 {
            assert_eq!(out.get(0, y), Some(RED));
            assert_eq!(out.get(1, y), Some(RED));
            assert_eq!(out.get(2, y), Some(BLUE));
            assert_eq!(out.get(3, y), Some(BLUE));
        }
    }

    #[test]
    fn test_stretch_downscale_and_clip() {
        let mut frame = Frame::filled(8, 8, RED);
        frame.fill_rect(Rect::new(4, 0, 4, 8), BLUE);

        let mut canvas = Canvas::new(3, 3);
        // Destination hangs off the right edge of the canvas
        frame.stretch_onto(&mut canvas, Rect::new(1, 0, 4, 2));

        let out = canvas.frame();
        assert_eq!(out.get(0, 0), Some(Rgb::BLACK));
        assert_eq!(out.get(1, 0), Some(RED));
        assert_eq!(out.get(2, 1), Some(RED));
        assert_eq!(out.get(1, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn test_resize_clears() {
        let mut frame = Frame::filled(2, 2, RED);
        frame.resize(3, 1);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.pixels(), &[Rgb::BLACK; 3]);
    }
}
