//! `TerminalSurface`: Presents frames as half-block characters.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background. A terminal of
//! `cols x rows` cells is therefore a `cols x 2*rows` pixel surface.

use super::output::OutputBuffer;
use crate::error::PresentError;
use crate::render::{Canvas, Frame, Rgb, Surface};
use crossterm::terminal;
use std::io::{self, Stdout, Write};

const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// A surface backed by a terminal.
pub struct TerminalSurface<W = Stdout> {
    writer: W,
    output: OutputBuffer,
    /// Canvas from the previous presentation, reused when the size matches.
    spare: Option<Frame>,
    /// Cell size override; `None` queries the terminal.
    fixed_size: Option<(u16, u16)>,
}

impl TerminalSurface<Stdout> {
    /// Create a surface that writes to stdout and follows the terminal size.
    pub fn new() -> Self {
        Self {
            writer: io::stdout(),
            output: OutputBuffer::new(),
            spare: None,
            fixed_size: None,
        }
    }
}

impl Default for TerminalSurface<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Create a surface of a fixed cell size that writes to `writer`.
    pub fn with_writer(writer: W, cols: u16, rows: u16) -> Self {
        Self {
            writer,
            output: OutputBuffer::new(),
            spare: None,
            fixed_size: Some((cols, rows)),
        }
    }

    /// Get a reference to the writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    fn cells(&self) -> io::Result<(u16, u16)> {
        match self.fixed_size {
            Some(size) => Ok(size),
            None => terminal::size(),
        }
    }
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    type Target = Canvas;

    fn is_valid(&self) -> bool {
        self.cells().is_ok_and(|(cols, rows)| cols > 0 && rows > 0)
    }

    fn begin_present(&mut self) -> Result<Canvas, PresentError> {
        let (cols, rows) = self.cells()?;
        let height = rows.saturating_mul(2);
        let frame = match self.spare.take() {
            Some(mut frame) => {
                frame.resize(cols, height);
                frame
            }
            None => Frame::new(cols, height),
        };
        Ok(Canvas::from_frame(frame))
    }

    fn end_present(&mut self, target: Canvas) -> Result<(), PresentError> {
        let frame = target.into_frame();
        encode_half_blocks(&frame, &mut self.output);
        self.spare = Some(frame);
        self.output.flush_to(&mut self.writer)?;
        Ok(())
    }
}

/// Encode a frame as rows of half-block cells.
fn encode_half_blocks(frame: &Frame, out: &mut OutputBuffer) {
    out.clear();
    for row in 0..frame.height().div_ceil(2) {
        out.cursor_move(0, row);
        let top = row * 2;
        for x in 0..frame.width() {
            out.set_fg(frame.get(x, top).unwrap_or(Rgb::BLACK));
            out.set_bg(frame.get(x, top + 1).unwrap_or(Rgb::BLACK));
            out.write_str(UPPER_HALF_BLOCK);
        }
    }
    out.reset_attrs();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::present;

    #[test]
    fn test_single_cell_encoding() {
        let mut frame = Frame::new(1, 2);
        frame.set(0, 0, Rgb::new(255, 0, 0));
        frame.set(0, 1, Rgb::new(0, 0, 255));

        let mut surface = TerminalSurface::with_writer(Vec::new(), 1, 1);
        present(&mut surface, &frame).unwrap();

        let expected = "\x1b[1;1H\x1b[38;2;255;0;0m\x1b[48;2;0;0;255m\u{2580}\x1b[0m";
        assert_eq!(surface.writer().as_slice(), expected.as_bytes());
    }

    #[test]
    fn test_pixel_height_is_twice_rows() {
        let mut surface = TerminalSurface::with_writer(Vec::new(), 3, 2);
        let bounds = present(&mut surface, &Frame::new(1, 1)).unwrap();
        assert_eq!((bounds.width, bounds.height), (3, 4));
    }

    #[test]
    fn test_same_colors_not_repeated() {
        let mut out = OutputBuffer::with_capacity(256);
        encode_half_blocks(&Frame::filled(3, 2, Rgb::WHITE), &mut out);
        let text = String::from_utf8(out.as_bytes().to_vec()).unwrap();
        assert_eq!(text.matches("\x1b[38;2;").count(), 1);
        assert_eq!(text.matches(UPPER_HALF_BLOCK).count(), 3);
    }

    #[test]
    fn test_zero_size_is_invalid() {
        let surface = TerminalSurface::with_writer(Vec::new(), 0, 10);
        assert!(!surface.is_valid());
    }
}
