//! Terminal module: A crossterm-backed host for the loop.
//!
//! This module contains:
//! - [`TerminalSession`]: Raw mode, alternate screen and mouse capture,
//!   restored on drop
//! - [`TerminalSurface`]: A [`Surface`](crate::Surface) drawing half-block cells
//! - [`TerminalInput`]: An input thread reporting the mouse as a contact

mod input;
mod output;
mod surface;

pub use input::{TerminalInput, TerminalSignal, MOUSE_POINTER_ID};
pub use output::OutputBuffer;
pub use surface::TerminalSurface;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Terminal state for the lifetime of an interactive session.
///
/// Entering switches to raw mode and the alternate screen, captures the
/// mouse and hides the cursor; dropping undoes all of it.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Prepare the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = Self { _private: () };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        Ok(session)
    }

    /// Current terminal size in cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Restore terminal state
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
