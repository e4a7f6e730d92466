//! `TerminalInput`: Dedicated thread for polling terminal events.
//!
//! The left mouse button acts as a single contact (id 0): press, drag and
//! release are reported to a [`PointerListener`] the way a touch host would.
//! Quit keys and resizes go to the application over a channel.

use crate::input::{Contact, HostEvent, PointerListener};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Id reported for the mouse contact.
pub const MOUSE_POINTER_ID: i32 = 0;

/// Non-pointer notifications from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalSignal {
    /// The user asked to quit (Esc, `q` or Ctrl+C).
    Quit,

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),
}

/// A terminal event after translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Translated {
    Down(Contact),
    Dragged(Contact),
    Up(Contact),
    Quit,
    Resize(u16, u16),
}

/// Input actor that feeds terminal mouse events to a pointer listener.
pub struct TerminalInput {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl TerminalInput {
    /// Spawn the input thread.
    ///
    /// # Arguments
    ///
    /// * `listener` - Receives pointer callbacks (usually the tracker).
    /// * `signals` - Channel for quit, resize and error notifications.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn<L>(
        listener: Arc<L>,
        signals: Sender<TerminalSignal>,
        poll_timeout: Duration,
    ) -> io::Result<Self>
    where
        L: PointerListener + Send + Sync + ?Sized + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("touchloop-input".to_string())
            .spawn(move || {
                Self::run_loop(&*listener, &signals, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop<L: PointerListener + ?Sized>(
        listener: &L,
        signals: &Sender<TerminalSignal>,
        shutdown: &AtomicBool,
        poll_timeout: Duration,
    ) {
        while !shutdown.load(Ordering::Relaxed) {
            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(translated) = translate(&event) {
                            if !dispatch(listener, signals, translated) {
                                // Receiver dropped, exit
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = signals.send(TerminalSignal::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    let _ = signals.send(TerminalSignal::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event. Cell (col, row) maps to pixel (col, 2 * row).
fn translate(event: &Event) -> Option<Translated> {
    match event {
        Event::Mouse(mouse) => {
            let contact = Contact::new(
                MOUSE_POINTER_ID,
                i32::from(mouse.column),
                i32::from(mouse.row) * 2,
            );
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Translated::Down(contact)),
                MouseEventKind::Drag(MouseButton::Left) => Some(Translated::Dragged(contact)),
                MouseEventKind::Up(MouseButton::Left) => Some(Translated::Up(contact)),
                _ => None,
            }
        }

        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Translated::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Translated::Quit)
            }
            _ => None,
        },

        Event::Resize(width, height) => Some(Translated::Resize(*width, *height)),

        _ => None,
    }
}

/// Deliver a translated event. Returns `false` once the signal receiver is gone.
fn dispatch<L: PointerListener + ?Sized>(
    listener: &L,
    signals: &Sender<TerminalSignal>,
    translated: Translated,
) -> bool {
    match translated {
        Translated::Down(contact) => listener.on_host_event(HostEvent::Down {
            index: 0,
            contact,
            pointer_count: 1,
        }),
        Translated::Dragged(contact) => listener.on_host_event(HostEvent::Move {
            contacts: std::slice::from_ref(&contact),
        }),
        // The lifting contact is still counted
        Translated::Up(contact) => listener.on_host_event(HostEvent::Up {
            index: 0,
            contact,
            pointer_count: 1,
        }),
        Translated::Quit => return signals.send(TerminalSignal::Quit).is_ok(),
        Translated::Resize(width, height) => {
            return signals
                .send(TerminalSignal::Resize { width, height })
                .is_ok()
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EventBatch, PointerKind, PointerTracker};
    use crossbeam_channel::bounded;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_translate_mouse() {
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 3)),
            Some(Translated::Down(Contact::new(MOUSE_POINTER_ID, 4, 6)))
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 3)),
            Some(Translated::Dragged(Contact::new(MOUSE_POINTER_ID, 5, 6)))
        );
        assert_eq!(translate(&mouse(MouseEventKind::Moved, 1, 1)), None);
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            None
        );
    }

    #[test]
    fn test_translate_keys_and_resize() {
        let quit = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(translate(&quit), Some(Translated::Quit));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_c), Some(Translated::Quit));

        let plain_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(translate(&plain_c), None);

        assert_eq!(translate(&Event::Resize(80, 24)), Some(Translated::Resize(80, 24)));
    }

    #[test]
    fn test_dispatch_feeds_tracker() {
        let tracker = PointerTracker::new();
        let (tx, rx) = bounded(4);

        let press = Contact::new(MOUSE_POINTER_ID, 2, 2);
        let drag = Contact::new(MOUSE_POINTER_ID, 3, 4);
        assert!(dispatch(&tracker, &tx, Translated::Down(press)));
        assert!(dispatch(&tracker, &tx, Translated::Dragged(drag)));
        assert!(tracker.is_down(MOUSE_POINTER_ID));
        assert!(dispatch(&tracker, &tx, Translated::Up(drag)));
        assert!(!tracker.is_down(MOUSE_POINTER_ID));

        let mut batch = EventBatch::new();
        tracker.drain_events(&mut batch);
        let kinds: Vec<_> = batch.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![PointerKind::Down, PointerKind::Dragged, PointerKind::Up]
        );

        assert!(dispatch(&tracker, &tx, Translated::Quit));
        assert_eq!(rx.try_recv(), Ok(TerminalSignal::Quit));

        drop(rx);
        assert!(!dispatch(&tracker, &tx, Translated::Resize(1, 1)));
    }
}
