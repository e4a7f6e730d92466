//! Touch paint: drag with the left mouse button to paint, `q` to quit.
//!
//! Wires the whole loop together on a terminal: the input thread reports the
//! mouse as a contact, the pacer drains it every tick, a looping animation
//! cycles the brush color and every press spawns a clamping ripple.

use crossbeam_channel::{bounded, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;
use touchloop::terminal::{TerminalInput, TerminalSession, TerminalSignal, TerminalSurface};
use touchloop::{
    Animation, ConfigError, Consumer, EventBatch, Frame, FramePacer, PointerKind, PointerTracker,
    Rect, Rgb,
};

/// An expanding square around a press.
struct Ripple {
    x: u16,
    y: u16,
    radius: Animation<u16>,
}

struct Paint {
    canvas: Frame,
    scene: Frame,
    brush: Animation<Rgb>,
    ripples: Vec<Ripple>,
    dirty: bool,
}

impl Paint {
    fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        let palette = vec![
            Rgb::from_u32(0xFF_55_00),
            Rgb::from_u32(0xFF_CC_00),
            Rgb::from_u32(0x33_DD_66),
            Rgb::from_u32(0x33_99_FF),
            Rgb::from_u32(0xAA_55_FF),
        ];
        Ok(Self {
            canvas: Frame::new(width, height),
            scene: Frame::new(width, height),
            brush: Animation::looping(2.5, palette)?,
            ripples: Vec::new(),
            dirty: true,
        })
    }

    fn paint(&mut self, x: u16, y: u16) {
        let color = *self.brush.current_frame();
        self.canvas.fill_rect(Rect::new(x, y, 1, 2), color);
    }

    fn compose(&mut self) {
        self.scene.clone_from(&self.canvas);
        for ripple in &self.ripples {
            let r = *ripple.radius.current_frame();
            let left = ripple.x.saturating_sub(r);
            let top = ripple.y.saturating_sub(r);
            let side = r * 2 + 1;
            let far = side - 1;
            let color = Rgb::WHITE;
            self.scene.fill_rect(Rect::new(left, top, side, 1), color);
            self.scene.fill_rect(Rect::new(left, top.saturating_add(far), side, 1), color);
            self.scene.fill_rect(Rect::new(left, top, 1, side), color);
            self.scene.fill_rect(Rect::new(left.saturating_add(far), top, 1, side), color);
        }
    }
}

impl Consumer for Paint {
    fn update(&mut self, delta: f32, events: &EventBatch) {
        self.brush.advance(delta);
        for ripple in &mut self.ripples {
            ripple.radius.advance(delta);
        }
        let before = self.ripples.len();
        self.ripples.retain(|ripple| !ripple.radius.is_ended());
        self.dirty |= before != self.ripples.len() || !self.ripples.is_empty();

        for event in events {
            let (Ok(x), Ok(y)) = (u16::try_from(event.x), u16::try_from(event.y)) else {
                continue;
            };
            match event.kind {
                PointerKind::Down => {
                    if let Ok(radius) = Animation::clamping(0.4, (0..6).collect()) {
                        self.ripples.push(Ripple { x, y, radius });
                    }
                    self.paint(x, y);
                }
                PointerKind::Dragged => self.paint(x, y),
                PointerKind::Up => {}
            }
            self.dirty = true;
        }
    }

    fn draw_request(&mut self) -> Option<&Frame> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.compose();
        Some(&self.scene)
    }

    fn surface_measured(&mut self, width: u16, height: u16) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.resize(width, height);
            self.scene.resize(width, height);
            self.dirty = true;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::try_init();

    let (cols, rows) = TerminalSession::size()?;
    let session = TerminalSession::enter()?;

    let tracker = Arc::new(PointerTracker::new());
    let (signal_tx, signal_rx) = bounded(16);
    let input = TerminalInput::spawn(Arc::clone(&tracker), signal_tx, Duration::from_millis(10))?;

    let consumer = Paint::new(cols, rows.saturating_mul(2))?;
    let mut pacer = FramePacer::new(consumer, TerminalSurface::new(), tracker);
    pacer.resume()?;

    loop {
        match signal_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(TerminalSignal::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            // The surface follows the terminal size on its own
            Ok(TerminalSignal::Resize { .. }) => {}
            Ok(TerminalSignal::Error(e)) => log::warn!("input error: {e}"),
            Err(RecvTimeoutError::Timeout) => {
                if !pacer.is_running() {
                    break;
                }
            }
        }
    }

    let result = pacer.pause();
    input.join();
    drop(session);
    result?;
    Ok(())
}
