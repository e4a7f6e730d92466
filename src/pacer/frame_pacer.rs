//! `FramePacer`: Dedicated thread running the update/draw loop.
//!
//! The loop is free-running: it ticks as fast as the surface accepts frames
//! and only sleeps when the consumer has nothing new to draw.

use super::consumer::Consumer;
use crate::config::LoopConfig;
use crate::error::{ConfigError, PacerError, PresentError};
use crate::input::{EventBatch, PointerTracker};
use crate::render::{present, Rect, Surface};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Everything the loop thread owns while running.
struct LoopParts<C, S> {
    consumer: C,
    surface: S,
    /// Read side of the tracker's double buffer.
    batch: EventBatch,
    /// Last bounds reported through `surface_measured`.
    measured: Option<Rect>,
}

/// What the loop thread hands back when it exits.
struct LoopExit<C, S> {
    parts: LoopParts<C, S>,
    result: Result<(), PresentError>,
}

struct RunningLoop<C, S> {
    handle: JoinHandle<LoopExit<C, S>>,
    /// Cleared to ask the loop to stop.
    running: Arc<AtomicBool>,
    /// Wakes the loop out of an idle sleep.
    wake: Sender<()>,
}

enum PacerState<C, S> {
    Stopped(LoopParts<C, S>),
    Running(RunningLoop<C, S>),
    /// The loop thread panicked or could not be spawned.
    Lost,
}

/// Paces "update, then draw" on its own thread.
///
/// The pacer is either stopped or running. [`FramePacer::resume`] spawns the
/// loop thread; [`FramePacer::pause`] stops it and waits for the current
/// iteration to finish, so nothing runs after `pause` returns.
pub struct FramePacer<C: Consumer + 'static, S: Surface + 'static> {
    tracker: Arc<PointerTracker>,
    idle_sleep: Duration,
    /// Ticks completed across all runs.
    ticks: Arc<AtomicU64>,
    state: PacerState<C, S>,
}

impl<C: Consumer + 'static, S: Surface + 'static> FramePacer<C, S> {
    /// Create a stopped pacer with the default idle sleep.
    pub fn new(consumer: C, surface: S, tracker: Arc<PointerTracker>) -> Self {
        Self::build(consumer, surface, tracker, LoopConfig::default().idle_sleep)
    }

    /// Create a stopped pacer with a custom configuration.
    ///
    /// The pool and slot settings belong to the tracker; the pacer uses the
    /// idle sleep.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(
        consumer: C,
        surface: S,
        tracker: Arc<PointerTracker>,
        config: &LoopConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(consumer, surface, tracker, config.idle_sleep))
    }

    fn build(consumer: C, surface: S, tracker: Arc<PointerTracker>, idle_sleep: Duration) -> Self {
        Self {
            tracker,
            idle_sleep,
            ticks: Arc::new(AtomicU64::new(0)),
            state: PacerState::Stopped(LoopParts {
                consumer,
                surface,
                batch: EventBatch::new(),
                measured: None,
            }),
        }
    }

    /// The tracker the loop drains every tick.
    pub fn tracker(&self) -> &Arc<PointerTracker> {
        &self.tracker
    }

    /// Check if the loop thread is alive.
    ///
    /// Turns `false` on its own when presentation fails; call
    /// [`FramePacer::pause`] to collect the error.
    pub fn is_running(&self) -> bool {
        matches!(&self.state, PacerState::Running(run) if !run.handle.is_finished())
    }

    /// Number of ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// The consumer, while the pacer is stopped.
    pub fn consumer(&self) -> Option<&C> {
        match &self.state {
            PacerState::Stopped(parts) => Some(&parts.consumer),
            _ => None,
        }
    }

    /// Mutable access to the consumer, while the pacer is stopped.
    pub fn consumer_mut(&mut self) -> Option<&mut C> {
        match &mut self.state {
            PacerState::Stopped(parts) => Some(&mut parts.consumer),
            _ => None,
        }
    }

    /// Start the loop thread.
    ///
    /// # Errors
    ///
    /// Returns [`PacerError::AlreadyRunning`] if the loop is running,
    /// [`PacerError::LoopPanicked`] if a previous run lost the consumer, and
    /// [`PacerError::Spawn`] if the thread cannot be created.
    pub fn resume(&mut self) -> Result<(), PacerError> {
        let parts = match std::mem::replace(&mut self.state, PacerState::Lost) {
            PacerState::Stopped(parts) => parts,
            running @ PacerState::Running(_) => {
                self.state = running;
                return Err(PacerError::AlreadyRunning);
            }
            PacerState::Lost => return Err(PacerError::LoopPanicked),
        };

        let running = Arc::new(AtomicBool::new(true));
        let (wake, wake_rx) = bounded(1);

        let ctx = LoopContext {
            tracker: Arc::clone(&self.tracker),
            running: Arc::clone(&running),
            wake: wake_rx,
            idle_sleep: self.idle_sleep,
            ticks: Arc::clone(&self.ticks),
        };

        let handle = thread::Builder::new()
            .name("touchloop-pacer".to_string())
            .spawn(move || ctx.run(parts))
            .map_err(PacerError::Spawn)?;

        log::debug!("frame pacer resumed");
        self.state = PacerState::Running(RunningLoop {
            handle,
            running,
            wake,
        });
        Ok(())
    }

    /// Stop the loop thread and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PacerError::NotRunning`] if the loop was never resumed,
    /// [`PacerError::Present`] if the loop had stopped on a presentation
    /// failure (the pacer is stopped and can be resumed), and
    /// [`PacerError::LoopPanicked`] if the consumer or surface panicked.
    pub fn pause(&mut self) -> Result<(), PacerError> {
        let run = match std::mem::replace(&mut self.state, PacerState::Lost) {
            PacerState::Running(run) => run,
            other => {
                self.state = other;
                return Err(PacerError::NotRunning);
            }
        };

        run.running.store(false, Ordering::Release);
        let _ = run.wake.try_send(());

        let exit = run.handle.join().map_err(|_| PacerError::LoopPanicked)?;
        log::debug!("frame pacer paused after {} ticks", self.tick_count());
        self.state = PacerState::Stopped(exit.parts);
        exit.result.map_err(PacerError::from)
    }

    /// Stop the loop if needed and give back the consumer and surface.
    ///
    /// Returns `None` if they were lost to a panic.
    pub fn into_parts(mut self) -> Option<(C, S)> {
        if matches!(self.state, PacerState::Running(_)) {
            if let Err(e) = self.pause() {
                log::warn!("frame pacer stopped with error: {e}");
            }
        }
        match std::mem::replace(&mut self.state, PacerState::Lost) {
            PacerState::Stopped(parts) => Some((parts.consumer, parts.surface)),
            _ => None,
        }
    }
}

impl<C: Consumer + 'static, S: Surface + 'static> Drop for FramePacer<C, S> {
    fn drop(&mut self) {
        if matches!(self.state, PacerState::Running(_)) {
            if let Err(e) = self.pause() {
                log::warn!("frame pacer stopped with error: {e}");
            }
        }
    }
}

/// Shared handles the loop thread runs with.
struct LoopContext {
    tracker: Arc<PointerTracker>,
    running: Arc<AtomicBool>,
    wake: Receiver<()>,
    idle_sleep: Duration,
    ticks: Arc<AtomicU64>,
}

impl LoopContext {
    /// Main pacing loop.
    fn run<C: Consumer, S: Surface>(self, mut parts: LoopParts<C, S>) -> LoopExit<C, S> {
        let mut last = Instant::now();

        while self.running.load(Ordering::Acquire) {
            // Surface loss is transient; poll until it comes back
            if !parts.surface.is_valid() {
                thread::yield_now();
                continue;
            }

            let now = Instant::now();
            let delta = now.duration_since(last).as_secs_f32();
            last = now;

            self.tracker.drain_events(&mut parts.batch);
            parts.consumer.update(delta, &parts.batch);

            match parts.consumer.draw_request() {
                None => {
                    // Nothing changed: idle, but let pause cut the sleep short
                    let _ = self.wake.recv_timeout(self.idle_sleep);
                }
                Some(frame) => match present(&mut parts.surface, frame) {
                    Ok(bounds) => {
                        if parts.measured != Some(bounds) {
                            parts.measured = Some(bounds);
                            parts.consumer.surface_measured(bounds.width, bounds.height);
                        }
                    }
                    Err(e) => {
                        log::error!("presentation failed, stopping frame pacer: {e}");
                        return LoopExit {
                            parts,
                            result: Err(e),
                        };
                    }
                },
            }

            self.ticks.fetch_add(1, Ordering::AcqRel);
        }

        LoopExit {
            parts,
            result: Ok(()),
        }
    }
}
