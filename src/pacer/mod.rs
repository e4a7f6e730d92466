//! Pacer: The update/draw loop and its consumer contract.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  PointerListener   ┌────────────────┐
//! │ Host input   │ ─────────────────▶ │ PointerTracker │
//! └──────────────┘                    └────────────────┘
//!                                             │ drain_events
//!                                             ▼
//!                                     ┌──────────────┐  update / draw_request  ┌──────────┐
//!                                     │ Pacer thread │ ──────────────────────▶ │ Consumer │
//!                                     └──────────────┘                         └──────────┘
//!                                             │ present
//!                                             ▼
//!                                     ┌──────────────┐
//!                                     │   Surface    │
//!                                     └──────────────┘
//! ```

mod consumer;
mod frame_pacer;

pub use consumer::Consumer;
pub use frame_pacer::FramePacer;
