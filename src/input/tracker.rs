//! `PointerTracker`: Pointer state and the double-buffered event queue.
//!
//! The host's input thread writes, the pacer thread drains:
//!
//! ```text
//! host callback ──▶ pending (write side) ──drain──▶ EventBatch (read side)
//!                        ▲                               │
//!                        └──────── ObjectPool ◀──────────┘
//!                                  (next drain)
//! ```
//!
//! # Locking
//!
//! Every public method acquires the tracker's single lock for its full body.
//! Inside the lock nothing blocks and the only allocation-like work is an
//! O(1) pool acquire or release.

use super::event::{EventBatch, PointerEvent, PointerKind};
use super::host::{Contact, PointerListener};
use crate::config::LoopConfig;
use crate::error::ConfigError;
use crate::pool::ObjectPool;
use parking_lot::Mutex;

type RecordPool = ObjectPool<Box<PointerEvent>>;

/// State of one contact slot.
#[derive(Debug, Clone, Copy, Default)]
struct PointerSlot {
    active: bool,
    last_x: i32,
    last_y: i32,
    /// Id of the contact occupying the slot.
    host_id: Option<i32>,
}

impl PointerSlot {
    fn clear(&mut self) {
        self.active = false;
        self.host_id = None;
    }
}

struct TrackerState {
    slots: Vec<PointerSlot>,
    pool: RecordPool,
    /// Events recorded since the last drain.
    pending: Vec<Box<PointerEvent>>,
}

impl TrackerState {
    fn record(&mut self, kind: PointerKind, index: usize, contact: Contact) {
        let mut record = self.pool.acquire();
        *record = PointerEvent::new(kind, contact.x, contact.y, contact.id);
        self.pending.push(record);

        if index >= self.slots.len() {
            log::warn!(
                "pointer {} reported at index {index}, beyond {} tracked slots",
                contact.id,
                self.slots.len()
            );
            return;
        }

        // Host indices shift when a lower contact lifts; keep one slot per id.
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if i != index && slot.host_id == Some(contact.id) {
                slot.clear();
            }
        }

        let slot = &mut self.slots[index];
        slot.active = kind != PointerKind::Up;
        slot.last_x = contact.x;
        slot.last_y = contact.y;
        slot.host_id = Some(contact.id);
    }

    /// Implicit lift-off of every slot past the host's reported count.
    ///
    /// Trailing contacts are released without an `Up` event. Kept for
    /// compatibility with hosts that drop contacts silently; revisit if the
    /// host input model changes.
    fn clear_trailing(&mut self, pointer_count: usize) {
        let start = pointer_count.min(self.slots.len());
        for slot in &mut self.slots[start..] {
            slot.clear();
        }
    }

    fn find(&self, pointer_id: i32) -> Option<&PointerSlot> {
        self.slots
            .iter()
            .find(|slot| slot.host_id == Some(pointer_id))
    }
}

fn new_record() -> Box<PointerEvent> {
    Box::default()
}

/// Tracks which contacts are down and queues their events for the pacer.
///
/// All public methods acquire one lock for their full body, so the host's
/// input thread and the pacer thread can share a tracker behind an `Arc`.
/// Only one thread may drain.
pub struct PointerTracker {
    state: Mutex<TrackerState>,
}

impl PointerTracker {
    /// Create a tracker with the default configuration.
    pub fn new() -> Self {
        Self::build(&LoopConfig::default())
    }

    /// Create a tracker with a custom pool capacity and slot count.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool capacity or the slot count is zero.
    pub fn with_config(config: &LoopConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &LoopConfig) -> Self {
        let pool = ObjectPool::new(
            new_record as fn() -> Box<PointerEvent>,
            config.pool_capacity.max(1),
        )
        .unwrap_or_else(|_| unreachable!("pool capacity is clamped to at least one"));

        Self {
            state: Mutex::new(TrackerState {
                slots: vec![PointerSlot::default(); config.max_pointers],
                pool,
                pending: Vec::with_capacity(config.pool_capacity),
            }),
        }
    }

    /// Check whether the contact with `pointer_id` is currently pressed.
    pub fn is_down(&self, pointer_id: i32) -> bool {
        let state = self.state.lock();
        state.find(pointer_id).is_some_and(|slot| slot.active)
    }

    /// Last known position of the contact, or `(0, 0)` if it is unknown.
    pub fn position_of(&self, pointer_id: i32) -> (i32, i32) {
        let state = self.state.lock();
        state
            .find(pointer_id)
            .map_or((0, 0), |slot| (slot.last_x, slot.last_y))
    }

    /// Hand the events recorded since the previous drain to `batch`.
    ///
    /// The records `batch` held from the previous tick go back to the pool
    /// first, then the pending events move into it and the write side starts
    /// empty. Events arrive in the order they were reported.
    pub fn drain_events(&self, batch: &mut EventBatch) {
        let mut state = self.state.lock();
        let state = &mut *state;

        for record in batch.records.drain(..) {
            state.pool.release(record);
        }
        std::mem::swap(&mut batch.records, &mut state.pending);

        log::trace!("drained {} pointer events", batch.records.len());
    }

    /// Number of events waiting for the next drain.
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Number of free records in the event pool.
    pub fn pooled_len(&self) -> usize {
        self.state.lock().pool.free_len()
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerListener for PointerTracker {
    fn pointer_down(&self, index: usize, contact: Contact, pointer_count: usize) {
        let mut state = self.state.lock();
        state.record(PointerKind::Down, index, contact);
        state.clear_trailing(pointer_count);
    }

    fn pointer_up(&self, index: usize, contact: Contact, pointer_count: usize) {
        let mut state = self.state.lock();
        state.record(PointerKind::Up, index, contact);
        state.clear_trailing(pointer_count);
    }

    fn pointers_moved(&self, contacts: &[Contact]) {
        let mut state = self.state.lock();
        for (index, contact) in contacts.iter().enumerate() {
            state.record(PointerKind::Dragged, index, *contact);
        }
        state.clear_trailing(contacts.len());
    }
}

impl std::fmt::Debug for PointerTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PointerTracker")
            .field("slots", &state.slots)
            .field("pending", &state.pending.len())
            .field("pool", &state.pool)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HostEvent;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn kinds(batch: &EventBatch) -> Vec<(PointerKind, i32)> {
        batch.iter().map(|e| (e.kind, e.pointer_id)).collect()
    }

    #[test]
    fn test_unknown_pointer_defaults() {
        let tracker = PointerTracker::new();
        assert!(!tracker.is_down(3));
        assert_eq!(tracker.position_of(3), (0, 0));
    }

    #[test]
    fn test_with_config_rejects_zero_slots() {
        let config = LoopConfig::default().with_max_pointers(0);
        assert!(matches!(
            PointerTracker::with_config(&config),
            Err(ConfigError::ZeroPointerSlots)
        ));
    }

    #[test]
    fn test_down_up_state() {
        let tracker = PointerTracker::new();
        tracker.pointer_down(0, Contact::new(7, 10, 20), 1);
        assert!(tracker.is_down(7));
        assert_eq!(tracker.position_of(7), (10, 20));

        tracker.pointer_up(0, Contact::new(7, 12, 22), 1);
        assert!(!tracker.is_down(7));
        assert_eq!(tracker.position_of(7), (12, 22));
    }

    #[test]
    fn test_batch_preserves_call_order() {
        let tracker = PointerTracker::new();
        tracker.on_host_event(HostEvent::Down {
            index: 0,
            contact: Contact::new(1, 0, 0),
            pointer_count: 1,
        });
        tracker.on_host_event(HostEvent::Down {
            index: 1,
            contact: Contact::new(2, 5, 5),
            pointer_count: 2,
        });
        tracker.on_host_event(HostEvent::Move {
            contacts: &[Contact::new(1, 1, 1), Contact::new(2, 6, 6)],
        });
        tracker.on_host_event(HostEvent::Up {
            index: 0,
            contact: Contact::new(1, 1, 1),
            pointer_count: 2,
        });

        let mut batch = EventBatch::new();
        tracker.drain_events(&mut batch);
        assert_eq!(
            kinds(&batch),
            vec![
                (PointerKind::Down, 1),
                (PointerKind::Down, 2),
                (PointerKind::Dragged, 1),
                (PointerKind::Dragged, 2),
                (PointerKind::Up, 1),
            ]
        );
        assert_eq!(batch.get(3).map(|e| (e.x, e.y)), Some((6, 6)));
    }

    #[test]
    fn test_move_records_every_pressed_pointer() {
        let tracker = PointerTracker::new();
        let contacts = [
            Contact::new(4, 0, 0),
            Contact::new(5, 0, 0),
            Contact::new(6, 0, 0),
        ];
        for (i, contact) in contacts.iter().enumerate() {
            tracker.pointer_down(i, *contact, i + 1);
        }
        tracker.pointers_moved(&contacts);
        tracker.pointers_moved(&contacts[..2]);

        // 3 downs + 3 drags + 2 drags
        let mut batch = EventBatch::new();
        tracker.drain_events(&mut batch);
        assert_eq!(batch.len(), 3 + 3 + 2);
    }

    #[test]
    fn test_empty_drains_stay_empty() {
        let tracker = PointerTracker::new();
        let mut batch = EventBatch::new();
        tracker.drain_events(&mut batch);
        assert!(batch.is_empty());
        tracker.drain_events(&mut batch);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_no_redelivery() {
        let tracker = PointerTracker::new();
        let mut batch = EventBatch::new();

        tracker.pointer_down(0, Contact::new(1, 3, 4), 1);
        tracker.drain_events(&mut batch);
        assert_eq!(batch.len(), 1);

        tracker.drain_events(&mut batch);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_drain_recycles_records() {
        let tracker = PointerTracker::new();
        let mut batch = EventBatch::new();

        for i in 0..5 {
            tracker.pointer_down(0, Contact::new(i, i, i), 1);
        }
        tracker.drain_events(&mut batch);
        assert_eq!(tracker.pooled_len(), 0);

        tracker.drain_events(&mut batch);
        assert_eq!(tracker.pooled_len(), 5);

        // Recording reuses the pooled records
        tracker.pointer_down(0, Contact::new(9, 1, 1), 1);
        assert_eq!(tracker.pooled_len(), 4);
        assert_eq!(tracker.pending_len(), 1);
    }

    #[test]
    fn test_trailing_pointer_cleared_without_up() {
        let tracker = PointerTracker::new();
        tracker.pointer_down(0, Contact::new(1, 0, 0), 1);
        tracker.pointer_down(1, Contact::new(2, 50, 50), 2);
        assert!(tracker.is_down(2));

        let mut batch = EventBatch::new();
        tracker.drain_events(&mut batch);

        tracker.pointers_moved(&[Contact::new(1, 3, 3)]);
        assert!(tracker.is_down(1));
        assert!(!tracker.is_down(2));
        assert_eq!(tracker.position_of(2), (0, 0));

        tracker.drain_events(&mut batch);
        assert_eq!(kinds(&batch), vec![(PointerKind::Dragged, 1)]);
    }

    #[test]
    fn test_shifted_index_keeps_one_slot_per_id() {
        let tracker = PointerTracker::new();
        tracker.pointer_down(0, Contact::new(1, 0, 0), 1);
        tracker.pointer_down(1, Contact::new(2, 9, 9), 2);
        tracker.pointer_up(0, Contact::new(1, 0, 0), 2);

        // Contact 2 moves down to index 0 once contact 1 is gone
        tracker.pointers_moved(&[Contact::new(2, 8, 8)]);
        assert!(tracker.is_down(2));
        assert_eq!(tracker.position_of(2), (8, 8));
        assert!(!tracker.is_down(1));
    }

    #[test]
    fn test_index_beyond_slots_still_recorded() {
        let config = LoopConfig::default().with_max_pointers(2);
        let tracker = PointerTracker::with_config(&config).unwrap();
        tracker.pointer_down(5, Contact::new(11, 1, 1), 6);
        assert!(!tracker.is_down(11));
        assert_eq!(tracker.pending_len(), 1);
    }

    #[test]
    fn test_concurrent_writers_single_drainer() {
        const WRITERS: i32 = 8;
        const EVENTS_PER_WRITER: i32 = 2_000;

        let tracker = Arc::new(PointerTracker::new());
        let finished = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let tracker = Arc::clone(&tracker);
                let finished = Arc::clone(&finished);
                thread::spawn(move || {
                    for seq in 0..EVENTS_PER_WRITER {
                        tracker.pointer_down(0, Contact::new(writer, seq, 0), 1);
                    }
                    finished.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        let mut batch = EventBatch::new();
        let mut last_seq = vec![-1; WRITERS as usize];
        let mut total = 0usize;
        let mut check = |batch: &EventBatch| {
            for event in batch {
                let last = &mut last_seq[event.pointer_id as usize];
                assert!(event.x > *last, "writer {} reordered", event.pointer_id);
                *last = event.x;
                total += 1;
            }
        };

        while finished.load(Ordering::SeqCst) < WRITERS as usize {
            tracker.drain_events(&mut batch);
            check(&batch);
        }
        for handle in handles {
            handle.join().unwrap();
        }
        tracker.drain_events(&mut batch);
        check(&batch);

        assert_eq!(total, (WRITERS * EVENTS_PER_WRITER) as usize);
        assert!(last_seq.iter().all(|&seq| seq == EVENTS_PER_WRITER - 1));
        assert!(tracker.pooled_len() <= 100);
    }
}
