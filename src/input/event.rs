//! Pointer event records and the per-tick batch handed to consumers.

/// Discrete pointer primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    /// A contact touched down.
    #[default]
    Down,
    /// A contact lifted.
    Up,
    /// A pressed contact reported its position.
    Dragged,
}

/// One recorded pointer event.
///
/// Records are pooled: the tracker hands out the same heap allocations tick
/// after tick, so a record is only meaningful until the next drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// X coordinate in surface pixels.
    pub x: i32,
    /// Y coordinate in surface pixels.
    pub y: i32,
    /// Host-stable identifier of the contact.
    pub pointer_id: i32,
}

impl PointerEvent {
    /// Create a new event.
    #[inline]
    pub const fn new(kind: PointerKind, x: i32, y: i32, pointer_id: i32) -> Self {
        Self {
            kind,
            x,
            y,
            pointer_id,
        }
    }
}

/// The events recorded during one tick, in the order they were reported.
///
/// A batch is owned by the draining side. Passing it back to
/// [`PointerTracker::drain_events`](super::PointerTracker::drain_events)
/// returns its records to the tracker's pool and refills it with the next
/// tick's events.
#[derive(Default)]
pub struct EventBatch {
    pub(crate) records: Vec<Box<PointerEvent>>,
}

impl EventBatch {
    /// Create an empty batch.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of events in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the batch holds no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the event at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PointerEvent> {
        self.records.get(index).map(|record| &**record)
    }

    /// Iterate over the events in report order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PointerEvent> + '_ {
        self.records.iter().map(|record| &**record)
    }
}

impl<'a> IntoIterator for &'a EventBatch {
    type Item = &'a PointerEvent;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Box<PointerEvent>>,
        fn(&'a Box<PointerEvent>) -> &'a PointerEvent,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().map(unbox as fn(&'a Box<PointerEvent>) -> &'a PointerEvent)
    }
}

#[allow(clippy::borrowed_box)]
fn unbox(record: &Box<PointerEvent>) -> &PointerEvent {
    record
}

impl std::fmt::Debug for EventBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
