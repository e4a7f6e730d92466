//! Host input adapter contract.
//!
//! Hosts report pointer activity the way multi-touch platforms do: every
//! callback names the contact it is about by its index in the host's list of
//! currently pressed contacts, and says how many contacts are pressed in
//! total. A move callback carries the position of every pressed contact.

/// One contact as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    /// Host-stable identifier of the contact.
    pub id: i32,
    /// X coordinate in surface pixels.
    pub x: i32,
    /// Y coordinate in surface pixels.
    pub y: i32,
}

impl Contact {
    /// Create a new contact.
    #[inline]
    pub const fn new(id: i32, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }
}

/// A decoded host pointer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent<'a> {
    /// A contact touched down.
    Down {
        /// Index of the contact in the host's pressed list.
        index: usize,
        /// The contact.
        contact: Contact,
        /// Number of contacts the host currently reports.
        pointer_count: usize,
    },

    /// A contact lifted.
    Up {
        /// Index of the contact in the host's pressed list.
        index: usize,
        /// The contact.
        contact: Contact,
        /// Number of contacts the host currently reports, including the one
        /// lifting.
        pointer_count: usize,
    },

    /// The host reported the position of every pressed contact; the slice
    /// position is the contact's index.
    Move {
        /// All pressed contacts.
        contacts: &'a [Contact],
    },
}

/// Receiver of host pointer callbacks, one method per callback kind.
pub trait PointerListener {
    /// A contact touched down.
    fn pointer_down(&self, index: usize, contact: Contact, pointer_count: usize);

    /// A contact lifted.
    fn pointer_up(&self, index: usize, contact: Contact, pointer_count: usize);

    /// Every pressed contact reported its position.
    fn pointers_moved(&self, contacts: &[Contact]);

    /// Route a decoded host event to the matching method.
    fn on_host_event(&self, event: HostEvent<'_>) {
        match event {
            HostEvent::Down {
                index,
                contact,
                pointer_count,
            } => self.pointer_down(index, contact, pointer_count),
            HostEvent::Up {
                index,
                contact,
                pointer_count,
            } => self.pointer_up(index, contact, pointer_count),
            HostEvent::Move { contacts } => self.pointers_moved(contacts),
        }
    }
}
