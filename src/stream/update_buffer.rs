use std::collections::VecDeque;

use crate::core::constants::stream::UPDATE_BUFFER_CAPACITY;
use crate::core::types::{PerformanceRecord, UpdateEvent};

/// Fixed-capacity list of live updates, newest first.
///
/// Repeated records for one campaign are kept as separate events until
/// they fall off the tail.
#[derive(Debug, Clone)]
pub struct UpdateBuffer {
    events: VecDeque<UpdateEvent>,
    capacity: usize,
}

impl UpdateBuffer {
    /// Capacity is clamped to `1..=10`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, UPDATE_BUFFER_CAPACITY);
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(UPDATE_BUFFER_CAPACITY)
    }

    /// Stamp and prepend a record, evicting from the tail past capacity
    pub fn push(&mut self, record: PerformanceRecord) -> &UpdateEvent {
        self.push_event(UpdateEvent::new(record))
    }

    pub fn push_event(&mut self, event: UpdateEvent) -> &UpdateEvent {
        self.events.push_front(event);
        self.events.truncate(self.capacity);
        &self.events[0]
    }

    /// Newest-first copy of the buffered events
    pub fn snapshot(&self) -> Vec<UpdateEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&UpdateEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for UpdateBuffer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
