//! Handlers registered at a single position.

use std::collections::HashMap;

use crate::descriptor::HandlerDescriptor;
use crate::queue::PriorityQueue;

/// The descriptors registered at one position, sorted lazily.
#[derive(Debug, Clone, Default)]
pub struct EventBag {
    entries: HashMap<String, HandlerDescriptor>,
    queue: PriorityQueue,
    is_sorted: bool,
}

impl EventBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its handler id, replacing any earlier one.
    pub fn add(&mut self, descriptor: HandlerDescriptor, priority: i32) {
        self.queue.add(descriptor.handler_id.clone(), priority);
        self.entries.insert(descriptor.handler_id.clone(), descriptor);
        self.is_sorted = false;
    }

    /// Whether any handler is registered. Sorts first if needed.
    pub fn has_events(&mut self) -> bool {
        self.sort();
        self.queue.has_entities()
    }

    /// Descriptors in priority order. Sorts first if needed.
    pub fn events(&mut self) -> Vec<&HandlerDescriptor> {
        self.sort();
        let order = self.queue.sorted_entities().unwrap_or_default();
        order
            .iter()
            .filter_map(|handler_id| self.entries.get(handler_id))
            .collect()
    }

    /// Whether the sorted order is current.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.is_sorted
    }

    /// Whether a handler id is registered here.
    #[must_use]
    pub fn contains(&self, handler_id: &str) -> bool {
        self.entries.contains_key(handler_id)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sort(&mut self) {
        if !self.is_sorted {
            self.queue.sort();
            self.is_sorted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(bag: &mut EventBag) -> Vec<String> {
        bag.events()
            .into_iter()
            .map(|d| d.handler_id.clone())
            .collect()
    }

    #[test]
    fn test_empty_bag() {
        let mut bag = EventBag::new();
        assert!(!bag.has_events());
        assert!(bag.events().is_empty());
    }

    #[test]
    fn test_add_marks_unsorted() {
        let mut bag = EventBag::new();
        bag.add(HandlerDescriptor::new("p", "a", "run"), 0);
        assert!(!bag.is_sorted());

        assert!(bag.has_events());
        assert!(bag.is_sorted());

        bag.add(HandlerDescriptor::new("p", "b", "run"), 0);
        assert!(!bag.is_sorted());
    }

    #[test]
    fn test_events_in_priority_order() {
        let mut bag = EventBag::new();
        bag.add(HandlerDescriptor::new("p", "slow", "run"), 10);
        bag.add(HandlerDescriptor::new("p", "fast", "run"), -1);
        bag.add(HandlerDescriptor::new("p", "normal", "run"), 0);

        assert_eq!(ids(&mut bag), vec!["fast", "normal", "slow"]);
    }

    #[test]
    fn test_readd_overwrites_descriptor() {
        let mut bag = EventBag::new();
        bag.add(HandlerDescriptor::new("p", "a", "first"), 1);
        bag.add(HandlerDescriptor::new("p", "b", "run"), 2);
        bag.add(HandlerDescriptor::new("p", "a", "second"), 3);

        assert_eq!(bag.len(), 2);
        let events = bag.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].handler_id, "b");
        assert_eq!(events[1].entry_point, "second");
    }
}
