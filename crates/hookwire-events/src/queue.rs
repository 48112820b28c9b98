//! Stable priority ordering of named entries.

use std::collections::HashMap;

use crate::error::{EventError, EventResult};

/// Orders names by ascending priority.
///
/// Names sharing a priority keep the order in which they were first added.
/// Overwriting a name changes its priority but not its insertion slot.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    /// `(name, priority)` in insertion order.
    entries: Vec<(String, i32)>,
    /// Name to slot in `entries`.
    slots: HashMap<String, usize>,
    /// Sorted names; `None` until `sort()` runs after the last `add()`.
    sorted: Option<Vec<String>>,
}

impl PriorityQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name or overwrite its priority. Invalidates the sorted order.
    pub fn add(&mut self, name: impl Into<String>, priority: i32) {
        let name = name.into();
        if let Some(&slot) = self.slots.get(&name) {
            if let Some(entry) = self.entries.get_mut(slot) {
                entry.1 = priority;
            }
        } else {
            self.slots.insert(name.clone(), self.entries.len());
            self.entries.push((name, priority));
        }
        self.sorted = None;
    }

    /// Sort entries by priority. Repeated calls yield the same order.
    pub fn sort(&mut self) {
        let mut ordered: Vec<&(String, i32)> = self.entries.iter().collect();
        // `sort_by_key` is stable, so ties stay in insertion order.
        ordered.sort_by_key(|(_, priority)| *priority);
        self.sorted = Some(ordered.into_iter().map(|(name, _)| name.clone()).collect());
    }

    /// Names in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidState`] if [`sort`](Self::sort) has not run
    /// since the last [`add`](Self::add).
    pub fn sorted_entities(&self) -> EventResult<&[String]> {
        self.sorted
            .as_deref()
            .ok_or(EventError::InvalidState("priority queue has not been sorted"))
    }

    /// Whether any entry is registered, sorted or not.
    #[must_use]
    pub fn has_entities(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Whether the sorted order is current.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sorted.is_some()
    }

    /// The priority recorded for a name.
    #[must_use]
    pub fn priority(&self, name: &str) -> Option<i32> {
        self.slots
            .get(name)
            .and_then(|&slot| self.entries.get(slot))
            .map(|(_, priority)| *priority)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(queue: &PriorityQueue) -> Vec<&str> {
        queue
            .sorted_entities()
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_sorted_before_sort_is_invalid_state() {
        let mut queue = PriorityQueue::new();
        assert!(matches!(
            queue.sorted_entities(),
            Err(EventError::InvalidState(_))
        ));

        queue.add("a", 1);
        queue.sort();
        assert!(queue.sorted_entities().is_ok());

        queue.add("b", 0);
        assert!(queue.sorted_entities().is_err());
    }

    #[test]
    fn test_ascending_priority() {
        let mut queue = PriorityQueue::new();
        queue.add("late", 10);
        queue.add("early", -5);
        queue.add("middle", 0);
        queue.sort();

        assert_eq!(sorted(&queue), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut queue = PriorityQueue::new();
        queue.add("n1", 3);
        queue.add("n2", 1);
        queue.add("n3", 3);
        queue.add("n4", 1);
        queue.add("n5", 3);
        queue.sort();

        assert_eq!(sorted(&queue), vec!["n2", "n4", "n1", "n3", "n5"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut queue = PriorityQueue::new();
        for (name, priority) in [("a", 1), ("b", 0), ("c", 1), ("d", 0)] {
            queue.add(name, priority);
        }
        queue.sort();
        let first: Vec<String> = queue.sorted_entities().unwrap().to_vec();
        queue.sort();
        let second: Vec<String> = queue.sorted_entities().unwrap().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn test_overwrite_keeps_slot() {
        let mut queue = PriorityQueue::new();
        queue.add("a", 5);
        queue.add("b", 1);
        queue.add("c", 1);
        queue.add("a", 1);
        queue.sort();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.priority("a"), Some(1));
        assert_eq!(sorted(&queue), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_has_entities_ignores_sort_state() {
        let mut queue = PriorityQueue::new();
        assert!(!queue.has_entities());
        assert!(queue.is_empty());

        queue.add("a", 0);
        assert!(queue.has_entities());
        assert!(!queue.is_sorted());
    }
}
