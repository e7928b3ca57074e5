//! Min-priority queue of pending search nodes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// The ordering key: lower `priority` first, then older `creation_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierKey {
    priority: usize,
    creation_order: u64,
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
struct Entry<T> {
    key: FrontierKey,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest key is on top.
        other.key.cmp(&self.key)
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Hands back items in ascending priority (the search's `f = g + h`). Items pushed with
/// equal priority come back in insertion order, which keeps searches reproducible.
#[derive(Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<Entry<T>>,
    next_order: u64,
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            next_order: 0,
        }
    }

    pub fn push(&mut self, priority: usize, item: T) {
        let key = FrontierKey {
            priority,
            creation_order: self.next_order,
        };
        self.next_order += 1;
        self.heap.push(Entry { key, item });
    }

    /// Removes the item with the lowest priority, returning it with that priority.
    pub fn pop(&mut self) -> Option<(usize, T)> {
        self.heap.pop().map(|entry| (entry.key.priority, entry.item))
    }

    pub fn peek_priority(&self) -> Option<usize> {
        self.heap.peek().map(|entry| entry.key.priority)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}
