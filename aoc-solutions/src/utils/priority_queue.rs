//! Min-priority queue with stable ordering for equal priorities

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry; ordering is reversed so `BinaryHeap` pops the smallest
/// priority, and the insertion sequence breaks ties first-in first-out.
#[derive(Debug)]
struct Entry<T, P> {
    priority: P,
    sequence: u64,
    item: T,
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A min-priority queue: [`pop`](PriorityQueue::pop) returns the item with
/// the lowest priority, and items pushed with equal priority come out in the
/// order they went in.
///
/// # Example
///
/// ```
/// use aoc_solutions::utils::priority_queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.push("far", 10);
/// queue.push("near", 1);
/// queue.push("also near", 1);
///
/// assert_eq!(queue.pop(), Some(("near", 1)));
/// assert_eq!(queue.pop(), Some(("also near", 1)));
/// assert_eq!(queue.pop(), Some(("far", 10)));
/// assert_eq!(queue.pop(), None);
/// ```
#[derive(Debug)]
pub struct PriorityQueue<T, P> {
    heap: BinaryHeap<Entry<T, P>>,
    next_sequence: u64,
}

impl<T, P: Ord> PriorityQueue<T, P> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, item: T, priority: P) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Entry {
            priority,
            sequence,
            item,
        });
    }

    /// Removes the lowest-priority item
    pub fn pop(&mut self) -> Option<(T, P)> {
        self.heap.pop().map(|entry| (entry.item, entry.priority))
    }

    pub fn peek(&self) -> Option<(&T, &P)> {
        self.heap.peek().map(|entry| (&entry.item, &entry.priority))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T, P: Ord> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> FromIterator<(T, P)> for PriorityQueue<T, P> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T, P: Ord> Extend<(T, P)> for PriorityQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (item, priority) in iter {
            self.push(item, priority);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue: PriorityQueue<char, u32> = [('b', 2), ('a', 1)].into_iter().collect();
        assert_eq!(queue.peek(), Some((&'a', &1)));
        assert_eq!(queue.len(), 2);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// **Feature: priority queue, Property 1: Pops are sorted and ties keep insertion order**
        #[test]
        fn prop_pops_in_order_with_fifo_ties(priorities in prop::collection::vec(0u8..8, 0..64)) {
            let mut queue: PriorityQueue<usize, u8> =
                priorities.iter().copied().enumerate().collect();

            let mut popped = Vec::new();
            while let Some(entry) = queue.pop() {
                popped.push(entry);
            }

            prop_assert_eq!(popped.len(), priorities.len());
            for pair in popped.windows(2) {
                let ((first_item, first_priority), (second_item, second_priority)) = (pair[0], pair[1]);
                prop_assert!(first_priority <= second_priority);
                if first_priority == second_priority {
                    prop_assert!(first_item < second_item);
                }
            }
        }
    }
}
