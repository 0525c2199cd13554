use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Queue entry ordered by (priority, insertion sequence), reversed so that
/// `BinaryHeap` pops the smallest priority first.
#[derive(Debug)]
struct Entry<V, P> {
    priority: P,
    sequence: u64,
    item: V,
}

impl<V, P: Ord> PartialEq for Entry<V, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V, P: Ord> Eq for Entry<V, P> {}

impl<V, P: Ord> PartialOrd for Entry<V, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V, P: Ord> Ord for Entry<V, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A min-priority queue over `BinaryHeap` for shortest path algorithms.
///
/// Items with equal priority come out in insertion order, which keeps every
/// run over the same input reproducible. Items themselves need no ordering.
#[derive(Debug)]
pub struct BinaryHeapWrapper<V, P>
where
    P: Ord + Copy + Debug,
{
    /// The underlying binary heap
    heap: BinaryHeap<Entry<V, P>>,
    /// Sequence number handed to the next pushed item
    next_sequence: u64,
}

impl<V, P> BinaryHeapWrapper<V, P>
where
    P: Ord + Copy + Debug,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        BinaryHeapWrapper {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Returns true if the priority queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of elements in the priority queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes an element with the given priority into the priority queue
    pub fn push(&mut self, item: V, priority: P) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Entry {
            priority,
            sequence,
            item,
        });
    }

    /// Removes the element with the smallest priority
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|entry| (entry.item, entry.priority))
    }

    /// Returns the element with the smallest priority without removing it
    pub fn peek(&self) -> Option<(&V, P)> {
        self.heap.peek().map(|entry| (&entry.item, entry.priority))
    }

    /// Clears the priority queue
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<V, P> Default for BinaryHeapWrapper<V, P>
where
    P: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
