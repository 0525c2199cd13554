//! Persistent leftist min-heap.
//!
//! Nodes are immutable and reference counted. `insert` returns a new heap that
//! shares every subtree it did not touch with the heap it was called on, so any
//! number of handles can point into the same structure and none of them ever
//! observes a change. Insertion only walks the right spine, whose length is
//! bounded by the rank, so the recursion depth is O(log n).

use std::rc::Rc;

/// An immutable heap node.
#[derive(Debug)]
pub struct HeapNode<K, T> {
    rank: usize,
    key: K,
    value: T,
    left: LeftistHeap<K, T>,
    right: LeftistHeap<K, T>,
}

impl<K, T> HeapNode<K, T> {
    /// Length of the right spine below and including this node
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> &LeftistHeap<K, T> {
        &self.left
    }

    pub fn right(&self) -> &LeftistHeap<K, T> {
        &self.right
    }
}

/// Handle to a (possibly empty) persistent leftist heap. Cloning is O(1).
#[derive(Debug)]
pub struct LeftistHeap<K, T> {
    root: Option<Rc<HeapNode<K, T>>>,
}

impl<K, T> Clone for LeftistHeap<K, T> {
    fn clone(&self) -> Self {
        LeftistHeap {
            root: self.root.clone(),
        }
    }
}

impl<K, T> Default for LeftistHeap<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> LeftistHeap<K, T> {
    /// Creates an empty heap
    pub fn new() -> Self {
        LeftistHeap { root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The node holding the minimum key
    pub fn root(&self) -> Option<&Rc<HeapNode<K, T>>> {
        self.root.as_ref()
    }

    pub fn rank(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.rank)
    }

    /// True when both handles point at the very same root node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Number of nodes reachable from this handle
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order traversal of the nodes reachable from this handle
    pub fn iter(&self) -> Iter<'_, K, T> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }
}

impl<K, T> LeftistHeap<K, T>
where
    K: Ord + Clone,
    T: Clone,
{
    /// Returns a new heap containing every element of `self` plus (key, value).
    /// `self` is left untouched.
    pub fn insert(&self, key: K, value: T) -> Self {
        LeftistHeap {
            root: Some(insert_node(self, key, value)),
        }
    }
}

fn insert_node<K, T>(heap: &LeftistHeap<K, T>, key: K, value: T) -> Rc<HeapNode<K, T>>
where
    K: Ord + Clone,
    T: Clone,
{
    match heap.root.as_ref() {
        Some(node) if key >= node.key => {
            let mut left = node.left.clone();
            let mut right = LeftistHeap {
                root: Some(insert_node(&node.right, key, value)),
            };
            if left.rank() < right.rank() {
                std::mem::swap(&mut left, &mut right);
            }
            Rc::new(HeapNode {
                rank: right.rank() + 1,
                key: node.key.clone(),
                value: node.value.clone(),
                left,
                right,
            })
        }
        _ => Rc::new(HeapNode {
            rank: 1,
            key,
            value,
            left: heap.clone(),
            right: LeftistHeap::new(),
        }),
    }
}

/// Iterator over heap nodes, see [`LeftistHeap::iter`]
pub struct Iter<'a, K, T> {
    stack: Vec<&'a HeapNode<K, T>>,
}

impl<'a, K, T> Iterator for Iter<'a, K, T> {
    type Item = &'a HeapNode<K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right.root.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.root.as_deref() {
            self.stack.push(left);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_invariants(heap: &LeftistHeap<u32, char>) {
        for node in heap.iter() {
            assert!(node.left().rank() >= node.right().rank(), "leftist property violated");
            assert_eq!(node.rank(), node.right().rank() + 1);
            for child in [node.left(), node.right()] {
                if let Some(child) = child.root() {
                    assert!(child.key() >= node.key(), "heap order violated");
                }
            }
        }
    }

    fn sorted_keys(heap: &LeftistHeap<u32, char>) -> Vec<u32> {
        let mut keys: Vec<u32> = heap.iter().map(|node| *node.key()).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_root_is_minimum() {
        let mut heap = LeftistHeap::new();
        for (key, value) in [(5, 'e'), (3, 'c'), (8, 'h'), (1, 'a'), (4, 'd')] {
            heap = heap.insert(key, value);
            check_invariants(&heap);
        }
        let root = heap.root().unwrap();
        assert_eq!(*root.key(), 1);
        assert_eq!(*root.value(), 'a');
        assert_eq!(heap.len(), 5);
    }

    #[test]
    fn test_insert_does_not_disturb_older_versions() {
        let base = LeftistHeap::new().insert(2, 'b').insert(7, 'g').insert(4, 'd');
        let captured = base.clone();

        let grown = base.insert(1, 'a').insert(9, 'i').insert(3, 'c');
        check_invariants(&grown);

        assert!(captured.ptr_eq(&base));
        assert_eq!(sorted_keys(&captured), vec![2, 4, 7]);
        assert_eq!(*captured.root().unwrap().key(), 2);
        assert_eq!(sorted_keys(&grown), vec![1, 2, 3, 4, 7, 9]);
    }

    #[test]
    fn test_siblings_share_parent_structure() {
        let parent = LeftistHeap::new().insert(10, 'p').insert(20, 'q');
        let left_child = parent.insert(5, 'x');
        let right_child = parent.insert(30, 'y');

        // A smaller key becomes the new root and keeps the parent heap whole.
        assert!(left_child.root().unwrap().left().ptr_eq(&parent));
        assert_eq!(sorted_keys(&right_child), vec![10, 20, 30]);
        assert_eq!(sorted_keys(&parent), vec![10, 20]);
    }

    #[test]
    fn test_equal_keys_are_all_kept() {
        let mut heap = LeftistHeap::new();
        for value in ['a', 'b', 'c', 'd'] {
            heap = heap.insert(0, value);
        }
        check_invariants(&heap);
        assert_eq!(heap.len(), 4);
        assert_eq!(*heap.root().unwrap().value(), 'a');
    }

    #[test]
    fn test_rank_stays_logarithmic() {
        let mut heap = LeftistHeap::new();
        for key in 0..1024u32 {
            heap = heap.insert(key, 'z');
        }
        check_invariants(&heap);
        assert!(heap.rank() <= 11);
    }
}
