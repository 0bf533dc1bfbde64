//! Array-backed binary min-heap keyed by a caller-supplied comparator.
//! This module exists so frontier ordering has a single deterministic
//! tie-break rule. It does not own distance bookkeeping or search policy.

use std::cmp::Ordering;
use std::mem;

const INITIAL_CAPACITY: usize = 11;

/// Binary min-heap over `T` ordered by `compare`. Equal elements come out in
/// an arbitrary but reproducible order fixed entirely by the sift mechanics:
/// sift-up moves an element toward the root only while strictly smaller than
/// its parent, and sift-down prefers the right child only when it is strictly
/// smaller than the left.
pub struct MinHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    items: Vec<T>,
    compare: C,
}

impl<T, C> MinHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: C) -> Self {
        Self { items: Vec::with_capacity(INITIAL_CAPACITY), compare }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the minimum element, or `None` if the heap is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.items.pop()?;
        if self.items.is_empty() {
            return Some(last);
        }
        let min = mem::replace(&mut self.items[0], last);
        self.sift_down(0);
        Some(min)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if (self.compare)(&self.items[idx], &self.items[parent]) != Ordering::Less {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            if left >= self.items.len() {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.items.len()
                && (self.compare)(&self.items[right], &self.items[left]) == Ordering::Less
            {
                child = right;
            }
            if (self.compare)(&self.items[child], &self.items[idx]) != Ordering::Less {
                break;
            }
            self.items.swap(idx, child);
            idx = child;
        }
    }
}
