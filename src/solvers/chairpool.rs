use std::{cmp::Reverse, collections::BinaryHeap};

use crate::problem::ChairId;

/// Unoccupied chairs, handing out the lowest-numbered one first.
pub struct ChairPool {
    free: BinaryHeap<Reverse<ChairId>>,
    capacity: usize,
}

impl ChairPool {
    pub fn new(capacity: usize) -> Self {
        ChairPool {
            free: (0..capacity).map(|c| Reverse(ChairId::from(c))).collect(),
            capacity,
        }
    }

    pub fn take(&mut self) -> Option<ChairId> {
        self.free.pop().map(|Reverse(c)| c)
    }

    pub fn release(&mut self, chair: ChairId) {
        debug_assert!(usize::from(chair) < self.capacity);
        self.free.push(Reverse(chair));
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
