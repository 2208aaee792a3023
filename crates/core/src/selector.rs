//! Minimum-weight priority selection used during tree construction.
//!
//! [`PrioritySelector`] is a binary min-heap over `(weight, sequence)` keys.
//! The sequence number is assigned at insert time, so entries of equal weight
//! come out in insertion order. That makes tree shapes reproducible for a
//! given alphabet order.
//!
//! # Capacity
//!
//! Capacity is fixed at construction. Building a tree over `k` symbols starts
//! with `k` entries and every merge removes two and inserts one, so `k` is
//! always enough. Inserting past capacity is a logic error and is reported as
//! [`QueueError::Overflow`] instead of dropping the entry.

use crate::error::{Error, QueueError, Result};

#[derive(Debug, Clone)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    #[inline]
    fn key(&self) -> (u64, u64) {
        (self.weight, self.seq)
    }
}

/// Fixed-capacity min-priority queue with stable tie-breaking.
#[derive(Debug, Clone)]
pub struct PrioritySelector<T> {
    heap: Vec<Entry<T>>,
    capacity: usize,
    next_seq: u64,
}

impl<T> PrioritySelector<T> {
    /// Create an empty selector able to hold `capacity` entries.
    ///
    /// # Errors
    /// `Error::Allocation` if the backing storage cannot be reserved.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut heap = Vec::new();
        heap.try_reserve_exact(capacity).map_err(|_| Error::Allocation {
            what: "queue entries",
            requested: capacity,
        })?;

        Ok(Self {
            heap,
            capacity,
            next_seq: 0,
        })
    }

    /// Insert an item keyed by `weight`.
    ///
    /// # Errors
    /// `QueueError::Overflow` if the selector is full.
    pub fn insert(&mut self, weight: u64, item: T) -> Result<()> {
        if self.heap.len() == self.capacity {
            return Err(QueueError::Overflow {
                capacity: self.capacity,
            }
            .into());
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(Entry { weight, seq, item });
        self.sift_up(self.heap.len() - 1);
        Ok(())
    }

    /// Remove and return the lowest-weight entry as `(weight, item)`.
    ///
    /// # Errors
    /// `QueueError::Underflow` if the selector is empty.
    pub fn extract_min(&mut self) -> Result<(u64, T)> {
        if self.heap.is_empty() {
            return Err(QueueError::Underflow.into());
        }

        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop().ok_or(QueueError::Underflow)?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Ok((entry.weight, entry.item))
    }

    /// Weight of the entry `extract_min` would return next.
    pub fn peek_weight(&self) -> Option<u64> {
        self.heap.first().map(|e| e.weight)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].key() >= self.heap[parent].key() {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let l = 2 * i + 1;
            let r = l + 1;
            let mut smallest = i;

            if l < n && self.heap[l].key() < self.heap[smallest].key() {
                smallest = l;
            }
            if r < n && self.heap[r].key() < self.heap[smallest].key() {
                smallest = r;
            }
            if smallest == i {
                break;
            }

            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_extract_in_weight_order() {
        let mut queue = PrioritySelector::with_capacity(5).unwrap();
        for (w, name) in [(9, "b"), (5, "a"), (45, "f"), (13, "d"), (12, "c")] {
            queue.insert(w, name).unwrap();
        }

        let mut order = Vec::new();
        while !queue.is_empty() {
            order.push(queue.extract_min().unwrap().1);
        }
        assert_eq!(order, vec!["a", "b", "c", "d", "f"]);
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let mut queue = PrioritySelector::with_capacity(6).unwrap();
        for name in ["first", "second", "third"] {
            queue.insert(7, name).unwrap();
        }
        queue.insert(3, "light").unwrap();
        queue.insert(7, "fourth").unwrap();

        assert_eq!(queue.extract_min().unwrap(), (3, "light"));
        assert_eq!(queue.extract_min().unwrap(), (7, "first"));
        assert_eq!(queue.extract_min().unwrap(), (7, "second"));
        assert_eq!(queue.extract_min().unwrap(), (7, "third"));
        assert_eq!(queue.extract_min().unwrap(), (7, "fourth"));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut queue = PrioritySelector::with_capacity(2).unwrap();
        queue.insert(1, 'a').unwrap();
        queue.insert(2, 'b').unwrap();

        let result = queue.insert(3, 'c');
        assert!(matches!(
            result,
            Err(Error::Queue(QueueError::Overflow { capacity: 2 }))
        ));
        // Nothing was dropped or replaced
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek_weight(), Some(1));
    }

    #[test]
    fn test_underflow_is_an_error() {
        let mut queue: PrioritySelector<()> = PrioritySelector::with_capacity(1).unwrap();
        assert!(matches!(
            queue.extract_min(),
            Err(Error::Queue(QueueError::Underflow))
        ));
    }

    #[test]
    fn test_zero_capacity() {
        let mut queue = PrioritySelector::with_capacity(0).unwrap();
        assert!(queue.insert(1, ()).is_err());
        assert_eq!(queue.capacity(), 0);
    }

    #[test]
    fn test_monotonic_extraction_random() {
        // Interleave inserts and extracts; every extract must be >= the
        // previous one whenever nothing lighter was inserted in between.
        for seed in 0..20u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let n = rng.gen_range(1..200);
            let mut queue = PrioritySelector::with_capacity(n).unwrap();
            let mut weights: Vec<u64> = (0..n).map(|_| rng.gen_range(0..50)).collect();

            for (i, &w) in weights.iter().enumerate() {
                queue.insert(w, i).unwrap();
            }

            let mut extracted = Vec::with_capacity(n);
            while let Ok((w, _)) = queue.extract_min() {
                extracted.push(w);
            }

            weights.sort_unstable();
            assert_eq!(extracted, weights, "seed {}", seed);
        }
    }

    #[test]
    fn test_stable_among_equal_weights_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 300;
        let mut queue = PrioritySelector::with_capacity(n).unwrap();
        for i in 0..n {
            queue.insert(rng.gen_range(0..4), i).unwrap();
        }

        let mut last: Option<(u64, usize)> = None;
        while let Ok((w, i)) = queue.extract_min() {
            if let Some((lw, li)) = last {
                assert!(w > lw || (w == lw && i > li));
            }
            last = Some((w, i));
        }
    }
}
