//! Circular queue - FIFO on a growable ring buffer
//!
//! `head` is the slot of the oldest element and `len` the number of occupied
//! slots; the tail slot is derived from both. When an enqueue finds the ring
//! full, the elements are re-laid from head to tail starting at slot 0 of a
//! larger buffer, so FIFO order survives every resize. Capacity never shrinks.

use crate::value::Value;
use ember_config::collections::{MAX_GROWTH_FACTOR, MAX_INITIAL_CAPACITY, MIN_GROWTH_FACTOR};
use ember_config::QueueConfig;
use std::mem;

/// FIFO queue on a ring buffer with amortized O(1) enqueue/dequeue
#[derive(Debug, Clone)]
pub struct DsQueue {
    slots: Vec<Option<Value>>,
    head: usize,
    len: usize,
    growth_factor: f64,
}

impl DsQueue {
    /// Create a queue with the default capacity and growth policy
    pub fn new() -> Self {
        Self::with_config(&QueueConfig::default())
    }

    /// Create a queue from configuration.
    ///
    /// Capacity and growth factor are clamped to the ranges that
    /// [`QueueConfig::validate`] accepts, so an unvalidated config still
    /// yields a usable ring.
    pub fn with_config(config: &QueueConfig) -> Self {
        let capacity = config.initial_capacity.clamp(1, MAX_INITIAL_CAPACITY);
        let growth_factor = if config.growth_factor.is_finite() {
            config
                .growth_factor
                .clamp(MIN_GROWTH_FACTOR, MAX_GROWTH_FACTOR)
        } else {
            QueueConfig::default().growth_factor
        };
        Self {
            slots: vec![None; capacity],
            head: 0,
            len: 0,
            growth_factor,
        }
    }

    /// Add to the back of the queue, growing the ring first if it is full.
    pub fn enqueue(&mut self, value: Value) {
        if self.len == self.slots.len() {
            self.grow();
        }
        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = Some(value);
        self.len += 1;
    }

    /// Remove and return the oldest element
    pub fn dequeue(&mut self) -> Option<Value> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        value
    }

    /// Oldest element, left in place
    pub fn head(&self) -> Option<&Value> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Newest element, left in place
    pub fn tail(&self) -> Option<&Value> {
        if self.len == 0 {
            return None;
        }
        let last = (self.head + self.len - 1) % self.slots.len();
        self.slots[last].as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current ring capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drop every element and reset the cursors. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    /// Elements from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        let capacity = self.slots.len();
        (0..self.len).filter_map(move |offset| self.slots[(self.head + offset) % capacity].as_ref())
    }

    /// Convert to a vector, head first
    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = next_capacity(old_capacity, self.growth_factor);

        let mut slots: Vec<Option<Value>> = Vec::with_capacity(new_capacity);
        for offset in 0..self.len {
            let index = (self.head + offset) % old_capacity;
            slots.push(self.slots[index].take());
        }
        slots.resize(new_capacity, None);

        tracing::trace!(old_capacity, new_capacity, len = self.len, "queue ring grown");

        self.slots = slots;
        self.head = 0;
    }
}

/// Capacity after one growth step. The scaled size saturates at the largest
/// ring a `Vec` can describe and always grows by at least one slot.
fn next_capacity(old_capacity: usize, growth_factor: f64) -> usize {
    let limit = isize::MAX as usize / mem::size_of::<Option<Value>>();
    let scaled = (old_capacity as f64 * growth_factor).ceil();
    let scaled = if scaled < limit as f64 {
        scaled as usize
    } else {
        limit
    };
    scaled.max(old_capacity.saturating_add(1))
}

impl Default for DsQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for DsQueue {
    /// Queues are equal when they hold equal elements in the same order;
    /// ring layout and capacity are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}
