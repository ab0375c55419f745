//! This module contains the bounded max-heap that keeps the k nearest candidates
//! seen so far during a single scan of the training set.

use ordered_float::OrderedFloat; // For using f64 in BinaryHeap
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A candidate neighbor: its distance to the query and its position in the training set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    pub distance: f64,
    pub index: usize,
}

/// Represents an element in the heap. Ordered by distance, then by scan index.
#[derive(Debug)]
struct HeapElement {
    distance: OrderedFloat<f64>,
    index: usize,
}

impl PartialEq for HeapElement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapElement {}

impl PartialOrd for HeapElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so the farthest candidate sits on top.
        // Among equal distances the later-scanned index is on top and is evicted first.
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl From<HeapElement> for Neighbor {
    fn from(elem: HeapElement) -> Self {
        Neighbor {
            distance: elem.distance.0,
            index: elem.index,
        }
    }
}

/// Holds at most `capacity` neighbors, keeping the smallest distances offered so far.
///
/// A candidate offered to a full set is accepted only if its distance is strictly
/// smaller than the current farthest one. Equidistant latecomers are discarded, so
/// ties at the boundary go to whichever point was scanned first. NaN distances order
/// above every number and never displace a member.
#[derive(Debug)]
pub struct BoundedNeighborSet {
    capacity: usize,
    heap: BinaryHeap<HeapElement>,
}

impl BoundedNeighborSet {
    pub fn new(capacity: usize) -> Self {
        BoundedNeighborSet {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Offers a candidate. Returns `true` if it was kept.
    pub fn offer(&mut self, distance: f64, index: usize) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let item = HeapElement {
            distance: OrderedFloat(distance),
            index,
        };
        if !self.is_full() {
            self.heap.push(item);
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut top) if item.distance < top.distance => {
                // Replacing through PeekMut sifts the new element down on drop.
                *top = item;
                true
            }
            _ => false,
        }
    }

    /// Returns the current number of neighbors stored.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() == self.capacity
    }

    /// Consumes the set, returning members ascending by distance, then index.
    pub fn into_sorted_vec(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(Neighbor::from)
            .collect()
    }
}
