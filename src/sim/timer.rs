//! Deferred grace-period retags
//!
//! A min-heap of (due time, segment) entries checked once per tick. Times are
//! simulation seconds, so a paused round also pauses the queue. Every entry
//! carries the epoch it was scheduled in, and only entries from the current
//! epoch ever fire.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::trail::SegmentId;

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: f32,
    /// Insertion order, for stable ties
    seq: u64,
    epoch: u32,
    segment: SegmentId,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so BinaryHeap pops the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending "make this segment solid to its owner" callbacks
#[derive(Debug, Clone, Default)]
pub struct RetagQueue {
    heap: BinaryHeap<Scheduled>,
    epoch: u32,
    next_seq: u64,
}

impl RetagQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current validity token
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Schedule `segment` to be retagged at simulation time `due`
    pub fn schedule(&mut self, segment: SegmentId, due: f32) {
        self.heap.push(Scheduled {
            due,
            seq: self.next_seq,
            epoch: self.epoch,
            segment,
        });
        self.next_seq += 1;
    }

    /// Drop every outstanding entry and move to a new epoch
    pub fn cancel_all(&mut self) {
        if !self.heap.is_empty() {
            log::debug!("Cancelling {} pending retags", self.heap.len());
        }
        self.heap.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Pop every entry due at or before `now`, skipping stale ones
    pub fn pop_due(&mut self, now: f32) -> Vec<SegmentId> {
        let mut due = Vec::new();
        while let Some(next) = self.heap.peek() {
            if next.due > now {
                break;
            }
            if let Some(entry) = self.heap.pop() {
                if entry.epoch == self.epoch {
                    due.push(entry.segment);
                } else {
                    log::debug!("Dropping stale retag for segment {}", entry.segment);
                }
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
