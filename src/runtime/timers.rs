//! Deterministic timer queue over a host-supplied millisecond clock
//!
//! Two kinds of timers:
//! - plain timers (`schedule`) are never cancelled. Several may be in flight
//!   for the same message; each one re-validates state when it fires.
//! - keyed timers (`debounce`) are cancel-and-replace: scheduling a message
//!   that is already pending drops the earlier one.
//!
//! Timers fire in deadline order, ties in scheduling order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

struct Pending<T> {
    msg: T,
    keyed: bool,
}

pub struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<(u64, u64)>>,
    pending: HashMap<u64, Pending<T>>,
    keyed: HashMap<T, u64>,
    next_seq: u64,
}

impl<T: Clone + Eq + Hash> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
            keyed: HashMap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, due_ms: u64, msg: T, keyed: bool) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((due_ms, seq)));
        self.pending.insert(seq, Pending { msg, keyed });
        seq
    }

    /// Fire `msg` at `now_ms + delay_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, msg: T) {
        self.push(now_ms.saturating_add(delay_ms), msg, false);
    }

    /// Fire `msg` at `now_ms + delay_ms`, replacing a pending debounce of the
    /// same message. Returns true if an earlier one was cancelled.
    pub fn debounce(&mut self, now_ms: u64, delay_ms: u64, msg: T) -> bool {
        let replaced = match self.keyed.remove(&msg) {
            Some(old_seq) => self.pending.remove(&old_seq).is_some(),
            None => false,
        };
        let seq = self.push(now_ms.saturating_add(delay_ms), msg.clone(), true);
        self.keyed.insert(msg, seq);
        replaced
    }

    /// Whether a debounce of `msg` is waiting to fire
    pub fn is_pending(&self, msg: &T) -> bool {
        self.keyed.contains_key(msg)
    }

    /// Pop the earliest timer due at or before `now_ms`, with its deadline
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, T)> {
        while let Some(Reverse((due, seq))) = self.heap.peek().copied() {
            if due > now_ms {
                return None;
            }
            self.heap.pop();
            // Cancelled debounces have no pending entry left
            if let Some(entry) = self.pending.remove(&seq) {
                if entry.keyed {
                    self.keyed.remove(&entry.msg);
                }
                return Some((due, entry.msg));
            }
        }
        None
    }

    /// Deadline of the earliest live timer
    pub fn next_deadline(&mut self) -> Option<u64> {
        while let Some(Reverse((due, seq))) = self.heap.peek().copied() {
            if self.pending.contains_key(&seq) {
                return Some(due);
            }
            self.heap.pop();
        }
        None
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.heap.clear();
        self.pending.clear();
        self.keyed.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
