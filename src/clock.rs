use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::foundation::core::Millis;

/// Monotonic view of host timestamps.
#[derive(Debug, Default)]
pub(crate) struct Clock {
    now: Millis,
}

impl Clock {
    pub(crate) fn now(&self) -> Millis {
        self.now
    }

    /// Move to `to`; a timestamp earlier than the current one is ignored.
    pub(crate) fn advance(&mut self, to: Millis) -> Millis {
        if to < self.now {
            tracing::warn!(
                now = self.now.0,
                requested = to.0,
                "non-monotonic timestamp ignored"
            );
            return self.now;
        }
        self.now = to;
        self.now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Timer<K> {
    due: Millis,
    seq: u64,
    key: K,
}

/// Deadline-ordered timer queue.
///
/// Determinism rule: timers with equal deadlines fire in scheduling order. Cancellation is lazy:
/// the owner remembers the sequence number of its live timer and ignores any other.
#[derive(Debug)]
pub(crate) struct TimerQueue<K: Ord> {
    heap: BinaryHeap<Reverse<Timer<K>>>,
    next_seq: u64,
}

impl<K: Ord> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Ord + Copy> TimerQueue<K> {
    /// Schedule `key` at `due`; returns the timer's sequence number.
    pub(crate) fn schedule(&mut self, due: Millis, key: K) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Timer { due, seq, key }));
        seq
    }

    /// Pop the earliest timer with `due <= now`.
    pub(crate) fn pop_due(&mut self, now: Millis) -> Option<(Millis, u64, K)> {
        let Reverse(top) = self.heap.peek()?;
        if top.due > now {
            return None;
        }
        let Reverse(t) = self.heap.pop()?;
        Some((t.due, t.seq, t.key))
    }

    /// Earliest pending deadline, including stale entries.
    pub(crate) fn next_due(&self) -> Option<Millis> {
        self.heap.peek().map(|Reverse(t)| t.due)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop entries rejected by `live`.
    pub(crate) fn retain(&mut self, mut live: impl FnMut(u64, K) -> bool) {
        self.heap.retain(|Reverse(t)| live(t.seq, t.key));
    }
}

#[cfg(test)]
#[path = "../tests/unit/clock.rs"]
mod tests;
