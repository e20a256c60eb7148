// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI state machines frequently need "do this a little later" behavior: re-enable
//! a gesture after a layout transition, commit an interrupted interaction after a
//! grace period, and so on. Hosts own the real clock and the event loop, so this
//! crate does not spawn threads or talk to an executor. Instead, [`TimerQueue`]
//! stores one-shot deadlines keyed by an application-defined key and hands back
//! the ones that are due when the host advances time.
//!
//! Every schedule produces a [`TimerToken`] carrying a generation number.
//! Scheduling the same key again supersedes the previous deadline, and the old
//! token stops being current. Consumers that hold on to tokens can therefore ask
//! [`TimerQueue::is_current`] before acting, and never apply stale work.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Job {
//!     Reenable,
//! }
//!
//! let mut timers = TimerQueue::new();
//! let first = timers.schedule(Job::Reenable, 300);
//!
//! // A second trigger before the deadline supersedes the first one.
//! let second = timers.schedule(Job::Reenable, 450);
//! assert!(!timers.is_current(first));
//! assert!(timers.is_current(second));
//!
//! // Nothing fires at the old deadline.
//! assert_eq!(timers.pop_due(300), None);
//! assert_eq!(timers.pop_due(450), Some(second));
//! assert!(timers.is_empty());
//! ```
//!
//! Time is expressed as `u64` milliseconds on a host-defined monotonic clock.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Identifies one scheduled deadline for a key.
///
/// Tokens compare equal only when both the key and the generation match, so a
/// token from a superseded schedule never matches the live one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken<K> {
    key: K,
    generation: u64,
}

impl<K: Copy> TimerToken<K> {
    /// Returns the key this token was scheduled under.
    #[must_use]
    pub fn key(&self) -> K {
        self.key
    }

    /// Returns the generation assigned when this token was scheduled.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Copy, Clone, Debug)]
struct Entry<K> {
    key: K,
    deadline: u64,
    generation: u64,
}

/// One-shot timer queue with at most one pending deadline per key.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: Vec<Entry<K>>,
    next_generation: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_generation: 1,
        }
    }
}

impl<K: Copy + Eq> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire at `deadline`.
    ///
    /// Any pending deadline for the same key is superseded and its token is no
    /// longer current.
    pub fn schedule(&mut self, key: K, deadline: u64) -> TimerToken<K> {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.entries.retain(|e| e.key != key);
        self.entries.push(Entry {
            key,
            deadline,
            generation,
        });
        TimerToken { key, generation }
    }

    /// Cancels the pending deadline for `key`, returning `true` if one existed.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        before != self.entries.len()
    }

    /// Returns `true` if `token` is still the pending schedule for its key.
    #[must_use]
    pub fn is_current(&self, token: TimerToken<K>) -> bool {
        self.entries
            .iter()
            .any(|e| e.key == token.key && e.generation == token.generation)
    }

    /// Returns `true` if `key` has a pending deadline.
    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Returns the pending deadline for `key`, if any.
    #[must_use]
    pub fn deadline(&self, key: K) -> Option<u64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.deadline)
    }

    /// Returns the earliest pending deadline.
    ///
    /// Hosts use this to arm their own wake-up timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns the earliest entry whose deadline is `<= now`.
    ///
    /// Entries with equal deadlines fire in scheduling order.
    pub fn pop_due(&mut self, now: u64) -> Option<TimerToken<K>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.generation))
            .map(|(idx, _)| idx)?;
        let entry = self.entries.remove(idx);
        Some(TimerToken {
            key: entry.key,
            generation: entry.generation,
        })
    }

    /// Returns an iterator that pops every entry due at `now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> DrainDue<'_, K> {
        DrainDue { queue: self, now }
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Iterator returned by [`TimerQueue::drain_due`].
#[derive(Debug)]
pub struct DrainDue<'a, K> {
    queue: &'a mut TimerQueue<K>,
    now: u64,
}

impl<K: Copy + Eq> Iterator for DrainDue<'_, K> {
    type Item = TimerToken<K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_due(self.now)
    }
}
