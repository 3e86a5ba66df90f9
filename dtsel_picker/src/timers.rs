// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clocks and the deferred-task queue behind blur debouncing and refocusing.
//!
//! Timers carry the generation of the picker that scheduled them. When they
//! come due after that picker was torn down, the owner drops them instead of
//! running them against a different instance.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use chrono::NaiveDate;

/// Delay before a blur is allowed to hide the picker, in milliseconds.
pub const BLUR_DELAY_MS: u64 = 100;
/// Delay before focus returns to the input after an internal click, in milliseconds.
pub const REFOCUS_DELAY_MS: u64 = 50;

/// A monotonic millisecond clock plus the local calendar date.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_millis(&self) -> u64;

    /// Today's date, used to seed an empty or unreadable input.
    fn today(&self) -> NaiveDate;
}

/// The process clock and the local time zone.
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// A clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the picker.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
    today: Rc<Cell<NaiveDate>>,
}

impl ManualClock {
    /// A clock at time zero on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            today: Rc::new(Cell::new(today)),
        }
    }

    /// Moves time forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Changes the calendar date.
    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

/// Work a picker defers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Consume one blur credit, or hide the picker if none is left.
    ResolveBlur,
    /// Return focus to the bound input.
    Refocus,
}

impl Deferred {
    /// How long after scheduling the task runs.
    pub const fn delay_ms(self) -> u64 {
        match self {
            Self::ResolveBlur => BLUR_DELAY_MS,
            Self::Refocus => REFOCUS_DELAY_MS,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Timer {
    due: u64,
    seq: u64,
    generation: u32,
    task: Deferred,
}

/// Pending deferred tasks, run in due order and then in scheduling order.
///
/// Timers cannot be cancelled once scheduled.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` for the picker of `generation`, due at `due`.
    pub fn schedule(&mut self, due: u64, generation: u32, task: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due,
            seq,
            generation,
            task,
        });
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(u32, Deferred)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(idx);
        Some((timer.generation, timer.task))
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
