// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picker state, per-key change listeners, and the store that ties them together.
//!
//! ## Overview
//!
//! [`PickerState`] is a plain `Copy` snapshot of everything one picker edits.
//! [`Store`] owns the current snapshot and exposes one setter per
//! [`StateKey`]. Every setter call, changed value or not, invokes the
//! listeners registered for that key in registration order, passing the new
//! and previous snapshots by value.
//!
//! ## Example
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use dtsel_picker::{BodyType, StateKey, Store};
//!
//! let seen = Rc::new(Cell::new(None));
//! let mut store = Store::new(BodyType::Days);
//! let sink = seen.clone();
//! store.subscribe(StateKey::Year, move |state, prev| sink.set(Some((prev.year, state.year))));
//!
//! store.set_year(2030);
//! assert_eq!(seen.get(), Some((0, 2030)));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use chrono::NaiveDate;
use dtsel_format::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

use crate::names;

/// Granularity of the calendar grid currently shown.
///
/// Ordered from most to least zoomed in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum BodyType {
    /// A month of days.
    #[default]
    Days,
    /// The twelve months of a year.
    Months,
    /// A decade of years.
    Years,
}

impl BodyType {
    /// The next, more zoomed-out view, if any.
    pub const fn zoom_out(self) -> Option<Self> {
        match self {
            Self::Days => Some(Self::Months),
            Self::Months => Some(Self::Years),
            Self::Years => None,
        }
    }
}

/// Snapshot of one picker's state.
///
/// `year`, `month0` and `day` are the calendar position being browsed and may
/// drift out of range while navigating; `value` is the last committed date.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PickerState {
    /// Last committed date, if any.
    pub value: Option<NaiveDate>,
    /// Year being browsed.
    pub year: i32,
    /// Zero-based month being browsed.
    pub month0: u32,
    /// Day of month.
    pub day: u32,
    /// Hours, `0..=23`.
    pub hours: u32,
    /// Minutes, `0..=59`.
    pub minutes: u32,
    /// Seconds, `0..=59`.
    pub seconds: u32,
    /// Current grid granularity.
    pub body_type: BodyType,
    /// Whether the overlay is attached and shown.
    pub visible: bool,
    /// Pending blur events to ignore because an internal click caused them.
    pub cancel_blur: u32,
}

impl PickerState {
    /// A hidden picker showing `body_type`, with every numeric field zero.
    pub const fn new(body_type: BodyType) -> Self {
        Self {
            value: None,
            year: 0,
            month0: 0,
            day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            body_type,
            visible: false,
            cancel_blur: 0,
        }
    }

    /// Milliseconds since midnight for the time fields.
    pub fn time(&self) -> i64 {
        i64::from(self.hours) * MS_PER_HOUR
            + i64::from(self.minutes) * MS_PER_MINUTE
            + i64::from(self.seconds) * MS_PER_SECOND
    }

    /// Full name of the month being browsed.
    pub fn month_long(&self) -> &'static str {
        names::month_long(self.month0)
    }

    /// Three-letter name of the month being browsed.
    pub fn month_short(&self) -> &'static str {
        names::month_short(self.month0)
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new(BodyType::Days)
    }
}

/// Names one field of [`PickerState`] for subscriptions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// [`PickerState::value`].
    Value,
    /// [`PickerState::year`].
    Year,
    /// [`PickerState::month0`].
    Month,
    /// [`PickerState::day`].
    Day,
    /// [`PickerState::hours`].
    Hours,
    /// [`PickerState::minutes`].
    Minutes,
    /// [`PickerState::seconds`].
    Seconds,
    /// [`PickerState::body_type`].
    BodyType,
    /// [`PickerState::visible`].
    Visible,
    /// [`PickerState::cancel_blur`].
    CancelBlur,
}

impl StateKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Value,
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::BodyType,
        Self::Visible,
        Self::CancelBlur,
    ];

    const fn slot(self) -> usize {
        self as usize
    }
}

/// A change callback receiving `(state, previous)`.
pub type Listener = Box<dyn FnMut(PickerState, PickerState)>;

/// Ordered listener lists, one per [`StateKey`].
#[derive(Default)]
pub struct Listeners {
    slots: [Vec<Listener>; StateKey::ALL.len()],
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in StateKey::ALL {
            let count = self.slots[key.slot()].len();
            if count > 0 {
                map.entry(&key, &count);
            }
        }
        map.finish()
    }
}

impl Listeners {
    /// Appends `listener` to the list for `key`.
    pub fn subscribe(&mut self, key: StateKey, listener: impl FnMut(PickerState, PickerState) + 'static) {
        self.slots[key.slot()].push(Box::new(listener));
    }

    /// Number of listeners registered for `key`.
    pub fn count(&self, key: StateKey) -> usize {
        self.slots[key.slot()].len()
    }

    fn notify(&mut self, key: StateKey, state: PickerState, prev: PickerState) {
        for listener in &mut self.slots[key.slot()] {
            listener(state, prev);
        }
    }
}

/// Current [`PickerState`] plus its listeners.
///
/// Listeners cannot reach the store they are registered on, so a listener
/// re-entering its own key's setter is ruled out by construction.
#[derive(Debug)]
pub struct Store {
    state: PickerState,
    listeners: Listeners,
}

impl Store {
    /// A store with no listeners, showing `body_type`.
    pub fn new(body_type: BodyType) -> Self {
        Self::with_listeners(body_type, Listeners::default())
    }

    /// A store that starts with already registered `listeners`.
    pub fn with_listeners(body_type: BodyType, listeners: Listeners) -> Self {
        Self {
            state: PickerState::new(body_type),
            listeners,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> PickerState {
        self.state
    }

    /// See [`Listeners::subscribe`].
    pub fn subscribe(&mut self, key: StateKey, listener: impl FnMut(PickerState, PickerState) + 'static) {
        self.listeners.subscribe(key, listener);
    }

    /// Gives the listeners back, leaving none registered.
    pub fn take_listeners(&mut self) -> Listeners {
        core::mem::take(&mut self.listeners)
    }

    fn update(&mut self, key: StateKey, apply: impl FnOnce(&mut PickerState)) {
        let prev = self.state;
        apply(&mut self.state);
        self.listeners.notify(key, self.state, prev);
    }

    /// Sets [`PickerState::value`].
    pub fn set_value(&mut self, value: Option<NaiveDate>) {
        self.update(StateKey::Value, |s| s.value = value);
    }

    /// Sets [`PickerState::year`].
    pub fn set_year(&mut self, year: i32) {
        self.update(StateKey::Year, |s| s.year = year);
    }

    /// Sets [`PickerState::month0`].
    pub fn set_month0(&mut self, month0: u32) {
        self.update(StateKey::Month, |s| s.month0 = month0);
    }

    /// Sets [`PickerState::day`].
    pub fn set_day(&mut self, day: u32) {
        self.update(StateKey::Day, |s| s.day = day);
    }

    /// Sets [`PickerState::hours`].
    pub fn set_hours(&mut self, hours: u32) {
        self.update(StateKey::Hours, |s| s.hours = hours);
    }

    /// Sets [`PickerState::minutes`].
    pub fn set_minutes(&mut self, minutes: u32) {
        self.update(StateKey::Minutes, |s| s.minutes = minutes);
    }

    /// Sets [`PickerState::seconds`].
    pub fn set_seconds(&mut self, seconds: u32) {
        self.update(StateKey::Seconds, |s| s.seconds = seconds);
    }

    /// Sets [`PickerState::body_type`].
    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.update(StateKey::BodyType, |s| s.body_type = body_type);
    }

    /// Sets [`PickerState::visible`].
    pub fn set_visible(&mut self, visible: bool) {
        self.update(StateKey::Visible, |s| s.visible = visible);
    }

    /// Sets [`PickerState::cancel_blur`].
    pub fn set_cancel_blur(&mut self, cancel_blur: u32) {
        self.update(StateKey::CancelBlur, |s| s.cancel_blur = cancel_blur);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn zoom_out_stops_at_years() {
        assert_eq!(BodyType::Days.zoom_out(), Some(BodyType::Months));
        assert_eq!(BodyType::Months.zoom_out(), Some(BodyType::Years));
        assert_eq!(BodyType::Years.zoom_out(), None);
    }

    #[test]
    fn time_is_milliseconds_since_midnight() {
        let state = PickerState {
            hours: 1,
            minutes: 2,
            seconds: 3,
            ..PickerState::default()
        };
        assert_eq!(state.time(), 3_723_000);
    }

    #[test]
    fn listeners_run_in_order_with_snapshots() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new(BodyType::Days);
        store.set_month0(3);
        for tag in ["first", "second"] {
            let log = log.clone();
            store.subscribe(StateKey::Month, move |state, prev| {
                log.borrow_mut().push((tag, prev.month0, state.month0));
            });
        }

        store.set_month0(7);
        store.set_month0(7);
        store.set_day(12);

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", 3, 7),
                ("second", 3, 7),
                ("first", 7, 7),
                ("second", 7, 7),
            ]
        );
    }

    #[test]
    fn taken_listeners_can_be_reinstalled() {
        let hits = Rc::new(RefCell::new(0));
        let mut store = Store::new(BodyType::Days);
        let sink = hits.clone();
        store.subscribe(StateKey::Visible, move |_, _| *sink.borrow_mut() += 1);

        let listeners = store.take_listeners();
        assert_eq!(listeners.count(StateKey::Visible), 1);
        store.set_visible(true);
        assert_eq!(*hits.borrow(), 0);

        let mut store = Store::with_listeners(BodyType::Years, listeners);
        store.set_visible(true);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(store.state().body_type, BodyType::Years);
    }
}
