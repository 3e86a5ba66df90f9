// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One picker instance: the state machine between its overlay and its input.
//!
//! ## Views
//!
//! The calendar shows days, months or years ([`BodyType`]). Clicking the
//! header's middle cell zooms out one level and does nothing at years.
//! Picking a year zooms into its months; picking a month zooms into its
//! days; picking a day commits the value and stays on days. The header
//! arrows move by one month, one year or ten years depending on the view.
//!
//! ## Input sync
//!
//! Opening reads the input's text to seed the state, falling back to today
//! at midnight. Committing a day or moving a time slider writes the rendered
//! value back: the date and the time, each if shown, joined by one space.

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{Datelike, NaiveDate};
use dtsel_format::{Moment, normalize_date};
use tracing::{debug, trace, warn};

use crate::config::Settings;
use crate::grid::{Body, DayGrid, Footer, MonthGrid, TimeField, YearGrid, header_label};
use crate::placement::place;
use crate::state::{BodyType, Listeners, PickerState, StateKey, Store};
use crate::surface::{InputField, Surface};
use crate::timers::Deferred;

/// One of the three header cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeaderCell {
    /// The `<` arrow.
    Prev,
    /// The label between the arrows.
    Current,
    /// The `>` arrow.
    Next,
}

/// What happened to a time slider.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SliderAction {
    /// The pointer went down on the slider.
    PointerDown,
    /// The slider is being dragged.
    Input,
    /// The drag ended.
    Change,
}

/// A user interaction inside the overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    /// Pointer or touch down anywhere in the overlay.
    PointerDown,
    /// A header cell was clicked.
    Header(HeaderCell),
    /// A day grid cell was clicked.
    Day {
        /// Row, 0 is the first week.
        row: usize,
        /// Column, 0 is Sunday.
        col: usize,
    },
    /// A month grid cell was clicked.
    Month {
        /// Row, `0..3`.
        row: usize,
        /// Column, `0..4`.
        col: usize,
    },
    /// A year grid cell was clicked.
    Year {
        /// Row, `0..3`.
        row: usize,
        /// Column, `0..4`.
        col: usize,
    },
    /// A time slider moved or was grabbed.
    Slider {
        /// Which slider.
        field: TimeField,
        /// What happened.
        action: SliderAction,
        /// Slider position.
        value: u32,
    },
}

/// A picker bound to one input.
///
/// Created on the input's first focus and reused until its owner tears it
/// down. Holds no references to the input or overlay; those are passed to
/// each call.
#[derive(Debug)]
pub struct DtBox {
    settings: Settings,
    store: Store,
    generation: u32,
}

impl DtBox {
    /// A hidden picker showing the configured default view.
    pub fn new(settings: Settings, generation: u32, listeners: Listeners) -> Self {
        let store = Store::with_listeners(settings.config().default_view, listeners);
        Self {
            settings,
            store,
            generation,
        }
    }

    /// Identifies this instance among all pickers its owner has created.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// The current snapshot.
    pub fn state(&self) -> PickerState {
        self.store.state()
    }

    /// Registers a change listener.
    pub fn subscribe(
        &mut self,
        key: StateKey,
        listener: impl FnMut(PickerState, PickerState) + 'static,
    ) {
        self.store.subscribe(key, listener);
    }

    /// Consumes the picker, keeping its listeners.
    pub fn into_listeners(mut self) -> Listeners {
        self.store.take_listeners()
    }

    /// Attaches and seeds the overlay. Does nothing if already visible.
    ///
    /// If the surface cannot attach, the failure is logged and the picker
    /// stays hidden.
    pub fn show(&mut self, input: &mut impl InputField, surface: &mut impl Surface, today: NaiveDate) {
        if self.state().visible {
            return;
        }
        if let Err(err) = surface.attach() {
            warn!(error = %err, "picker overlay could not be attached");
            return;
        }
        self.reposition(&*input, surface);

        let moment = self.seed(&input.text(), today);
        self.store.set_value(Some(moment.date()));
        self.store.set_year(moment.year());
        self.store.set_month0(moment.month0());
        self.store.set_day(moment.day());
        self.store.set_hours(moment.hours());
        self.store.set_minutes(moment.minutes());
        self.store.set_seconds(moment.seconds());
        self.store.set_visible(true);
        self.refresh(surface);
        debug!(generation = self.generation, moment = ?moment, "picker shown");
    }

    /// Detaches the overlay. Does nothing if already hidden.
    pub fn hide(&mut self, surface: &mut impl Surface) {
        if !self.state().visible {
            return;
        }
        surface.detach();
        self.store.set_visible(false);
        debug!(generation = self.generation, "picker hidden");
    }

    /// Recomputes the overlay position from the input's bounds.
    pub fn reposition(&self, input: &impl InputField, surface: &mut impl Surface) {
        let placement = place(input.bounds(), surface.viewport(), self.settings.config());
        surface.place(placement);
    }

    /// Records that the next blur comes from inside the overlay.
    pub fn add_blur_credit(&mut self) {
        let credits = self.state().cancel_blur.saturating_add(1);
        self.store.set_cancel_blur(credits);
    }

    /// Spends one blur credit, returning `false` if there was none.
    pub fn consume_blur_credit(&mut self) -> bool {
        let credits = self.state().cancel_blur;
        if credits == 0 {
            return false;
        }
        self.store.set_cancel_blur(credits - 1);
        true
    }

    /// Applies `event`, returning a task to run later, if any.
    pub fn handle(
        &mut self,
        event: PickerEvent,
        input: &mut impl InputField,
        surface: &mut impl Surface,
    ) -> Option<Deferred> {
        if !self.state().visible {
            trace!(?event, "event for hidden picker ignored");
            return None;
        }
        match event {
            PickerEvent::PointerDown => {
                self.add_blur_credit();
                Some(Deferred::Refocus)
            }
            PickerEvent::Header(cell) => {
                self.navigate(cell, surface);
                None
            }
            PickerEvent::Day { row, col } => {
                self.select_day(row, col, input, surface);
                None
            }
            PickerEvent::Month { row, col } => {
                self.select_month(row, col, surface);
                None
            }
            PickerEvent::Year { row, col } => {
                self.select_year(row, col, surface);
                None
            }
            PickerEvent::Slider {
                field,
                action,
                value,
            } => self.slide(field, action, value, input, surface),
        }
    }

    /// The text the input should hold for the current state.
    ///
    /// `None` when the browsed date is outside chrono's range.
    pub fn input_text(&self) -> Option<String> {
        let state = self.state();
        let date = normalize_date(
            state.year.into(),
            state.month0.into(),
            state.day.into(),
        )?;
        let mut parts = Vec::with_capacity(2);
        if let Some(format) = self.settings.date() {
            parts.push(format.render(date));
        }
        if let Some(format) = self.settings.time() {
            let moment = Moment::from_date_and_time(date, state.time())?;
            parts.push(format.render(moment.time_of_day()));
        }
        Some(parts.join(" "))
    }

    fn seed(&self, text: &str, today: NaiveDate) -> Moment {
        let words: Vec<&str> = text.split_whitespace().collect();
        let split = self
            .settings
            .date()
            .map_or(0, |format| format.word_count().min(words.len()));
        let (date_words, time_words) = words.split_at(split);

        let date = self
            .settings
            .date()
            .and_then(|format| format.parse_with_year(&date_words.join(" "), today.year()))
            .unwrap_or(today);
        let time = self
            .settings
            .time()
            .and_then(|format| format.parse(&time_words.join(" ")))
            .unwrap_or(0);
        Moment::from_date_and_time(date, time).unwrap_or_else(|| Moment::midnight(date))
    }

    fn write_input(&self, input: &mut impl InputField) {
        match self.input_text() {
            Some(text) => input.set_text(&text),
            None => warn!(state = ?self.state(), "picker state has no representable date"),
        }
    }

    fn navigate(&mut self, cell: HeaderCell, surface: &mut impl Surface) {
        let state = self.state();
        let step = match cell {
            HeaderCell::Current => {
                let Some(next) = state.body_type.zoom_out() else {
                    return;
                };
                self.store.set_body_type(next);
                debug!(from = ?state.body_type, to = ?next, "picker zoomed out");
                self.refresh(surface);
                return;
            }
            HeaderCell::Prev => -1,
            HeaderCell::Next => 1,
        };
        match state.body_type {
            BodyType::Days => {
                let Some((year, month0)) = shift_month(state.year, state.month0, step) else {
                    return;
                };
                self.store.set_month0(month0);
                if year != state.year {
                    self.store.set_year(year);
                }
            }
            BodyType::Months | BodyType::Years => {
                let years = if state.body_type == BodyType::Years {
                    step * 10
                } else {
                    step
                };
                let Some(year) = step_year(state.year, years) else {
                    return;
                };
                self.store.set_year(year);
            }
        }
        self.refresh(surface);
    }

    fn select_day(
        &mut self,
        row: usize,
        col: usize,
        input: &mut impl InputField,
        surface: &mut impl Surface,
    ) {
        let state = self.state();
        if state.body_type != BodyType::Days {
            return;
        }
        let Some(grid) = DayGrid::new(state.year, state.month0, state.value) else {
            return;
        };
        let Some(cell) = grid.cell(row, col) else {
            trace!(row, col, "click outside the day grid");
            return;
        };
        let date = cell.date;
        self.store.set_year(date.year());
        self.store.set_month0(date.month0());
        self.store.set_day(date.day());
        self.store.set_value(Some(date));
        self.write_input(input);
        self.refresh(surface);
        debug!(%date, "day selected");
    }

    fn select_month(&mut self, row: usize, col: usize, surface: &mut impl Surface) {
        let state = self.state();
        if state.body_type != BodyType::Months {
            return;
        }
        let grid = MonthGrid::new(state.year, state.value);
        let Some(cell) = grid.cell(row, col) else {
            return;
        };
        self.store.set_month0(cell.value.unsigned_abs());
        self.store.set_body_type(BodyType::Days);
        self.refresh(surface);
        debug!(year = state.year, month0 = cell.value, "month selected");
    }

    fn select_year(&mut self, row: usize, col: usize, surface: &mut impl Surface) {
        let state = self.state();
        if state.body_type != BodyType::Years {
            return;
        }
        let grid = YearGrid::new(state.year, state.value);
        let Some(cell) = grid.cell(row, col) else {
            return;
        };
        self.store.set_year(cell.value);
        self.store.set_body_type(BodyType::Months);
        self.refresh(surface);
        debug!(year = cell.value, "year selected");
    }

    fn slide(
        &mut self,
        field: TimeField,
        action: SliderAction,
        value: u32,
        input: &mut impl InputField,
        surface: &mut impl Surface,
    ) -> Option<Deferred> {
        if action == SliderAction::PointerDown {
            self.add_blur_credit();
            return None;
        }
        let value = value.min(field.max());
        match field {
            TimeField::Hours => self.store.set_hours(value),
            TimeField::Minutes => self.store.set_minutes(value),
            TimeField::Seconds => self.store.set_seconds(value),
        }
        if self.settings.time().is_some() {
            surface.render_footer(&Footer::for_state(&self.state()));
        }
        self.write_input(input);
        (action == SliderAction::Change).then_some(Deferred::Refocus)
    }

    fn refresh(&self, surface: &mut impl Surface) {
        let state = self.state();
        if self.settings.date().is_some() {
            surface.render_header(&header_label(&state));
            match Body::for_state(&state) {
                Some(body) => surface.render_body(&body),
                None => warn!(year = state.year, month0 = state.month0, "calendar out of range"),
            }
        }
        if self.settings.time().is_some() {
            surface.render_footer(&Footer::for_state(&state));
        }
    }
}

/// Moves `(year, month0)` by `step` months, carrying into the year.
fn shift_month(year: i32, month0: u32, step: i32) -> Option<(i32, u32)> {
    let total = i64::from(year) * 12 + i64::from(month0) + i64::from(step);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month0 = u32::try_from(total.rem_euclid(12)).ok()?;
    in_calendar(year).then_some((year, month0))
}

/// `year + years`, if it stays within the dates chrono can represent.
fn step_year(year: i32, years: i32) -> Option<i32> {
    year.checked_add(years).filter(|&year| in_calendar(year))
}

fn in_calendar(year: i32) -> bool {
    (NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year)
}
