// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar grids, header label and time footer computed from a [`PickerState`].
//!
//! ## Day grid
//!
//! A month is shown as six weeks starting on the Sunday on or before the
//! 1st. Cells before or after the browsed month carry [`CellFlags::PREV`] or
//! [`CellFlags::NEXT`]. When the sixth week starts in the following month it
//! is hidden, so most months show five rows.
//!
//! ## Month and year grids
//!
//! Both are 3 rows of 4. The year grid covers the browsed decade plus one
//! year on each side; those two edge cells are flagged as spillover.

use alloc::format;
use alloc::string::String;
use core::cmp::Ordering;

use chrono::{Datelike, NaiveDate};

use crate::names;
use crate::state::{BodyType, PickerState};

/// Rows in a day grid, excluding the weekday names.
pub const DAY_ROWS: usize = 6;
/// Columns in a day grid.
pub const DAY_COLS: usize = 7;
/// Rows in the month and year grids.
pub const PAGE_ROWS: usize = 3;
/// Columns in the month and year grids.
pub const PAGE_COLS: usize = 4;

bitflags::bitflags! {
    /// Styling flags for one grid cell.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Spills over from before the browsed range.
        const PREV  = 0b0000_0001;
        /// Spills over from after the browsed range.
        const NEXT  = 0b0000_0010;
        /// Holds the committed value.
        const VALUE = 0b0000_0100;
    }
}

/// One day of a [`DayGrid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    /// The day this cell shows.
    pub date: NaiveDate,
    /// Styling flags.
    pub flags: CellFlags,
}

impl DayCell {
    /// Day-of-month label.
    pub fn label(&self) -> u32 {
        self.date.day()
    }
}

/// Six weeks around one month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayGrid {
    cells: [DayCell; DAY_ROWS * DAY_COLS],
    visible_rows: usize,
}

impl DayGrid {
    /// Lays out `(year, month0)`, flagging the cell equal to `value`.
    ///
    /// Returns `None` when the month is outside chrono's range.
    pub fn new(year: i32, month0: u32, value: Option<NaiveDate>) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)?;
        let lead = first.weekday().num_days_from_sunday();
        let start = first.checked_sub_days(chrono::Days::new(lead.into()))?;

        let mut days = start.iter_days();
        let mut cells = [DayCell {
            date: start,
            flags: CellFlags::empty(),
        }; DAY_ROWS * DAY_COLS];
        for cell in &mut cells {
            let date = days.next()?;
            let flags = match (date.year(), date.month0()).cmp(&(year, month0)) {
                Ordering::Less => CellFlags::PREV,
                Ordering::Greater => CellFlags::NEXT,
                Ordering::Equal if Some(date) == value => CellFlags::VALUE,
                Ordering::Equal => CellFlags::empty(),
            };
            *cell = DayCell { date, flags };
        }

        let last_row = &cells[(DAY_ROWS - 1) * DAY_COLS];
        let visible_rows = if last_row.flags.contains(CellFlags::NEXT) {
            DAY_ROWS - 1
        } else {
            DAY_ROWS
        };
        Some(Self {
            cells,
            visible_rows,
        })
    }

    /// Number of rows to display, 5 or 6.
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// The displayed rows, each [`DAY_COLS`] wide.
    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> + '_ {
        self.cells[..self.visible_rows * DAY_COLS].chunks(DAY_COLS)
    }

    /// The cell at `(row, col)`, if that row is displayed.
    pub fn cell(&self, row: usize, col: usize) -> Option<&DayCell> {
        if row >= self.visible_rows || col >= DAY_COLS {
            return None;
        }
        self.cells.get(row * DAY_COLS + col)
    }

    /// Two-letter weekday names for the heading row, Sunday first.
    pub fn weekday_labels() -> [&'static str; DAY_COLS] {
        core::array::from_fn(|i| names::weekday_short(offset(i).unsigned_abs()))
    }
}

/// One cell of a [`MonthGrid`] or [`YearGrid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageCell {
    /// Zero-based month or full year.
    pub value: i32,
    /// Styling flags.
    pub flags: CellFlags,
}

/// The twelve months, January top left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    cells: [PageCell; PAGE_ROWS * PAGE_COLS],
}

impl MonthGrid {
    /// Months of `year`, flagging the month containing `value`.
    pub fn new(year: i32, value: Option<NaiveDate>) -> Self {
        let cells = core::array::from_fn(|i| {
            let month0 = offset(i);
            let selected = value
                .is_some_and(|v| v.year() == year && v.month0() == month0.unsigned_abs());
            PageCell {
                value: month0,
                flags: if selected {
                    CellFlags::VALUE
                } else {
                    CellFlags::empty()
                },
            }
        });
        Self { cells }
    }

    /// The cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&PageCell> {
        page_cell(&self.cells, row, col)
    }

    /// Rows of [`PAGE_COLS`] cells.
    pub fn rows(&self) -> impl Iterator<Item = &[PageCell]> + '_ {
        self.cells.chunks(PAGE_COLS)
    }

    /// Three-letter label of `cell`.
    pub fn label(cell: &PageCell) -> &'static str {
        names::month_short(cell.value.unsigned_abs())
    }
}

/// The browsed decade with one year of spillover on each side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearGrid {
    cells: [PageCell; PAGE_ROWS * PAGE_COLS],
}

impl YearGrid {
    /// Years around the decade containing `year`, flagging `value`'s year.
    pub fn new(year: i32, value: Option<NaiveDate>) -> Self {
        let first = decade_start(year).saturating_sub(1);
        let last = PAGE_ROWS * PAGE_COLS - 1;
        let cells = core::array::from_fn(|i| {
            let year = first.saturating_add(offset(i));
            let mut flags = CellFlags::empty();
            if i == 0 {
                flags |= CellFlags::PREV;
            } else if i == last {
                flags |= CellFlags::NEXT;
            } else if value.is_some_and(|v| v.year() == year) {
                flags |= CellFlags::VALUE;
            }
            PageCell { value: year, flags }
        });
        Self { cells }
    }

    /// The cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&PageCell> {
        page_cell(&self.cells, row, col)
    }

    /// Rows of [`PAGE_COLS`] cells.
    pub fn rows(&self) -> impl Iterator<Item = &[PageCell]> + '_ {
        self.cells.chunks(PAGE_COLS)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Grid indices never exceed 42."
)]
const fn offset(index: usize) -> i32 {
    index as i32
}

fn page_cell(cells: &[PageCell], row: usize, col: usize) -> Option<&PageCell> {
    if row >= PAGE_ROWS || col >= PAGE_COLS {
        return None;
    }
    cells.get(row * PAGE_COLS + col)
}

/// First year of the decade containing `year`.
pub fn decade_start(year: i32) -> i32 {
    year.saturating_sub(year.rem_euclid(10))
}

/// The grid for the current [`BodyType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// See [`DayGrid`].
    Days(DayGrid),
    /// See [`MonthGrid`].
    Months(MonthGrid),
    /// See [`YearGrid`].
    Years(YearGrid),
}

impl Body {
    /// Builds the grid `state` is showing.
    pub fn for_state(state: &PickerState) -> Option<Self> {
        Some(match state.body_type {
            BodyType::Days => Self::Days(DayGrid::new(state.year, state.month0, state.value)?),
            BodyType::Months => Self::Months(MonthGrid::new(state.year, state.value)),
            BodyType::Years => Self::Years(YearGrid::new(state.year, state.value)),
        })
    }
}

/// Text of the header's middle cell: `October 2026`, `2026` or `2020-2029`.
pub fn header_label(state: &PickerState) -> String {
    match state.body_type {
        BodyType::Days => format!("{} {}", state.month_long(), state.year),
        BodyType::Months => format!("{}", state.year),
        BodyType::Years => {
            let start = decade_start(state.year);
            format!("{}-{}", start, start.saturating_add(9))
        }
    }
}

/// One of the three time sliders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimeField {
    /// Hours slider.
    Hours,
    /// Minutes slider.
    Minutes,
    /// Seconds slider.
    Seconds,
}

impl TimeField {
    /// The sliders, top to bottom.
    pub const ALL: [Self; 3] = [Self::Hours, Self::Minutes, Self::Seconds];

    /// Largest slider value.
    pub const fn max(self) -> u32 {
        match self {
            Self::Hours => 23,
            Self::Minutes | Self::Seconds => 59,
        }
    }

    /// Row label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hours => "HH:",
            Self::Minutes => "MM:",
            Self::Seconds => "SS:",
        }
    }

    /// Reads this field from `state`.
    pub fn get(self, state: &PickerState) -> u32 {
        match self {
            Self::Hours => state.hours,
            Self::Minutes => state.minutes,
            Self::Seconds => state.seconds,
        }
    }
}

/// One slider row of the footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeRow {
    /// Which slider.
    pub field: TimeField,
    /// Current slider position.
    pub value: u32,
}

impl TimeRow {
    /// Two-digit display text.
    pub fn text(&self) -> String {
        format!("{:02}", self.value)
    }
}

/// The time sliders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Footer {
    /// Hours, minutes and seconds rows.
    pub rows: [TimeRow; 3],
}

impl Footer {
    /// Slider positions for `state`.
    pub fn for_state(state: &PickerState) -> Self {
        Self {
            rows: TimeField::ALL.map(|field| TimeRow {
                field,
                value: field.get(state),
            }),
        }
    }
}
