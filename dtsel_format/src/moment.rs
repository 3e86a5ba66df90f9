// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A normalized calendar instant with picker-friendly accessors.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// Milliseconds in one second.
pub const MS_PER_SECOND: i64 = 1_000;
/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Builds a date from possibly out-of-range parts.
///
/// `month0` is zero-based. Months outside `0..12` roll into adjacent years
/// and days outside the month roll into adjacent months, so
/// `(2024, 1, 30)` is March 1st 2024 and `(2024, 0, 0)` is December 31st
/// 2023. Returns `None` only when the result leaves chrono's supported range.
pub fn normalize_date(year: i64, month0: i64, day: i64) -> Option<NaiveDate> {
    let total = year.checked_mul(12)?.checked_add(month0)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)
}

/// The instant being edited: a date plus a time of day.
///
/// Always a valid calendar instant. Out-of-range parts are normalized on
/// construction (see [`normalize_date`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Moment(NaiveDateTime);

impl Moment {
    /// Midnight at the start of `date`.
    pub fn midnight(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }

    /// Normalizes `(year, month0, day, hours, minutes, seconds)`.
    pub fn from_parts(
        year: i64,
        month0: i64,
        day: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Option<Self> {
        let date = normalize_date(year, month0, day)?;
        let ms = hours
            .checked_mul(MS_PER_HOUR)?
            .checked_add(minutes.checked_mul(MS_PER_MINUTE)?)?
            .checked_add(seconds.checked_mul(MS_PER_SECOND)?)?;
        Self::from_date_and_time(date, ms)
    }

    /// `date` at midnight plus `time_ms` milliseconds, rolling past midnight if needed.
    pub fn from_date_and_time(date: NaiveDate, time_ms: i64) -> Option<Self> {
        Self::midnight(date)
            .0
            .checked_add_signed(TimeDelta::try_milliseconds(time_ms)?)
            .map(Self)
    }

    /// The calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// The time of day.
    pub fn time_of_day(&self) -> NaiveTime {
        self.0.time()
    }

    /// Full year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month.
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    /// Day of month.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hours, 0 to 23.
    pub fn hours(&self) -> u32 {
        self.0.hour()
    }

    /// Minutes, 0 to 59.
    pub fn minutes(&self) -> u32 {
        self.0.minute()
    }

    /// Seconds, 0 to 59.
    pub fn seconds(&self) -> u32 {
        self.0.second()
    }

    /// Milliseconds since midnight.
    pub fn time(&self) -> i64 {
        i64::from(self.hours()) * MS_PER_HOUR
            + i64::from(self.minutes()) * MS_PER_MINUTE
            + i64::from(self.seconds()) * MS_PER_SECOND
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl From<Moment> for NaiveDateTime {
    fn from(value: Moment) -> Self {
        value.0
    }
}
