// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! English month and weekday names.

/// Month names, January first.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names, Sunday first.
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full name of the zero-based `month`, wrapping past December.
pub fn month_long(month0: u32) -> &'static str {
    MONTHS[month0 as usize % 12]
}

/// Three-letter name of the zero-based `month`.
pub fn month_short(month0: u32) -> &'static str {
    &month_long(month0)[..3]
}

/// Two-letter name of the weekday (`0` is Sunday).
pub fn weekday_short(weekday: u32) -> &'static str {
    &WEEKDAYS[weekday as usize % 7][..2]
}
