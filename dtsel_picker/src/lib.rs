// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dtsel_picker --heading-base-level=0

//! Dtsel Picker: a headless date/time picker bound to a text input.
//!
//! ## Overview
//!
//! A [`Dts`] binds one text input to a calendar and time overlay. It owns:
//!
//! - the input, through [`InputField`];
//! - the overlay, through [`Surface`], which receives a header label, a
//!   calendar [`Body`] and a time [`Footer`] to draw;
//! - a [`Clock`] driving the blur and refocus delays.
//!
//! The host forwards input focus changes ([`InputEvent`]) and overlay clicks
//! ([`PickerEvent`]) and calls [`Dts::advance`] on its timer tick. Nothing in
//! this crate touches a document, so the whole state machine runs in tests
//! with the in-memory hosts from [`headless`].
//!
//! ## State
//!
//! Each picker keeps a [`PickerState`] in a [`Store`]. Hosts can
//! [`subscribe`](Dts::subscribe) to any [`StateKey`] and receive the new and
//! previous snapshots after every setter call.
//!
//! ## Text
//!
//! Dates and times are read and written with the templates in
//! [`PickerConfig`] through [`dtsel_format`]. The input holds the rendered
//! date and time, each if shown, joined by one space.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dtsel_picker::headless::{MemoryInput, RecordingSurface};
//! use dtsel_picker::{Dts, InputEvent, ManualClock, PickerConfig, PickerEvent};
//! use kurbo::Rect;
//!
//! let clock = ManualClock::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
//! let input = MemoryInput::new("05/06/2024", Rect::new(10.0, 40.0, 210.0, 64.0));
//! let mut dts =
//!     Dts::from_element(input, RecordingSurface::default(), clock, PickerConfig::default())
//!         .unwrap();
//!
//! dts.handle_input(InputEvent::Focus);
//! assert_eq!(dts.surface().header.as_deref(), Some("June 2024"));
//!
//! // June 2024 starts on a Saturday; row 3, column 4 is the 20th.
//! dts.handle_picker(PickerEvent::Day { row: 3, col: 4 });
//! assert_eq!(dts.input().text, "20/06/2024");
//! ```
//!
//! ## Features
//!
//! - `std` (default): [`SystemClock`] and parsing against the local date.
//! - `libm`: `no_std` float math for Kurbo.
//! - `serde`: (de)serialize [`PickerConfig`] using camelCase keys.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod config;
mod dtbox;
mod dts;
mod error;
mod grid;
pub mod headless;
pub mod names;
mod placement;
mod state;
mod surface;
mod timers;

pub use config::{Direction, PickerConfig, Settings};
pub use dtbox::{DtBox, HeaderCell, PickerEvent, SliderAction};
pub use dts::{Dts, InputEvent};
pub use error::Error;
pub use grid::{
    Body, CellFlags, DAY_COLS, DAY_ROWS, DayCell, DayGrid, Footer, MonthGrid, PAGE_COLS,
    PAGE_ROWS, PageCell, TimeField, TimeRow, YearGrid, decade_start, header_label,
};
pub use placement::{Anchor, MIN_TOP_SPACE, Placement, page_offset, place};
pub use state::{BodyType, Listener, Listeners, PickerState, StateKey, Store};
pub use surface::{ElementLookup, InputField, Surface, SurfaceError, Target};
#[cfg(feature = "std")]
pub use timers::SystemClock;
pub use timers::{
    BLUR_DELAY_MS, Clock, Deferred, ManualClock, REFOCUS_DELAY_MS, TimerQueue,
};
