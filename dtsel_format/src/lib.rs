// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dtsel_format --heading-base-level=0

//! Dtsel Format: template-driven date and time parsing and rendering.
//!
//! ## Overview
//!
//! Date pickers bound to plain text inputs need to read whatever the user
//! typed and write back what they picked, using a template chosen by the
//! page author (`dd/mm/yyyy`, `yyyy-mm-dd`, `hh:mm a`...). This crate does
//! both directions without a locale database:
//!
//! - [`scan`]: the generic field extractor. Given a value, a template and a
//!   token vocabulary, it locates each token's substring, tolerating
//!   variable-width numbers between literal separators.
//! - [`DateFormat`] / [`TimeFormat`]: validated templates that layer date
//!   and time meaning on top of the extractor and render values back.
//! - [`Moment`]: a normalized date and time of day; out-of-range parts roll
//!   over into adjacent months and years.
//!
//! ## Vocabulary
//!
//! | Template | Meaning |
//! |---|---|
//! | `yyyy` / `yy` | four- or two-digit year |
//! | `mm` | month (date) or minutes (time) |
//! | `dd` | day of month |
//! | `hh` | hours |
//! | `ss` | seconds |
//! | `a` / `A` | `am`/`pm` marker, lower or upper case |
//!
//! Matching is case-insensitive. Everything else in a template is literal.
//!
//! ## Invalid input
//!
//! Parsing never fails on bad data: unreadable fields surface as
//! [`FieldValue::Malformed`](scan::FieldValue::Malformed) and the typed
//! parsers return `None`. Only an empty template is an error
//! ([`FormatError`]).
//!
//! ## Example
//!
//! ```
//! use dtsel_format::{DateFormat, Moment, TimeFormat};
//!
//! let date = DateFormat::new("dd/mm/yyyy").unwrap();
//! let time = TimeFormat::new("HH:MM:SS").unwrap();
//!
//! let day = date.parse_with_year("5/6/2024", 2026).unwrap();
//! let ms = time.parse("13:30:00").unwrap();
//! let moment = Moment::from_date_and_time(day, ms).unwrap();
//!
//! assert_eq!(date.render(moment.date()), "05/06/2024");
//! assert_eq!(time.render(moment.time_of_day()), "13:30:00");
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature (on by
//! default) adds parsing against the local clock's current century.

#![no_std]

extern crate alloc;

mod codec;
mod error;
mod moment;
pub mod scan;
mod token;

#[cfg(feature = "std")]
pub use codec::{current_year, parse_date};
pub use codec::{
    DateFormat, TimeFormat, parse_date_with_year, parse_time, render_date, render_time,
};
pub use error::{FormatError, FormatKind};
pub use moment::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, Moment, normalize_date};
pub use token::{DateToken, TimeToken, Token};
