// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Date and time templates: parse text into calendar values and render them back.
//!
//! ## Parsing
//!
//! [`DateFormat`] reads `yyyy`, `yy`, `mm` and `dd`. A four-digit year wins
//! over a two-digit one; a two-digit year is placed in the reference century.
//! Missing or malformed year, month or day yields `None`.
//!
//! [`TimeFormat`] reads `hh`, `mm`, `ss` and the `a` marker. Absent fields
//! count as zero; malformed ones yield `None`. With an `am`/`pm` marker the
//! hour must be on a 12-hour clock (`1..=12`).
//!
//! ## Rendering
//!
//! Tokens are replaced in the template as written, so literal text keeps its
//! case. Numeric fields are zero-padded to two digits (the full year excepted)
//! and the marker follows the case of `a`/`A` at its position.
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use dtsel_format::{DateFormat, TimeFormat};
//!
//! let date = DateFormat::new("dd/mm/yyyy").unwrap();
//! let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
//! assert_eq!(date.render(day), "05/06/2024");
//! assert_eq!(date.parse_with_year("5/6/2024", 2026), Some(day));
//!
//! let time = TimeFormat::new("hh:mm:ss A").unwrap();
//! let t = NaiveTime::from_hms_opt(13, 30, 0).unwrap();
//! assert_eq!(time.render(t), "01:30:00 PM");
//! assert_eq!(time.parse("01:30:00 pm"), Some(13 * 3_600_000 + 30 * 60_000));
//! ```

use alloc::format;
use alloc::string::{String, ToString};

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::error::{FormatError, FormatKind};
use crate::moment::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, normalize_date};
use crate::scan::{FieldValue, Fields, Hooks, parse_fields};
use crate::token::{DateToken, TimeToken, Token};

/// A validated date template such as `dd/mm/yyyy`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateFormat {
    source: String,
    lowered: String,
}

/// A validated time template such as `HH:MM:SS` or `hh:mm a`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimeFormat {
    source: String,
    lowered: String,
}

fn validated(source: &str, kind: FormatKind) -> Result<(String, String), FormatError> {
    if source.is_empty() {
        return Err(FormatError::Empty { kind });
    }
    Ok((source.to_string(), source.to_ascii_lowercase()))
}

/// Substitutes every token of `lowered` with `field(token, spelling)`.
///
/// `source` and `lowered` differ only in ASCII case, so byte offsets agree.
fn render_with<T: Token>(
    source: &str,
    lowered: &str,
    mut field: impl FnMut(T, &str) -> String,
) -> String {
    let mut out = String::with_capacity(source.len() + 4);
    let mut i = 0;
    while i < source.len() {
        if let Some(token) = T::match_prefix(&lowered[i..]) {
            let end = i + token.width();
            out.push_str(&field(token, &source[i..end]));
            i = end;
        } else {
            let Some(ch) = source[i..].chars().next() else {
                break;
            };
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    out
}

/// The current year from the local clock.
#[cfg(feature = "std")]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl DateFormat {
    /// Validates `source`; an empty template is a configuration error.
    pub fn new(source: &str) -> Result<Self, FormatError> {
        let (source, lowered) = validated(source, FormatKind::Date)?;
        Ok(Self { source, lowered })
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of whitespace-separated words a rendered date occupies.
    pub fn word_count(&self) -> usize {
        self.source.split_whitespace().count().max(1)
    }

    /// Raw fields of `text`, with `yy` placed in `reference_year`'s century.
    pub fn fields(&self, text: &str, reference_year: i32) -> Fields<DateToken> {
        let century = i64::from(reference_year.div_euclid(100)) * 100;
        let hooks = Hooks::new()
            .can_skip(DateToken::Yy, |f: &Fields<DateToken>| {
                f.value(DateToken::Yyyy).number().is_some()
            })
            .update_value(DateToken::Yy, move |value, _, _| match value {
                FieldValue::Number(yy) => FieldValue::Number(century + yy),
                other => other,
            });
        parse_fields(text, &self.lowered, &hooks)
    }

    /// Parses `text`, placing two-digit years in `reference_year`'s century.
    pub fn parse_with_year(&self, text: &str, reference_year: i32) -> Option<NaiveDate> {
        let fields = self.fields(text, reference_year);
        let year = fields
            .value(DateToken::Yyyy)
            .number()
            .or_else(|| fields.value(DateToken::Yy).number())?;
        let month = fields.value(DateToken::Mm).number()?;
        let day = fields.value(DateToken::Dd).number()?;
        normalize_date(year, month.checked_sub(1)?, day)
    }

    /// Parses `text`, placing two-digit years in the current century.
    #[cfg(feature = "std")]
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        self.parse_with_year(text, current_year())
    }

    /// Renders `date` through the template.
    pub fn render(&self, date: NaiveDate) -> String {
        render_with(&self.source, &self.lowered, |token, _| match token {
            DateToken::Yyyy => format!("{:04}", date.year()),
            DateToken::Yy => format!("{:02}", date.year().rem_euclid(100)),
            DateToken::Mm => format!("{:02}", date.month()),
            DateToken::Dd => format!("{:02}", date.day()),
        })
    }
}

impl TimeFormat {
    /// Validates `source`; an empty template is a configuration error.
    pub fn new(source: &str) -> Result<Self, FormatError> {
        let (source, lowered) = validated(source, FormatKind::Time)?;
        Ok(Self { source, lowered })
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the template carries an `am`/`pm` marker.
    pub fn has_meridiem(&self) -> bool {
        self.lowered.contains(TimeToken::Meridiem.as_str())
    }

    /// Raw fields of `text`.
    ///
    /// The marker field holds the two characters found at its position, not
    /// an integer.
    pub fn fields(&self, text: &str) -> Fields<TimeToken> {
        let hooks = Hooks::new().update_value(TimeToken::Meridiem, |_, _, span| {
            let end = (span.start + 2).min(text.len());
            match text.get(span.start..end) {
                Some(marker) if !marker.is_empty() => FieldValue::Text(marker.to_string()),
                _ => FieldValue::Missing,
            }
        });
        parse_fields(text, &self.lowered, &hooks)
    }

    /// Parses `text` into milliseconds since midnight.
    pub fn parse(&self, text: &str) -> Option<i64> {
        let fields = self.fields(text);
        let component = |token| match fields.value(token) {
            FieldValue::Missing => Some(0),
            FieldValue::Number(n) => Some(*n),
            FieldValue::Malformed | FieldValue::Text(_) => None,
        };
        let mut hours = component(TimeToken::Hh)?;
        let minutes = component(TimeToken::Mm)?;
        let seconds = component(TimeToken::Ss)?;

        let marker = fields
            .value(TimeToken::Meridiem)
            .text()
            .map(str::to_ascii_lowercase);
        if let Some(marker @ ("am" | "pm")) = marker.as_deref() {
            if !(1..=12).contains(&hours) {
                return None;
            }
            hours %= 12;
            if marker == "pm" {
                hours += 12;
            }
        }

        hours
            .checked_mul(MS_PER_HOUR)?
            .checked_add(minutes.checked_mul(MS_PER_MINUTE)?)?
            .checked_add(seconds.checked_mul(MS_PER_SECOND)?)
    }

    /// Renders `time` through the template.
    pub fn render(&self, time: NaiveTime) -> String {
        let meridiem = self.has_meridiem();
        let hour = time.hour();
        render_with(&self.source, &self.lowered, |token, spelling| match token {
            TimeToken::Hh if meridiem => {
                let h12 = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                format!("{h12:02}")
            }
            TimeToken::Hh => format!("{hour:02}"),
            TimeToken::Mm => format!("{:02}", time.minute()),
            TimeToken::Ss => format!("{:02}", time.second()),
            TimeToken::Meridiem => {
                let marker = if hour >= 12 { "pm" } else { "am" };
                if spelling == "A" {
                    marker.to_ascii_uppercase()
                } else {
                    marker.to_string()
                }
            }
        })
    }
}

/// Parses `text` as a date using `format`, with two-digit years in the current century.
#[cfg(feature = "std")]
pub fn parse_date(text: &str, format: &str) -> Result<Option<NaiveDate>, FormatError> {
    Ok(DateFormat::new(format)?.parse(text))
}

/// Parses `text` as a date using `format`, with two-digit years in `reference_year`'s century.
pub fn parse_date_with_year(
    text: &str,
    format: &str,
    reference_year: i32,
) -> Result<Option<NaiveDate>, FormatError> {
    Ok(DateFormat::new(format)?.parse_with_year(text, reference_year))
}

/// Parses `text` as a time of day using `format`; returns milliseconds since midnight.
pub fn parse_time(text: &str, format: &str) -> Result<Option<i64>, FormatError> {
    Ok(TimeFormat::new(format)?.parse(text))
}

/// Renders `date` using `format`.
pub fn render_date(date: NaiveDate, format: &str) -> Result<String, FormatError> {
    Ok(DateFormat::new(format)?.render(date))
}

/// Renders `time` using `format`.
pub fn render_time(time: NaiveTime, format: &str) -> Result<String, FormatError> {
    Ok(TimeFormat::new(format)?.render(time))
}
