// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Template-driven field extraction.
//!
//! ## Overview
//!
//! [`parse_fields`] walks a template and a value side by side and pulls one
//! [`ParsedField`] out of the value for every token of a vocabulary. It knows
//! nothing about dates: callers layer meaning on top with [`Hooks`], which
//! bind closures to specific tokens for a single call.
//!
//! ## Field boundaries
//!
//! Tokens are visited in template order. Equal offsets prefer the longer
//! token, so `yyyy` is consumed before `yy` can claim half of it.
//!
//! The literal text between a token and the nearest later token in the
//! template is its separator. Overlapping spellings (the `yy` inside `yyyy`)
//! never count as the next token. An empty separator makes the field fixed-width.
//! Otherwise the separator is searched for in the value, which lets
//! `dd/mm/yyyy` read `5/6/2024`.
//!
//! ## Example
//!
//! ```
//! use dtsel_format::scan::{FieldValue, Hooks, parse_fields};
//! use dtsel_format::DateToken;
//!
//! let fields = parse_fields("5/6/2024", "dd/mm/yyyy", &Hooks::new());
//! assert_eq!(fields.value(DateToken::Dd), &FieldValue::Number(5));
//! assert_eq!(fields.value(DateToken::Mm), &FieldValue::Number(6));
//! assert_eq!(fields.value(DateToken::Yyyy), &FieldValue::Number(2024));
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::token::Token;

/// What was extracted for one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// The token is not in the template, or a hook skipped it.
    Missing,
    /// The value text at this position does not start with an integer.
    Malformed,
    /// A leniently parsed integer.
    Number(i64),
    /// Raw text placed by a hook (for example an `am`/`pm` marker).
    Text(String),
}

impl FieldValue {
    /// Returns the integer, if one was parsed.
    pub fn number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the raw text, if a hook produced some.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for [`FieldValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

static MISSING: FieldValue = FieldValue::Missing;

/// One extracted field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedField {
    /// Offset in the value where extraction began.
    pub index: usize,
    /// Extracted value.
    pub value: FieldValue,
}

/// Byte range of the value text a field was read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// First byte of the field.
    pub start: usize,
    /// One past the last byte of the field.
    pub stop: usize,
}

/// Parsed fields, in the order they were visited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fields<T> {
    entries: Vec<(T, ParsedField)>,
}

impl<T: Token> Fields<T> {
    fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, token: T, field: ParsedField) {
        self.entries.push((token, field));
    }

    /// Returns the field recorded for `token`, if it has been visited.
    pub fn get(&self, token: T) -> Option<&ParsedField> {
        self.entries
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, f)| f)
    }

    /// Returns the value recorded for `token`, or [`FieldValue::Missing`].
    pub fn value(&self, token: T) -> &FieldValue {
        self.get(token).map_or(&MISSING, |f| &f.value)
    }

    /// Iterates over the visited tokens in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &ParsedField)> + '_ {
        self.entries.iter().map(|(t, f)| (*t, f))
    }
}

type SkipHook<'a, T> = Box<dyn Fn(&Fields<T>) -> bool + 'a>;
type UpdateHook<'a, T> = Box<dyn Fn(FieldValue, &Fields<T>, Span) -> FieldValue + 'a>;

/// Per-call customizations bound to specific tokens.
///
/// - `can_skip` hooks run before a token is read; if any returns `true` the
///   token is recorded as [`FieldValue::Missing`] and the scan cursor stays put.
/// - `update_value` hooks run after the integer parse, in registration order,
///   and may replace the value (for example to expand a two-digit year).
pub struct Hooks<'a, T> {
    can_skip: Vec<(T, SkipHook<'a, T>)>,
    update_value: Vec<(T, UpdateHook<'a, T>)>,
}

impl<T> core::fmt::Debug for Hooks<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hooks")
            .field("can_skip", &self.can_skip.len())
            .field("update_value", &self.update_value.len())
            .finish()
    }
}

impl<T> Default for Hooks<'_, T> {
    fn default() -> Self {
        Self {
            can_skip: Vec::new(),
            update_value: Vec::new(),
        }
    }
}

impl<'a, T: Token> Hooks<'a, T> {
    /// No hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip `token` whenever `f` returns `true` for the fields read so far.
    pub fn can_skip(mut self, token: T, f: impl Fn(&Fields<T>) -> bool + 'a) -> Self {
        self.can_skip.push((token, Box::new(f)));
        self
    }

    /// Transform the value read for `token`.
    pub fn update_value(
        mut self,
        token: T,
        f: impl Fn(FieldValue, &Fields<T>, Span) -> FieldValue + 'a,
    ) -> Self {
        self.update_value.push((token, Box::new(f)));
        self
    }

    fn skips(&self, token: T, fields: &Fields<T>) -> bool {
        self.can_skip
            .iter()
            .filter(|(t, _)| *t == token)
            .any(|(_, f)| f(fields))
    }

    fn update(&self, token: T, mut value: FieldValue, fields: &Fields<T>, span: Span) -> FieldValue {
        for (_, f) in self.update_value.iter().filter(|(t, _)| *t == token) {
            value = f(value, fields, span);
        }
        value
    }
}

/// Orders a vocabulary by first occurrence in `format`.
///
/// Absent tokens sort last. Equal offsets prefer the longer token.
pub fn order_tokens<T: Token>(format: &str) -> Vec<T> {
    let mut tokens = T::ALL.to_vec();
    tokens.sort_by(|a, b| {
        match (format.find(a.as_str()), format.find(b.as_str())) {
            (Some(x), Some(y)) => x.cmp(&y).then(b.width().cmp(&a.width())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    tokens
}

/// Parses a leading integer the way lenient form inputs expect.
///
/// Leading whitespace and one sign are accepted, then digits up to the
/// first non-digit. Anything after that is ignored. No digits at all yields
/// [`FieldValue::Malformed`].
pub fn parse_int(raw: &str) -> FieldValue {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return FieldValue::Malformed;
    }
    match digits[..end].parse::<i64>() {
        Ok(n) if negative => FieldValue::Number(-n),
        Ok(n) => FieldValue::Number(n),
        Err(_) => FieldValue::Malformed,
    }
}

/// Extracts one field per vocabulary token from `value`.
///
/// `format` must already be ASCII-lowercased. Every token of the vocabulary
/// gets an entry; tokens absent from `format` are recorded as
/// `{ index: 0, value: Missing }` and do not move the scan cursor.
pub fn parse_fields<T: Token>(value: &str, format: &str, hooks: &Hooks<'_, T>) -> Fields<T> {
    let order = order_tokens::<T>(format);
    let mut fields = Fields::with_capacity(order.len());
    let mut cursor = 0;

    for (i, &token) in order.iter().enumerate() {
        let Some(position) = format.find(token.as_str()) else {
            fields.push(
                token,
                ParsedField {
                    index: 0,
                    value: FieldValue::Missing,
                },
            );
            continue;
        };

        // Until something is consumed, fields start where the template puts them.
        let start = if cursor == 0 { position } else { cursor };

        if hooks.skips(token, &fields) {
            fields.push(
                token,
                ParsedField {
                    index: start,
                    value: FieldValue::Missing,
                },
            );
            continue;
        }

        let mut stop = start + token.width();
        let mut next_cursor = stop;
        let field_end = position + token.width();
        let next_token = order[i + 1..]
            .iter()
            .filter_map(|t| format[field_end..].find(t.as_str()))
            .min();
        if let Some(gap) = next_token {
            let separator = &format[field_end..field_end + gap];
            if !separator.is_empty()
                && let Some(found) = value.get(start..).and_then(|rest| rest.find(separator))
                && found > 0
            {
                stop = start + found;
                next_cursor = stop + separator.len();
            }
        }

        let end = stop.min(value.len());
        let raw = value.get(start.min(end)..end).unwrap_or("");
        let parsed = hooks.update(token, parse_int(raw), &fields, Span { start, stop });
        fields.push(
            token,
            ParsedField {
                index: start,
                value: parsed,
            },
        );
        cursor = next_cursor;
    }

    tracing::trace!(value, format, ?fields, "parsed template fields");
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{DateToken, TimeToken};
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn order_follows_template_and_prefers_longer_tokens() {
        assert_eq!(
            order_tokens::<DateToken>("dd/mm/yyyy"),
            vec![DateToken::Dd, DateToken::Mm, DateToken::Yyyy, DateToken::Yy]
        );
        assert_eq!(
            order_tokens::<DateToken>("mm-dd-yy"),
            vec![DateToken::Mm, DateToken::Dd, DateToken::Yy, DateToken::Yyyy]
        );
    }

    #[test]
    fn lenient_integers() {
        assert_eq!(parse_int("6/"), FieldValue::Number(6));
        assert_eq!(parse_int(" 07"), FieldValue::Number(7));
        assert_eq!(parse_int("-3x"), FieldValue::Number(-3));
        assert_eq!(parse_int("ab"), FieldValue::Malformed);
        assert_eq!(parse_int(""), FieldValue::Malformed);
    }

    #[test]
    fn variable_width_fields_are_bounded_by_separators() {
        let fields = parse_fields("5/6/2024", "dd/mm/yyyy", &Hooks::<DateToken>::new());
        assert_eq!(fields.value(DateToken::Dd), &FieldValue::Number(5));
        assert_eq!(fields.value(DateToken::Mm), &FieldValue::Number(6));
        assert_eq!(fields.value(DateToken::Yyyy), &FieldValue::Number(2024));
        assert_eq!(fields.get(DateToken::Mm).map(|f| f.index), Some(2));
        assert_eq!(fields.get(DateToken::Yyyy).map(|f| f.index), Some(4));
    }

    #[test]
    fn skip_hook_leaves_cursor_untouched() {
        let hooks = Hooks::new().can_skip(DateToken::Yy, |f: &Fields<DateToken>| {
            f.value(DateToken::Yyyy).number().is_some()
        });
        let fields = parse_fields("2024-24", "yyyy-yy", &hooks);
        assert_eq!(fields.value(DateToken::Yyyy), &FieldValue::Number(2024));
        assert_eq!(fields.value(DateToken::Yy), &FieldValue::Missing);
        assert_eq!(fields.get(DateToken::Yy).map(|f| f.index), Some(5));
    }

    #[test]
    fn absent_tokens_are_missing_at_zero() {
        let fields = parse_fields("10:15", "hh:mm", &Hooks::<TimeToken>::new());
        assert_eq!(fields.value(TimeToken::Hh), &FieldValue::Number(10));
        assert_eq!(fields.value(TimeToken::Mm), &FieldValue::Number(15));
        let ss = fields.get(TimeToken::Ss).expect("every token gets an entry");
        assert_eq!(ss.index, 0);
        assert!(ss.value.is_missing());
    }

    #[test]
    fn update_hooks_see_the_raw_span() {
        let text = "01:30:00 pm";
        let hooks = Hooks::new().update_value(TimeToken::Meridiem, |_, _, span: Span| {
            FieldValue::Text(text[span.start..span.start + 2].to_string())
        });
        let fields = parse_fields(text, "hh:mm:ss a", &hooks);
        assert_eq!(fields.value(TimeToken::Meridiem).text(), Some("pm"));
        assert_eq!(fields.value(TimeToken::Ss), &FieldValue::Number(0));
    }

    #[test]
    fn overlapping_spellings_do_not_hide_separators() {
        let hooks = Hooks::new().can_skip(DateToken::Yy, |f: &Fields<DateToken>| {
            f.value(DateToken::Yyyy).number().is_some()
        });
        let fields = parse_fields("2024-6-05", "yyyy-mm-dd", &hooks);
        assert_eq!(fields.value(DateToken::Yyyy), &FieldValue::Number(2024));
        assert_eq!(fields.value(DateToken::Mm), &FieldValue::Number(6));
        assert_eq!(fields.value(DateToken::Dd), &FieldValue::Number(5));
    }

    #[test]
    fn garbage_is_malformed_not_fatal() {
        let fields = parse_fields("xx/06/2024", "dd/mm/yyyy", &Hooks::<DateToken>::new());
        assert_eq!(fields.value(DateToken::Dd), &FieldValue::Malformed);
        assert_eq!(fields.value(DateToken::Mm), &FieldValue::Number(6));
    }

    #[test]
    fn literal_prefix_shifts_the_first_field() {
        let fields = parse_fields("[05]", "[dd]", &Hooks::<DateToken>::new());
        assert_eq!(fields.value(DateToken::Dd), &FieldValue::Number(5));
        assert_eq!(fields.get(DateToken::Dd).map(|f| f.index), Some(1));
    }

    #[test]
    fn short_values_do_not_panic() {
        let fields = parse_fields("1", "dd/mm/yyyy", &Hooks::<DateToken>::new());
        assert_eq!(fields.value(DateToken::Dd), &FieldValue::Number(1));
        assert_eq!(fields.value(DateToken::Mm), &FieldValue::Malformed);
        assert_eq!(fields.value(DateToken::Yyyy), &FieldValue::Malformed);
    }
}
