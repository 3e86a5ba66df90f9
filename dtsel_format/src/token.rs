// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed token vocabularies for date and time templates.
//!
//! Templates are matched case-insensitively against these spellings, so
//! `DD/MM/YYYY` and `dd/mm/yyyy` describe the same layout.

/// A member of a fixed template vocabulary.
///
/// [`Token::ALL`] lists the vocabulary in matching priority: when two
/// spellings start at the same template offset, the earlier entry wins
/// (`yyyy` before `yy`).
pub trait Token: Copy + Eq + core::fmt::Debug + 'static {
    /// Every token of the vocabulary, in matching priority.
    const ALL: &'static [Self];

    /// Lowercase spelling of the token inside a template.
    fn as_str(self) -> &'static str;

    /// Length of the spelling in bytes.
    fn width(self) -> usize {
        self.as_str().len()
    }

    /// Returns the token whose spelling starts `lowered`, if any.
    ///
    /// `lowered` must already be ASCII-lowercased.
    fn match_prefix(lowered: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| lowered.starts_with(t.as_str()))
    }
}

/// Date template tokens.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DateToken {
    /// Four-digit year.
    Yyyy,
    /// Two-digit year, expanded with the current century when parsed.
    Yy,
    /// One-based month.
    Mm,
    /// Day of month.
    Dd,
}

impl Token for DateToken {
    const ALL: &'static [Self] = &[Self::Yyyy, Self::Yy, Self::Mm, Self::Dd];

    fn as_str(self) -> &'static str {
        match self {
            Self::Yyyy => "yyyy",
            Self::Yy => "yy",
            Self::Mm => "mm",
            Self::Dd => "dd",
        }
    }
}

/// Time template tokens.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TimeToken {
    /// Hours; 12-hour clock when the template also carries [`TimeToken::Meridiem`].
    Hh,
    /// Minutes.
    Mm,
    /// Seconds.
    Ss,
    /// The `am`/`pm` marker (`a` in the template, `A` for uppercase output).
    Meridiem,
}

impl Token for TimeToken {
    const ALL: &'static [Self] = &[Self::Hh, Self::Mm, Self::Ss, Self::Meridiem];

    fn as_str(self) -> &'static str {
        match self {
            Self::Hh => "hh",
            Self::Mm => "mm",
            Self::Ss => "ss",
            Self::Meridiem => "a",
        }
    }
}
