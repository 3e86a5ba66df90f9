// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors raised when a format template is unusable.

/// Which template a [`FormatError`] refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FormatKind {
    /// A date template such as `dd/mm/yyyy`.
    Date,
    /// A time template such as `HH:MM:SS`.
    Time,
}

impl core::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Date => "dateFormat",
            Self::Time => "timeFormat",
        })
    }
}

/// A format template could not be used.
///
/// Returned when a [`DateFormat`](crate::DateFormat) or
/// [`TimeFormat`](crate::TimeFormat) is constructed, so a misconfigured
/// picker fails at setup time rather than on the first parse.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// The template was empty.
    #[error("{kind} not found (empty template)")]
    Empty {
        /// The template that was missing.
        kind: FormatKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn message_names_the_setting() {
        let err = FormatError::Empty {
            kind: FormatKind::Time,
        };
        assert_eq!(err.to_string(), "timeFormat not found (empty template)");
    }
}
