// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned when binding a picker to an input.

use alloc::string::String;

use dtsel_format::FormatError;

/// Errors raised while binding a picker.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A template the configuration shows is empty.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The selector matched no element.
    #[error("\"{selector}\" not found")]
    TargetNotFound {
        /// The selector as given.
        selector: String,
    },
}
