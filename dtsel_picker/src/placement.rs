// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay positioning relative to the bound input.

use kurbo::{Rect, Size, Vec2};

use crate::config::{Direction, PickerConfig};

/// Space above the input, in pixels, required before the overlay opens upwards.
pub const MIN_TOP_SPACE: f64 = 300.0;

/// Which overlay edge is pinned, and where.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// Overlay top edge, measured from the page top.
    Top(f64),
    /// Overlay bottom edge, measured from the viewport bottom.
    Bottom(f64),
}

/// Where to put the overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Overlay left edge, measured from the page left.
    pub left: f64,
    /// Vertical anchoring.
    pub anchor: Anchor,
}

/// Converts viewport-relative `client` bounds to page coordinates.
pub fn page_offset(client: Rect, scroll: Vec2) -> Rect {
    client + scroll
}

/// Positions the overlay next to `input` (page coordinates).
///
/// The overlay opens above the input when more than [`MIN_TOP_SPACE`] pixels
/// separate it from the page top, unless the configuration asks for
/// [`Direction::Bottom`].
pub fn place(input: Rect, viewport: Size, config: &PickerConfig) -> Placement {
    let left = input.x0 + config.padding_x;
    let anchor = if input.y0 > MIN_TOP_SPACE && config.direction != Direction::Bottom {
        Anchor::Bottom(viewport.height - input.y0 + config.padding_y)
    } else {
        Anchor::Top(input.y1 + config.padding_y)
    };
    Placement { left, anchor }
}
