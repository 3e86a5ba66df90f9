// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing seams: the bound input, the overlay surface, and target lookup.
//!
//! The picker never touches a document directly. Hosts implement these
//! traits over whatever they render with; [`crate::headless`] has in-memory
//! versions.

use alloc::string::String;

use kurbo::{Rect, Size};

use crate::grid::{Body, Footer};
use crate::placement::Placement;

/// Failure to insert the overlay into the host.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The node the overlay hangs from is gone.
    #[error("overlay parent is detached")]
    Detached,
    /// Any other host failure.
    #[error("could not attach overlay: {reason}")]
    Host {
        /// Host-provided description.
        reason: String,
    },
}

/// A text input a picker is bound to.
pub trait InputField {
    /// Current text.
    fn text(&self) -> String;

    /// Replaces the text.
    fn set_text(&mut self, text: &str);

    /// Bounds in page coordinates (see [`page_offset`](crate::page_offset)).
    fn bounds(&self) -> Rect;

    /// Gives the input keyboard focus.
    fn focus(&mut self);

    /// Removes keyboard focus from the input.
    fn blur(&mut self);
}

/// The overlay a picker draws into.
///
/// Header, body and footer are only rendered for the parts the
/// configuration shows.
pub trait Surface {
    /// Inserts the overlay into the host.
    fn attach(&mut self) -> Result<(), SurfaceError>;

    /// Removes the overlay from the host.
    fn detach(&mut self);

    /// Size of the visible viewport.
    fn viewport(&self) -> Size;

    /// Moves the overlay.
    fn place(&mut self, placement: Placement);

    /// Shows `label` in the header's middle cell.
    fn render_header(&mut self, label: &str);

    /// Replaces the calendar grid.
    fn render_body(&mut self, body: &Body);

    /// Updates the time sliders.
    fn render_footer(&mut self, footer: &Footer);
}

/// Resolves selectors to inputs.
pub trait ElementLookup {
    /// The element type selectors resolve to.
    type Element;

    /// The first element matching `selector`.
    fn query_first(&self, selector: &str) -> Option<Self::Element>;
}

/// What a picker binds to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target<'a, E> {
    /// An element the host already holds.
    Element(E),
    /// A selector resolved through an [`ElementLookup`].
    Selector(&'a str),
}
