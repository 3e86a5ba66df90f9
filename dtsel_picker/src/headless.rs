// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory hosts for tests, benchmarks and terminal demos.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::grid::{Body, Footer};
use crate::placement::Placement;
use crate::surface::{ElementLookup, InputField, Surface, SurfaceError};

/// An input that keeps its text and focus in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryInput {
    /// Current text.
    pub text: String,
    /// Page-space bounds.
    pub bounds: Rect,
    /// Whether the input holds focus.
    pub focused: bool,
    /// Number of [`InputField::focus`] calls so far.
    pub focus_calls: usize,
}

impl MemoryInput {
    /// An input holding `text` at `bounds`.
    pub fn new(text: &str, bounds: Rect) -> Self {
        Self {
            text: text.to_string(),
            bounds,
            ..Default::default()
        }
    }
}

impl InputField for MemoryInput {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn focus(&mut self) {
        self.focused = true;
        self.focus_calls += 1;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}

/// A surface that records the last thing rendered into each region.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordingSurface {
    /// Viewport reported to the picker.
    pub viewport: Size,
    /// Whether the overlay is attached.
    pub attached: bool,
    /// Make [`Surface::attach`] fail with this error.
    pub fail_attach: Option<SurfaceError>,
    /// Last placement.
    pub placement: Option<Placement>,
    /// Last header label.
    pub header: Option<String>,
    /// Last calendar grid.
    pub body: Option<Body>,
    /// Last slider positions.
    pub footer: Option<Footer>,
}

impl RecordingSurface {
    /// An empty surface with a `viewport`-sized window.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            attached: false,
            fail_attach: None,
            placement: None,
            header: None,
            body: None,
            footer: None,
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(Size::new(1024.0, 768.0))
    }
}

impl Surface for RecordingSurface {
    fn attach(&mut self) -> Result<(), SurfaceError> {
        if let Some(err) = &self.fail_attach {
            return Err(err.clone());
        }
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn place(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }

    fn render_header(&mut self, label: &str) {
        self.header = Some(label.to_string());
    }

    fn render_body(&mut self, body: &Body) {
        self.body = Some(body.clone());
    }

    fn render_footer(&mut self, footer: &Footer) {
        self.footer = Some(*footer);
    }
}

/// Inputs registered under exact selector strings.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    entries: Vec<(String, MemoryInput)>,
}

impl MemoryDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `input` under `selector`. Earlier entries win on lookup.
    pub fn insert(&mut self, selector: &str, input: MemoryInput) {
        self.entries.push((selector.to_string(), input));
    }
}

impl ElementLookup for MemoryDocument {
    type Element = MemoryInput;

    fn query_first(&self, selector: &str) -> Option<MemoryInput> {
        self.entries
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, input)| input.clone())
    }
}
