// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding a picker to an input: focus and blur handling, deferred tasks, teardown.
//!
//! ## Usage
//!
//! 1) Build a [`Dts`] from a [`Target`] and a [`PickerConfig`]; bad templates and
//!    unknown selectors fail here.
//! 2) Forward the input's focus and blur with [`Dts::handle_input`] and overlay
//!    clicks with [`Dts::handle_picker`].
//! 3) Call [`Dts::advance`] from the host's timer tick to run due deferred tasks.
//!
//! A blur does not hide the picker right away. It is resolved
//! [`BLUR_DELAY_MS`](crate::BLUR_DELAY_MS) later, and each pointer-down inside
//! the overlay in the meantime cancels one pending blur.

use alloc::string::ToString;
use core::mem;

use tracing::debug;

use crate::config::{PickerConfig, Settings};
use crate::dtbox::{DtBox, PickerEvent};
use crate::error::Error;
use crate::state::{Listeners, PickerState, StateKey};
use crate::surface::{ElementLookup, InputField, Surface, Target};
use crate::timers::{Clock, Deferred, TimerQueue};

/// Focus changes on the bound input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
}

/// A date/time selector bound to one input.
///
/// The [`DtBox`] behind it is created on first focus and kept across
/// focus/blur cycles until [`Dts::destroy`].
#[derive(Debug)]
pub struct Dts<I, S, C> {
    input: I,
    surface: S,
    clock: C,
    settings: Settings,
    picker: Option<DtBox>,
    pending: Listeners,
    timers: TimerQueue,
    generation: u32,
}

impl<I: InputField, S: Surface, C: Clock> Dts<I, S, C> {
    /// Binds to `target`, resolving selectors through `lookup`.
    pub fn new<L>(
        target: Target<'_, I>,
        lookup: &L,
        surface: S,
        clock: C,
        config: PickerConfig,
    ) -> Result<Self, Error>
    where
        L: ElementLookup<Element = I>,
    {
        let input = match target {
            Target::Element(input) => input,
            Target::Selector(selector) => {
                lookup
                    .query_first(selector)
                    .ok_or_else(|| Error::TargetNotFound {
                        selector: selector.to_string(),
                    })?
            }
        };
        Self::from_element(input, surface, clock, config)
    }

    /// Binds to an input the host already holds.
    pub fn from_element(input: I, surface: S, clock: C, config: PickerConfig) -> Result<Self, Error> {
        let settings = Settings::new(config)?;
        Ok(Self {
            input,
            surface,
            clock,
            settings,
            picker: None,
            pending: Listeners::default(),
            timers: TimerQueue::new(),
            generation: 1,
        })
    }

    /// Reacts to focus changes on the input.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Focus => self.open(),
            InputEvent::Blur => {
                if self.is_visible() {
                    self.schedule(Deferred::ResolveBlur);
                }
            }
        }
    }

    /// Forwards an overlay interaction to the picker.
    pub fn handle_picker(&mut self, event: PickerEvent) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        if let Some(task) = picker.handle(event, &mut self.input, &mut self.surface) {
            self.schedule(task);
        }
    }

    /// Repositions a visible overlay, e.g. after the window was resized.
    pub fn resize(&mut self) {
        if let Some(picker) = self.picker.as_ref().filter(|p| p.state().visible) {
            picker.reposition(&self.input, &mut self.surface);
        }
    }

    /// Runs every deferred task that is due, returning how many ran.
    ///
    /// Tasks scheduled by a picker that has since been destroyed are dropped.
    pub fn advance(&mut self) -> usize {
        let now = self.clock.now_millis();
        let mut ran = 0;
        while let Some((generation, task)) = self.timers.pop_due(now) {
            let live = self
                .picker
                .as_ref()
                .is_some_and(|p| p.generation() == generation);
            if !live {
                debug!(generation, ?task, "dropping task of a destroyed picker");
                continue;
            }
            self.run(task);
            ran += 1;
        }
        ran
    }

    /// Hides and drops the picker. A later focus builds a new one.
    ///
    /// Listeners are kept for that next picker.
    pub fn destroy(&mut self) {
        let Some(mut picker) = self.picker.take() else {
            return;
        };
        picker.hide(&mut self.surface);
        self.pending = picker.into_listeners();
        debug!(generation = self.generation, "picker destroyed");
        self.generation = self.generation.wrapping_add(1);
    }

    /// Registers `listener` for changes to `key`.
    pub fn subscribe(
        &mut self,
        key: StateKey,
        listener: impl FnMut(PickerState, PickerState) + 'static,
    ) {
        match self.picker.as_mut() {
            Some(picker) => picker.subscribe(key, listener),
            None => self.pending.subscribe(key, listener),
        }
    }

    /// The picker's state, once it exists.
    pub fn state(&self) -> Option<PickerState> {
        self.picker.as_ref().map(DtBox::state)
    }

    /// Whether the overlay is shown.
    pub fn is_visible(&self) -> bool {
        self.state().is_some_and(|s| s.visible)
    }

    /// The bound input.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The bound input, mutably.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The overlay surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The validated configuration.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of deferred tasks not yet run.
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    fn open(&mut self) {
        let today = self.clock.today();
        let generation = self.generation;
        let picker = self.picker.get_or_insert_with(|| {
            debug!(generation, "creating picker");
            DtBox::new(self.settings.clone(), generation, mem::take(&mut self.pending))
        });
        picker.show(&mut self.input, &mut self.surface, today);
    }

    fn schedule(&mut self, task: Deferred) {
        let due = self.clock.now_millis().saturating_add(task.delay_ms());
        self.timers.schedule(due, self.generation, task);
    }

    fn run(&mut self, task: Deferred) {
        match task {
            Deferred::ResolveBlur => {
                let Some(picker) = self.picker.as_mut() else {
                    return;
                };
                if !picker.consume_blur_credit() {
                    picker.hide(&mut self.surface);
                    self.input.blur();
                }
            }
            Deferred::Refocus => {
                self.input.focus();
                self.open();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtbox::{HeaderCell, SliderAction};
    use crate::grid::{Body, CellFlags, TimeField};
    use crate::headless::{MemoryDocument, MemoryInput, RecordingSurface};
    use crate::state::BodyType;
    use crate::surface::SurfaceError;
    use crate::timers::ManualClock;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use chrono::NaiveDate;
    use core::cell::RefCell;
    use dtsel_format::{FormatError, FormatKind};
    use kurbo::Rect;

    type TestDts = Dts<MemoryInput, RecordingSurface, ManualClock>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn bind(text: &str, config: PickerConfig) -> (TestDts, ManualClock) {
        let clock = ManualClock::new(today());
        let input = MemoryInput::new(text, Rect::new(10.0, 40.0, 210.0, 64.0));
        let dts =
            Dts::from_element(input, RecordingSurface::default(), clock.clone(), config).unwrap();
        (dts, clock)
    }

    #[test]
    fn unknown_selector_is_an_error() {
        let doc = MemoryDocument::new();
        let err = TestDts::new(
            Target::Selector("#when"),
            &doc,
            RecordingSurface::default(),
            ManualClock::new(today()),
            PickerConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::TargetNotFound {
                selector: "#when".into()
            }
        );
        assert_eq!(err.to_string(), "\"#when\" not found");
    }

    #[test]
    fn selector_resolves_to_first_match() {
        let mut doc = MemoryDocument::new();
        doc.insert("#when", MemoryInput::new("01/02/2003", Rect::ZERO));
        doc.insert("#when", MemoryInput::new("09/09/2009", Rect::ZERO));
        let dts = TestDts::new(
            Target::Selector("#when"),
            &doc,
            RecordingSurface::default(),
            ManualClock::new(today()),
            PickerConfig::default(),
        )
        .unwrap();
        assert_eq!(dts.input().text, "01/02/2003");
    }

    #[test]
    fn empty_template_fails_construction() {
        let config = PickerConfig {
            date_format: "".into(),
            ..Default::default()
        };
        let err = TestDts::from_element(
            MemoryInput::default(),
            RecordingSurface::default(),
            ManualClock::new(today()),
            config,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::Format(FormatError::Empty {
                kind: FormatKind::Date
            })
        );
    }

    #[test]
    fn focus_seeds_from_the_input() {
        let (mut dts, _) = bind("05/06/2024", PickerConfig::default());
        assert!(dts.state().is_none());
        dts.handle_input(InputEvent::Focus);

        let state = dts.state().unwrap();
        assert!(state.visible);
        assert_eq!((state.year, state.month0, state.day), (2024, 5, 5));
        let surface = dts.surface();
        assert!(surface.attached);
        assert!(surface.placement.is_some());
        assert_eq!(surface.header.as_deref(), Some("June 2024"));
        let Some(Body::Days(grid)) = &surface.body else {
            panic!("expected a day grid, got {:?}", surface.body);
        };
        let selected: Vec<_> = grid
            .rows()
            .flatten()
            .filter(|c| c.flags.contains(CellFlags::VALUE))
            .map(|c| c.date)
            .collect();
        assert_eq!(selected, [NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()]);
    }

    #[test]
    fn unreadable_text_falls_back_to_today() {
        let config = PickerConfig {
            show_time: true,
            ..Default::default()
        };
        let (mut dts, _) = bind("not a date", config);
        dts.handle_input(InputEvent::Focus);
        let state = dts.state().unwrap();
        assert_eq!(state.value, Some(today()));
        assert_eq!((state.hours, state.minutes, state.seconds), (0, 0, 0));
        assert_eq!(dts.input().text, "not a date");
    }

    #[test]
    fn view_transitions_from_years_to_days() {
        let config = PickerConfig {
            default_view: BodyType::Years,
            ..Default::default()
        };
        let (mut dts, _) = bind("01/01/2026", config);
        dts.handle_input(InputEvent::Focus);
        assert_eq!(dts.surface().header.as_deref(), Some("2020-2029"));

        dts.handle_picker(PickerEvent::Year { row: 2, col: 3 });
        let state = dts.state().unwrap();
        assert_eq!(state.body_type, BodyType::Months);
        assert_eq!(state.year, 2030);
        assert_eq!(dts.surface().header.as_deref(), Some("2030"));

        dts.handle_picker(PickerEvent::Month { row: 1, col: 1 });
        let state = dts.state().unwrap();
        assert_eq!(state.body_type, BodyType::Days);
        assert_eq!((state.year, state.month0), (2030, 5));
        assert_eq!(dts.surface().header.as_deref(), Some("June 2030"));
        assert_eq!(dts.input().text, "01/01/2026");
    }

    #[test]
    fn header_navigation() {
        let (mut dts, _) = bind("15/01/2026", PickerConfig::default());
        dts.handle_input(InputEvent::Focus);

        dts.handle_picker(PickerEvent::Header(HeaderCell::Prev));
        assert_eq!(dts.surface().header.as_deref(), Some("December 2025"));
        dts.handle_picker(PickerEvent::Header(HeaderCell::Next));
        dts.handle_picker(PickerEvent::Header(HeaderCell::Next));
        assert_eq!(dts.surface().header.as_deref(), Some("February 2026"));

        dts.handle_picker(PickerEvent::Header(HeaderCell::Current));
        dts.handle_picker(PickerEvent::Header(HeaderCell::Next));
        assert_eq!(dts.surface().header.as_deref(), Some("2027"));

        dts.handle_picker(PickerEvent::Header(HeaderCell::Current));
        dts.handle_picker(PickerEvent::Header(HeaderCell::Current));
        assert_eq!(dts.state().unwrap().body_type, BodyType::Years);
        dts.handle_picker(PickerEvent::Header(HeaderCell::Prev));
        assert_eq!(dts.surface().header.as_deref(), Some("2010-2019"));
        assert_eq!(dts.state().unwrap().year, 2017);
    }

    #[test]
    fn selecting_a_day_writes_date_and_time() {
        let config = PickerConfig {
            show_time: true,
            ..Default::default()
        };
        let (mut dts, _) = bind("05/06/2024 13:30:00", config);
        dts.handle_input(InputEvent::Focus);

        dts.handle_picker(PickerEvent::Day { row: 3, col: 4 });
        assert_eq!(dts.input().text, "20/06/2024 13:30:00");
        assert_eq!(
            dts.state().unwrap().value,
            NaiveDate::from_ymd_opt(2024, 6, 20)
        );

        dts.handle_picker(PickerEvent::Day { row: 0, col: 0 });
        assert_eq!(dts.input().text, "26/05/2024 13:30:00");
        assert_eq!(dts.surface().header.as_deref(), Some("May 2024"));
        assert_eq!(dts.pending_tasks(), 0);
    }

    #[test]
    fn sliders_clamp_and_refocus_on_change() {
        let config = PickerConfig {
            show_time: true,
            ..Default::default()
        };
        let (mut dts, clock) = bind("05/06/2024 13:30:00", config);
        dts.handle_input(InputEvent::Focus);

        dts.handle_picker(PickerEvent::Slider {
            field: TimeField::Hours,
            action: SliderAction::Input,
            value: 30,
        });
        assert_eq!(dts.input().text, "05/06/2024 23:30:00");
        assert_eq!(dts.surface().footer.unwrap().rows[0].text(), "23");
        assert_eq!(dts.pending_tasks(), 0);

        dts.handle_picker(PickerEvent::Slider {
            field: TimeField::Seconds,
            action: SliderAction::Change,
            value: 7,
        });
        assert_eq!(dts.input().text, "05/06/2024 23:30:07");
        assert_eq!(dts.pending_tasks(), 1);
        clock.advance(50);
        assert_eq!(dts.advance(), 1);
        assert_eq!(dts.input().focus_calls, 1);
        assert!(dts.is_visible());
    }

    #[test]
    fn internal_click_survives_the_blur() {
        let (mut dts, clock) = bind("05/06/2024", PickerConfig::default());
        dts.handle_input(InputEvent::Focus);

        dts.handle_picker(PickerEvent::PointerDown);
        clock.advance(10);
        dts.handle_input(InputEvent::Blur);
        clock.advance(100);
        assert_eq!(dts.advance(), 2);

        let state = dts.state().unwrap();
        assert!(state.visible);
        assert_eq!(state.cancel_blur, 0);
        assert!(dts.input().focused);
    }

    #[test]
    fn slider_grab_survives_the_blur() {
        let config = PickerConfig {
            show_time: true,
            ..Default::default()
        };
        let (mut dts, clock) = bind("", config);
        dts.handle_input(InputEvent::Focus);
        dts.handle_picker(PickerEvent::Slider {
            field: TimeField::Minutes,
            action: SliderAction::PointerDown,
            value: 0,
        });
        dts.handle_input(InputEvent::Blur);
        clock.advance(100);
        dts.advance();
        assert!(dts.is_visible());
    }

    #[test]
    fn real_blur_hides_after_the_delay() {
        let (mut dts, clock) = bind("05/06/2024", PickerConfig::default());
        dts.handle_input(InputEvent::Focus);
        dts.input_mut().focused = true;

        dts.handle_input(InputEvent::Blur);
        clock.advance(99);
        assert_eq!(dts.advance(), 0);
        assert!(dts.is_visible());

        clock.advance(1);
        assert_eq!(dts.advance(), 1);
        assert!(!dts.is_visible());
        assert!(!dts.surface().attached);
        assert!(!dts.input().focused);
    }

    #[test]
    fn blur_while_hidden_schedules_nothing() {
        let (mut dts, _) = bind("05/06/2024", PickerConfig::default());
        dts.handle_input(InputEvent::Blur);
        assert_eq!(dts.pending_tasks(), 0);
    }

    #[test]
    fn reopening_reuses_the_picker_and_reseeds() {
        let (mut dts, clock) = bind("05/06/2024", PickerConfig::default());
        dts.handle_input(InputEvent::Focus);
        dts.handle_picker(PickerEvent::Header(HeaderCell::Current));
        dts.handle_input(InputEvent::Blur);
        clock.advance(100);
        dts.advance();

        dts.input_mut().text = "24/12/2025".into();
        dts.handle_input(InputEvent::Focus);
        let state = dts.state().unwrap();
        assert_eq!((state.year, state.month0, state.day), (2025, 11, 24));
        assert_eq!(state.body_type, BodyType::Months);
    }

    #[test]
    fn timers_of_a_destroyed_picker_are_dropped() {
        let (mut dts, clock) = bind("05/06/2024", PickerConfig::default());
        dts.handle_input(InputEvent::Focus);
        dts.handle_picker(PickerEvent::PointerDown);
        dts.handle_input(InputEvent::Blur);
        dts.destroy();
        assert!(dts.state().is_none());
        assert!(!dts.surface().attached);

        dts.handle_input(InputEvent::Focus);
        clock.advance(100);
        assert_eq!(dts.advance(), 0);
        assert_eq!(dts.input().focus_calls, 0);
        assert!(dts.is_visible());
    }

    #[test]
    fn attach_failure_leaves_the_picker_hidden() {
        let (mut dts, _) = bind("05/06/2024", PickerConfig::default());
        let mut surface = RecordingSurface::default();
        surface.fail_attach = Some(SurfaceError::Detached);
        dts.surface = surface;

        dts.handle_input(InputEvent::Focus);
        assert!(!dts.is_visible());
        assert!(dts.surface().header.is_none());
        dts.handle_picker(PickerEvent::Day { row: 1, col: 1 });
        assert_eq!(dts.input().text, "05/06/2024");
    }

    #[test]
    fn listeners_survive_lazy_creation_and_destroy() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (mut dts, _) = bind("05/06/2024", PickerConfig::default());
        let sink = log.clone();
        dts.subscribe(StateKey::Visible, move |state, prev| {
            sink.borrow_mut().push((prev.visible, state.visible, state.year));
        });

        dts.handle_input(InputEvent::Focus);
        dts.destroy();
        dts.handle_input(InputEvent::Focus);
        assert_eq!(
            *log.borrow(),
            [(false, true, 2024), (true, false, 2024), (false, true, 2024)]
        );
    }

    #[test]
    fn resize_follows_the_input() {
        let (mut dts, _) = bind("05/06/2024", PickerConfig::default());
        dts.handle_input(InputEvent::Focus);
        dts.input_mut().bounds = Rect::new(100.0, 40.0, 300.0, 64.0);
        dts.resize();
        assert_eq!(dts.surface().placement.unwrap().left, 105.0);
    }
}
