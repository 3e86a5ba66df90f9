// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted picker session drawn in the terminal.
//!
//! Binds a picker to an in-memory input, then focuses it, zooms out to the
//! decade, picks a year, a month and a day, drags the hour slider, and lets
//! a blur hide it. Each step prints the overlay as text.
//!
//! Run:
//! - `RUST_LOG=dtsel_picker=debug cargo run -p dtsel_demos --example picker_session`

use chrono::NaiveDate;
use dtsel_picker::headless::{MemoryDocument, MemoryInput, RecordingSurface};
use dtsel_picker::{
    BLUR_DELAY_MS, Body, CellFlags, DayGrid, Dts, HeaderCell, InputEvent, ManualClock,
    MonthGrid, PickerConfig, PickerEvent, SliderAction, Target, TimeField,
};
use kurbo::Rect;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("warn,dtsel_picker=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("warn"),
        },
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn mark(flags: CellFlags) -> (char, char) {
    if flags.contains(CellFlags::VALUE) {
        ('[', ']')
    } else if flags.intersects(CellFlags::PREV | CellFlags::NEXT) {
        ('(', ')')
    } else {
        (' ', ' ')
    }
}

fn draw(surface: &RecordingSurface, input: &MemoryInput) {
    println!("input: {:?}", input.text);
    if !surface.attached {
        println!("(hidden)\n");
        return;
    }
    if let Some(header) = &surface.header {
        println!("  <  {header:^18}  >");
    }
    match &surface.body {
        Some(Body::Days(grid)) => {
            for name in DayGrid::weekday_labels() {
                print!(" {name} ");
            }
            println!();
            for row in grid.rows() {
                for cell in row {
                    let (l, r) = mark(cell.flags);
                    print!("{l}{:>2}{r}", cell.label());
                }
                println!();
            }
        }
        Some(Body::Months(grid)) => {
            for row in grid.rows() {
                for cell in row {
                    let (l, r) = mark(cell.flags);
                    print!(" {l}{}{r}", MonthGrid::label(cell));
                }
                println!();
            }
        }
        Some(Body::Years(grid)) => {
            for row in grid.rows() {
                for cell in row {
                    let (l, r) = mark(cell.flags);
                    print!(" {l}{}{r}", cell.value);
                }
                println!();
            }
        }
        None => {}
    }
    if let Some(footer) = &surface.footer {
        for row in footer.rows {
            println!("  {} {}", row.field.label(), row.text());
        }
    }
    println!();
}

fn main() {
    init_tracing();

    let mut doc = MemoryDocument::new();
    doc.insert(
        "#appointment",
        MemoryInput::new("19/10/2026 09:15:00", Rect::new(20.0, 420.0, 260.0, 444.0)),
    );
    let clock = ManualClock::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    let config = PickerConfig {
        show_time: true,
        ..Default::default()
    };
    let mut dts = Dts::new(
        Target::Selector("#appointment"),
        &doc,
        RecordingSurface::default(),
        clock.clone(),
        config,
    )
    .unwrap();

    dts.handle_input(InputEvent::Focus);
    println!("placement: {:?}", dts.surface().placement);
    draw(dts.surface(), dts.input());

    dts.handle_picker(PickerEvent::Header(HeaderCell::Current));
    dts.handle_picker(PickerEvent::Header(HeaderCell::Current));
    draw(dts.surface(), dts.input());

    dts.handle_picker(PickerEvent::Year { row: 2, col: 3 });
    draw(dts.surface(), dts.input());

    dts.handle_picker(PickerEvent::Month { row: 0, col: 1 });
    draw(dts.surface(), dts.input());

    dts.handle_picker(PickerEvent::Day { row: 2, col: 4 });
    draw(dts.surface(), dts.input());

    // Grabbing a slider steals focus from the input; the pending blur is
    // cancelled by the grab.
    dts.handle_picker(PickerEvent::Slider {
        field: TimeField::Hours,
        action: SliderAction::PointerDown,
        value: 9,
    });
    dts.handle_input(InputEvent::Blur);
    dts.handle_picker(PickerEvent::Slider {
        field: TimeField::Hours,
        action: SliderAction::Change,
        value: 16,
    });
    clock.advance(BLUR_DELAY_MS);
    dts.advance();
    draw(dts.surface(), dts.input());

    dts.handle_input(InputEvent::Blur);
    clock.advance(BLUR_DELAY_MS);
    dts.advance();
    draw(dts.surface(), dts.input());
}
