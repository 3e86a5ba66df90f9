// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use dtsel_picker::headless::{MemoryInput, RecordingSurface};
use dtsel_picker::{
    DayGrid, Dts, HeaderCell, InputEvent, ManualClock, PickerConfig, PickerEvent,
};
use kurbo::Rect;

fn bench_day_grid(c: &mut Criterion) {
    let value = NaiveDate::from_ymd_opt(2024, 6, 5);
    c.bench_function("day_grid/decade", |b| {
        b.iter(|| {
            for year in 2020..2030 {
                for month0 in 0..12 {
                    black_box(DayGrid::new(black_box(year), month0, value));
                }
            }
        });
    });
}

fn bench_navigation(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let config = PickerConfig {
        show_time: true,
        ..Default::default()
    };
    c.bench_function("picker/open_navigate_select", |b| {
        b.iter_batched(
            || {
                let input = MemoryInput::new(
                    "05/06/2024 13:30:00",
                    Rect::new(10.0, 40.0, 210.0, 64.0),
                );
                Dts::from_element(
                    input,
                    RecordingSurface::default(),
                    ManualClock::new(today),
                    config.clone(),
                )
                .unwrap()
            },
            |mut dts| {
                dts.handle_input(InputEvent::Focus);
                for _ in 0..12 {
                    dts.handle_picker(PickerEvent::Header(HeaderCell::Next));
                }
                dts.handle_picker(PickerEvent::Day { row: 2, col: 3 });
                black_box(dts.input().text.len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_day_grid, bench_navigation);
criterion_main!(benches);
