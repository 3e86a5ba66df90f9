// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{NaiveDate, NaiveTime};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use dtsel_format::{DateFormat, TimeFormat};

const DATE_FORMATS: [&str; 4] = ["dd/mm/yyyy", "yyyy-mm-dd", "mm.dd.yy", "Day dd of mm, yyyy"];

fn gen_dates(n: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    start.iter_days().step_by(37).take(n).collect()
}

fn bench_dates(c: &mut Criterion) {
    let dates = gen_dates(256);
    let mut group = c.benchmark_group("date");
    group.throughput(Throughput::Elements(dates.len() as u64));
    for source in DATE_FORMATS {
        let format = DateFormat::new(source).unwrap();
        let rendered: Vec<String> = dates.iter().map(|d| format.render(*d)).collect();

        group.bench_function(format!("render/{source}"), |b| {
            b.iter(|| {
                for d in &dates {
                    black_box(format.render(black_box(*d)));
                }
            });
        });
        group.bench_function(format!("parse/{source}"), |b| {
            b.iter(|| {
                for text in &rendered {
                    black_box(format.parse_with_year(black_box(text), 2026));
                }
            });
        });
    }
    group.finish();
}

fn bench_times(c: &mut Criterion) {
    let times: Vec<NaiveTime> = (0..24 * 60)
        .step_by(7)
        .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, m % 59))
        .collect();
    let mut group = c.benchmark_group("time");
    group.throughput(Throughput::Elements(times.len() as u64));
    for source in ["HH:MM:SS", "hh:mm a"] {
        let format = TimeFormat::new(source).unwrap();
        let rendered: Vec<String> = times.iter().map(|t| format.render(*t)).collect();
        group.bench_function(format!("roundtrip/{source}"), |b| {
            b.iter(|| {
                for text in &rendered {
                    black_box(format.parse(black_box(text)));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dates, bench_times);
criterion_main!(benches);
