// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading and writing dates and times through templates.
//!
//! Shows variable-width fields, two-digit years, am/pm markers, and what
//! happens with text that does not fit the template.
//!
//! Run:
//! - `cargo run -p dtsel_demos --example format_roundtrip`

use chrono::NaiveDate;
use dtsel_format::scan::FieldValue;
use dtsel_format::{DateFormat, DateToken, Moment, TimeFormat};

fn main() {
    let date = DateFormat::new("dd/mm/yyyy").unwrap();
    for text in ["5/6/2024", "05/06/2024", "31/02/2024", "tomorrow"] {
        println!("{text:>12} -> {:?}", date.parse_with_year(text, 2026));
    }

    // `yy` is only read when `yyyy` found nothing.
    let both = DateFormat::new("yyyy-yy").unwrap();
    let fields = both.fields("2024-24", 2026);
    println!("yyyy = {:?}", fields.value(DateToken::Yyyy));
    println!("yy   = {:?}", fields.value(DateToken::Yy));
    assert_eq!(fields.value(DateToken::Yy), &FieldValue::Missing);

    let short = DateFormat::new("mm.dd.yy").unwrap();
    println!("12.24.95 -> {:?}", short.parse_with_year("12.24.95", 2026));

    let twelve = TimeFormat::new("hh:mm:ss a").unwrap();
    for text in ["12:30:00 am", "01:30:00 pm", "12:00:00 PM", "13:00:00 pm"] {
        println!("{text:>12} -> {:?} ms", twelve.parse(text));
    }

    let moment = Moment::from_parts(2026, 9, 19, 18, 5, 0).unwrap();
    for (d, t) in [("dd/mm/yyyy", "HH:MM:SS"), ("yyyy-mm-dd", "hh:mm A")] {
        let d = DateFormat::new(d).unwrap();
        let t = TimeFormat::new(t).unwrap();
        let text = format!("{} {}", d.render(moment.date()), t.render(moment.time_of_day()));
        println!("{moment:?} -> {text}");
    }

    let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    println!("leap day: {}", DateFormat::new("Day dd of mm, yy").unwrap().render(leap));
}
