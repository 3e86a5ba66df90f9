// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picker options read from the JSON a page script would pass.
//!
//! Run:
//! - `cargo run -p dtsel_demos --example config_json`

use dtsel_picker::{Error, PickerConfig, Settings};

const PAGE_OPTIONS: &str = r#"{
    "dateFormat": "yyyy-mm-dd",
    "timeFormat": "hh:mm a",
    "showTime": true,
    "defaultView": "MONTHS",
    "direction": "BOTTOM"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: PickerConfig = serde_json::from_str(PAGE_OPTIONS)?;
    println!("{config:#?}");

    let settings = Settings::new(config)?;
    if let (Some(date), Some(time)) = (settings.date(), settings.time()) {
        println!("date template: {}", date.as_str());
        println!("time template: {} (meridiem: {})", time.as_str(), time.has_meridiem());
    }

    let broken: PickerConfig = serde_json::from_str(r#"{"dateFormat": ""}"#)?;
    match Settings::new(broken).map_err(Error::from) {
        Ok(_) => println!("unexpectedly valid"),
        Err(err) => println!("rejected: {err}"),
    }
    Ok(())
}
