// Copyright 2025 the Dtsel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picker configuration and its validated form.

use alloc::string::{String, ToString};

use dtsel_format::{DateFormat, FormatError, TimeFormat};

use crate::state::BodyType;

/// Where the overlay prefers to open relative to its input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Direction {
    /// Open above the input when there is room for it.
    #[default]
    Top,
    /// Always open below the input.
    Bottom,
}

/// Options recognized when binding a picker to an input.
///
/// With the `serde` feature this deserializes from the camelCase keys page
/// scripts use (`dateFormat`, `showTime`, `defaultView: "YEARS"`...); missing
/// keys keep their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PickerConfig {
    /// Date template, `dd/mm/yyyy` by default.
    pub date_format: String,
    /// Time template, `HH:MM:SS` by default.
    pub time_format: String,
    /// Show the calendar and write the date part.
    pub show_date: bool,
    /// Show the time sliders and write the time part.
    pub show_time: bool,
    /// Horizontal offset of the overlay from the input, in pixels.
    pub padding_x: f64,
    /// Vertical gap between the overlay and the input, in pixels.
    pub padding_y: f64,
    /// Calendar view shown when the picker first opens.
    pub default_view: BodyType,
    /// Preferred opening direction.
    pub direction: Direction,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            date_format: "dd/mm/yyyy".to_string(),
            time_format: "HH:MM:SS".to_string(),
            show_date: true,
            show_time: false,
            padding_x: 5.0,
            padding_y: 5.0,
            default_view: BodyType::Days,
            direction: Direction::Top,
        }
    }
}

/// A [`PickerConfig`] whose templates have been checked.
///
/// Only the parts that are shown are validated: a picker without time
/// sliders never parses a time.
#[derive(Clone, Debug)]
pub struct Settings {
    config: PickerConfig,
    date: Option<DateFormat>,
    time: Option<TimeFormat>,
}

impl Settings {
    /// Validates the templates `config` will use.
    pub fn new(config: PickerConfig) -> Result<Self, FormatError> {
        let date = if config.show_date {
            Some(DateFormat::new(&config.date_format)?)
        } else {
            None
        };
        let time = if config.show_time {
            Some(TimeFormat::new(&config.time_format)?)
        } else {
            None
        };
        Ok(Self { config, date, time })
    }

    /// The original configuration.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Date template, present when the date part is shown.
    pub fn date(&self) -> Option<&DateFormat> {
        self.date.as_ref()
    }

    /// Time template, present when the time part is shown.
    pub fn time(&self) -> Option<&TimeFormat> {
        self.time.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtsel_format::FormatKind;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = PickerConfig::default();
        assert_eq!(config.date_format, "dd/mm/yyyy");
        assert_eq!(config.time_format, "HH:MM:SS");
        assert!(config.show_date && !config.show_time);
        assert_eq!(config.padding_x, 5.0);
        assert_eq!(config.default_view, BodyType::Days);
        assert_eq!(config.direction, Direction::Top);
    }

    #[test]
    fn only_shown_parts_are_validated() {
        let config = PickerConfig {
            time_format: String::new(),
            ..Default::default()
        };
        let settings = Settings::new(config).unwrap();
        assert!(settings.date().is_some());
        assert!(settings.time().is_none());

        let config = PickerConfig {
            time_format: String::new(),
            show_time: true,
            ..Default::default()
        };
        assert_eq!(
            Settings::new(config).unwrap_err(),
            FormatError::Empty {
                kind: FormatKind::Time
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_page_script_keys() {
        let config: PickerConfig = serde_json::from_str(
            r#"{"dateFormat": "yyyy-mm-dd", "showTime": true, "defaultView": "YEARS", "direction": "BOTTOM", "paddingY": 8}"#,
        )
        .unwrap();
        assert_eq!(config.date_format, "yyyy-mm-dd");
        assert!(config.show_time);
        assert_eq!(config.default_view, BodyType::Years);
        assert_eq!(config.direction, Direction::Bottom);
        assert_eq!(config.padding_y, 8.0);
        assert_eq!(config.time_format, "HH:MM:SS");
    }
}
