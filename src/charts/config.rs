//! Chart Configuration Module
//! Turns a display mode and the current observations into a renderer-neutral
//! description of the chart. Both the on-screen plot and the export raster
//! draw from this.

use crate::data::Observation;
use egui::Color32;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Base colours of the series. Fill uses `FILL_ALPHA`, borders are opaque.
pub const TEAL: Color32 = Color32::from_rgb(75, 192, 192);
pub const RED: Color32 = Color32::from_rgb(192, 75, 75);

pub const FILL_ALPHA: f32 = 0.2;
pub const SERIES_LABEL: &str = "Water Consumption (liters)";
pub const CATEGORY_TITLE: &str = "Date";
pub const VALUE_TITLE: &str = "Consumption (liters)";
pub const LINE_TENSION: f64 = 0.1;
/// Largest magnitude drawn on the value axis. Spans and pads computed from
/// values within this bound stay finite.
pub const VALUE_LIMIT: f64 = f64::MAX / 4.0;

/// Chart encoding selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Line,
    Bar,
    Column,
    Comparison,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Line,
        DisplayMode::Bar,
        DisplayMode::Column,
        DisplayMode::Comparison,
    ];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Line => "Line Chart",
            DisplayMode::Bar => "Bar Chart",
            DisplayMode::Column => "Column Chart",
            DisplayMode::Comparison => "Comparison Chart",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Line => "line",
            DisplayMode::Bar => "bar",
            DisplayMode::Column => "column",
            DisplayMode::Comparison => "comparison",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown display mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for DisplayMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Bar,
}

/// Which screen axis carries the categories (dates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Dates along x, values along y.
    Vertical,
    /// Dates along y, values along x.
    Horizontal,
}

/// Colour list resolved per data point, wrapping around.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(Vec<Color32>);

impl Palette {
    pub fn single(color: Color32) -> Self {
        Self(vec![color])
    }

    pub fn alternating(colors: &[Color32]) -> Self {
        Self(colors.to_vec())
    }

    pub fn color_for(&self, index: usize) -> Color32 {
        self.0
            .get(index % self.0.len().max(1))
            .copied()
            .unwrap_or(TEAL)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The single data series of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub palette: Palette,
    pub fill_alpha: f32,
    pub border_width: f32,
    pub fill: bool,
    pub tension: f64,
}

impl Dataset {
    pub fn fill_color(&self, index: usize) -> Color32 {
        self.palette.color_for(index).gamma_multiply(self.fill_alpha)
    }

    pub fn border_color(&self, index: usize) -> Color32 {
        self.palette.color_for(index)
    }
}

/// Complete description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub mode: DisplayMode,
    pub kind: SeriesKind,
    pub orientation: Orientation,
    pub labels: Vec<String>,
    pub dataset: Dataset,
    pub category_title: String,
    pub value_title: String,
    pub begin_at_zero: bool,
}

impl ChartConfig {
    pub fn build(mode: DisplayMode, records: &[Observation]) -> Self {
        let (kind, orientation) = match mode {
            DisplayMode::Line => (SeriesKind::Line, Orientation::Vertical),
            DisplayMode::Bar | DisplayMode::Comparison => (SeriesKind::Bar, Orientation::Vertical),
            DisplayMode::Column => (SeriesKind::Bar, Orientation::Horizontal),
        };

        let palette = match mode {
            DisplayMode::Comparison => Palette::alternating(&[TEAL, RED]),
            _ => Palette::single(TEAL),
        };

        Self {
            mode,
            kind,
            orientation,
            labels: records.iter().map(|entry| entry.date.clone()).collect(),
            dataset: Dataset {
                label: SERIES_LABEL.to_string(),
                values: records.iter().map(|entry| entry.consumption).collect(),
                palette,
                fill_alpha: FILL_ALPHA,
                border_width: 1.0,
                fill: mode == DisplayMode::Line,
                tension: LINE_TENSION,
            },
            category_title: CATEGORY_TITLE.to_string(),
            value_title: VALUE_TITLE.to_string(),
            begin_at_zero: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.values.is_empty()
    }

    /// (category index, value) pairs in store order, clamped to the drawable range.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, plotted_value(v)])
            .collect()
    }

    /// Axis titles as (x, y). The x axis is titled with the categories and the
    /// y axis with the values in every mode, including the horizontal one.
    pub fn axis_titles(&self) -> (&str, &str) {
        (self.category_title.as_str(), self.value_title.as_str())
    }

    /// Value-axis bounds. Starts at zero when `begin_at_zero` is set and pads
    /// the far end by 10%. Both bounds and their span are finite.
    pub fn value_range(&self) -> (f64, f64) {
        let values = &self.dataset.values;
        if values.is_empty() {
            return (0.0, 1.0);
        }
        let mut min = values.iter().copied().map(plotted_value).fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().map(plotted_value).fold(f64::NEG_INFINITY, f64::max);
        if self.begin_at_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if max - min <= f64::EPSILON * max.abs().max(1.0) {
            max = min + min.abs().max(1.0);
        }
        let pad = (max - min) * 0.1;
        let lower = if self.begin_at_zero && min >= 0.0 { min } else { min - pad };
        (lower, max + pad)
    }
}

/// `value` limited to `[-VALUE_LIMIT, VALUE_LIMIT]` for drawing.
pub fn plotted_value(value: f64) -> f64 {
    value.clamp(-VALUE_LIMIT, VALUE_LIMIT)
}

/// Label of the category at `position`, empty unless it lands on a whole index.
pub fn category_label(labels: &[String], position: f64) -> String {
    let idx = position.round();
    if (position - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
