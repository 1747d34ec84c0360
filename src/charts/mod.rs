//! Charts module - chart configuration, the mounted instance and rendering

mod config;
mod plotter;
mod renderer;
mod slot;
pub mod smoothing;

pub use config::{
    category_label, ChartConfig, Dataset, DisplayMode, Orientation, Palette, SeriesKind,
    UnknownMode, RED, TEAL,
};
pub use plotter::ChartPlotter;
pub use renderer::{EncodedRaster, StaticChartRenderer};
pub use slot::{ChartInstance, ChartSlot};
