//! Application configuration
//! Optional JSON file next to the working directory; every field has a default.

use crate::charts::DisplayMode;
use crate::export::{CsvStyle, PdfLayout, DEFAULT_CHART_FILE, DEFAULT_TABLE_FILE};
use crate::session::ModePolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    /// Mode shown at start-up, and after add/delete under `ModePolicy::ResetToDefault`.
    pub default_mode: DisplayMode,
    pub mode_policy: ModePolicy,
    pub csv_style: CsvStyle,
    /// Pixel size of the chart raster embedded in the PDF.
    pub chart_width: u32,
    pub chart_height: u32,
    /// Write exports here instead of asking with a save dialog.
    pub export_dir: Option<PathBuf>,
    pub open_after_export: bool,
    pub chart_file_name: String,
    pub table_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let layout = PdfLayout::default();
        Self {
            window_size: [1200.0, 760.0],
            default_mode: DisplayMode::Line,
            mode_policy: ModePolicy::KeepLast,
            csv_style: CsvStyle::Raw,
            chart_width: layout.raster_width,
            chart_height: layout.raster_height,
            export_dir: None,
            open_after_export: false,
            chart_file_name: DEFAULT_CHART_FILE.to_string(),
            table_file_name: DEFAULT_TABLE_FILE.to_string(),
        }
    }
}

impl AppConfig {
    pub const DEFAULT_FILE: &'static str = "water_tracker.json";

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `path` if it exists. A missing file gives the defaults silently;
    /// an unreadable or malformed one is logged and also gives the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config");
                Self::default()
            }
        }
    }

    pub fn pdf_layout(&self) -> PdfLayout {
        PdfLayout {
            raster_width: self.chart_width,
            raster_height: self.chart_height,
            ..PdfLayout::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "default_mode": "bar", "mode_policy": "reset_to_default", "csv_style": "quoted" }}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.default_mode, DisplayMode::Bar);
        assert_eq!(config.mode_policy, ModePolicy::ResetToDefault);
        assert_eq!(config.csv_style, CsvStyle::Quoted);
        assert_eq!(config.table_file_name, "water_consumption_data.csv");
        assert_eq!(config.chart_width, 1200);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(AppConfig::load(file.path()), Err(ConfigError::Parse(_))));
        assert_eq!(AppConfig::load_or_default(file.path()), AppConfig::default());
    }

    #[test]
    fn layout_uses_configured_raster_size() {
        let config = AppConfig {
            chart_width: 640,
            chart_height: 480,
            ..AppConfig::default()
        };
        let layout = config.pdf_layout();
        assert_eq!((layout.raster_width, layout.raster_height), (640, 480));
        assert_eq!(layout.image_width_mm, 180.0);
    }
}
