//! Export module - CSV table export, PDF chart export and file delivery

pub mod document;
pub mod download;
pub mod table;

use thiserror::Error;

pub use document::{chart_pdf, PdfLayout};
pub use download::{DirectoryTarget, DownloadTarget, PendingDownload, SaveDialogTarget};
pub use table::{to_csv, CsvStyle};

pub const CSV_MIME: &str = "text/csv";
pub const PDF_MIME: &str = "application/pdf";
pub const DEFAULT_TABLE_FILE: &str = "water_consumption_data.csv";
pub const DEFAULT_CHART_FILE: &str = "water_consumption_chart.pdf";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("chart rendering failed: {0}")]
    Render(String),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("export text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
