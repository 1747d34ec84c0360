//! File Delivery Module
//! Hands export bytes to the user: through a save dialog, or straight into a
//! configured directory.

use super::ExportError;
use std::fs;
use std::path::{Path, PathBuf};

/// Export bytes waiting to be delivered. Consumed by [`PendingDownload::deliver`],
/// so the buffer is released as soon as delivery finishes.
#[derive(Debug)]
pub struct PendingDownload {
    file_name: String,
    mime: &'static str,
    bytes: Vec<u8>,
}

impl PendingDownload {
    pub fn new(file_name: impl Into<String>, mime: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime,
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write through `target`. Returns the saved path, or `None` if the user
    /// cancelled.
    pub fn deliver(self, target: &dyn DownloadTarget) -> Result<Option<PathBuf>, ExportError> {
        let saved = target.save(&self.file_name, self.mime, &self.bytes)?;
        match &saved {
            Some(path) => tracing::info!(
                path = %path.display(),
                bytes = self.bytes.len(),
                mime = self.mime,
                "export saved"
            ),
            None => tracing::info!(file = %self.file_name, "export cancelled"),
        }
        Ok(saved)
    }
}

/// Somewhere export bytes can be written.
pub trait DownloadTarget {
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError>;
}

/// Asks the user for a location with a native save dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaveDialogTarget;

impl SaveDialogTarget {
    fn filter_for(file_name: &str, mime: &str) -> (&'static str, String) {
        let extension = Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = match mime {
            super::CSV_MIME => "CSV Files",
            super::PDF_MIME => "PDF Document",
            _ => "All Files",
        };
        (name, extension)
    }
}

impl DownloadTarget for SaveDialogTarget {
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError> {
        let (filter_name, extension) = Self::filter_for(file_name, mime);
        let mut dialog = rfd::FileDialog::new().set_file_name(file_name);
        if !extension.is_empty() {
            dialog = dialog.add_filter(filter_name, &[extension.as_str()]);
        }

        let Some(path) = dialog.save_file() else {
            return Ok(None); // User cancelled
        };
        fs::write(&path, bytes)?;
        Ok(Some(path))
    }
}

/// Writes exports into a fixed directory under their default file name.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadTarget for DirectoryTarget {
    fn save(&self, file_name: &str, _mime: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        Ok(Some(path))
    }
}

/// Open a delivered file with the system default application.
pub fn open_with_default_app(path: &Path) {
    if let Err(e) = open::that(path) {
        tracing::warn!(path = %path.display(), error = %e, "could not open export");
    }
}
