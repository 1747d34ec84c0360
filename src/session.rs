//! Tracker Session
//! Owns the record store and the mounted chart, and applies every user action:
//! mutate or read the store, then refresh the table rows and the chart.

use crate::charts::{ChartConfig, ChartSlot, DisplayMode};
use crate::config::AppConfig;
use crate::data::{table, InputError, NewObservation, Observation, ObservationId, RecordStore, TableRow};
use crate::export::{self, CsvStyle, ExportError, PdfLayout, PendingDownload};
use serde::Deserialize;

/// Which mode the chart uses when it is re-rendered after an add or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePolicy {
    /// Keep the mode the user last picked.
    #[default]
    KeepLast,
    /// Go back to the configured default mode.
    ResetToDefault,
}

pub struct TrackerSession {
    store: RecordStore,
    chart: ChartSlot,
    rows: Vec<TableRow>,
    selected_mode: DisplayMode,
    default_mode: DisplayMode,
    policy: ModePolicy,
    csv_style: CsvStyle,
    layout: PdfLayout,
    chart_file_name: String,
    table_file_name: String,
}

impl TrackerSession {
    pub fn new(config: &AppConfig) -> Self {
        let mut session = Self {
            store: RecordStore::new(),
            chart: ChartSlot::new(),
            rows: Vec::new(),
            selected_mode: config.default_mode,
            default_mode: config.default_mode,
            policy: config.mode_policy,
            csv_style: config.csv_style,
            layout: config.pdf_layout(),
            chart_file_name: config.chart_file_name.clone(),
            table_file_name: config.table_file_name.clone(),
        };
        session.refresh();
        session
    }

    /// Validate form input and append it. On error nothing changes.
    pub fn submit(&mut self, date: &str, quantity: &str) -> Result<ObservationId, InputError> {
        let entry = match NewObservation::parse(date, quantity) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "entry rejected");
                return Err(e);
            }
        };

        let id = self.store.append(entry);
        tracing::info!(id = %id, count = self.store.len(), "observation added");
        self.rerender();
        Ok(id)
    }

    /// Delete the entry with `id` at its current position.
    pub fn delete(&mut self, id: ObservationId) -> bool {
        match self.store.remove(id) {
            Some(removed) => {
                tracing::info!(id = %removed.id, date = %removed.date, "observation deleted");
                self.rerender();
                true
            }
            None => {
                tracing::debug!(id = %id, "delete ignored, entry already gone");
                false
            }
        }
    }

    /// Delete by position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn delete_at(&mut self, index: usize) -> Observation {
        let removed = self.store.remove_at(index);
        tracing::info!(id = %removed.id, index, "observation deleted");
        self.rerender();
        removed
    }

    /// Show the chart in `mode`. The store is not touched.
    pub fn switch_mode(&mut self, mode: DisplayMode) {
        self.selected_mode = mode;
        self.chart.render(mode, self.store.all());
    }

    /// Mode used by re-renders triggered by data changes.
    pub fn mode_for_rerender(&self) -> DisplayMode {
        match self.policy {
            ModePolicy::KeepLast => self.selected_mode,
            ModePolicy::ResetToDefault => self.default_mode,
        }
    }

    /// Refresh table and chart after the store changed.
    pub fn rerender(&mut self) {
        self.selected_mode = self.mode_for_rerender();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.rows = table::project(self.store.all());
        self.chart.render(self.selected_mode, self.store.all());
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn chart(&self) -> &ChartSlot {
        &self.chart
    }

    pub fn selected_mode(&self) -> DisplayMode {
        self.selected_mode
    }

    /// Current table as CSV.
    pub fn export_table(&self) -> Result<PendingDownload, ExportError> {
        let text = export::to_csv(self.store.all(), self.csv_style)?;
        Ok(PendingDownload::new(
            self.table_file_name.clone(),
            export::CSV_MIME,
            text.into_bytes(),
        ))
    }

    /// Mounted chart as a one-page PDF. With nothing mounted the page holds
    /// an empty chart.
    pub fn export_chart(&self) -> Result<PendingDownload, ExportError> {
        let blank;
        let config = match self.chart.current() {
            Some(instance) => &instance.config,
            None => {
                blank = ChartConfig::build(self.selected_mode, &[]);
                &blank
            }
        };
        let bytes = export::chart_pdf(config, &self.layout)?;
        Ok(PendingDownload::new(
            self.chart_file_name.clone(),
            export::PDF_MIME,
            bytes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TrackerSession {
        TrackerSession::new(&AppConfig::default())
    }

    #[test]
    fn starts_with_a_default_chart_mounted() {
        let session = session();
        assert_eq!(session.chart().mounted_count(), 1);
        assert_eq!(session.selected_mode(), DisplayMode::Line);
        assert!(session.rows().is_empty());
    }

    #[test]
    fn submit_updates_table_and_chart() {
        let mut session = session();
        session.submit("2024-01-01", "12.5").unwrap();
        session.submit("2024-01-02", "7").unwrap();

        assert_eq!(session.rows().len(), 2);
        assert_eq!(session.rows()[1].consumption, "7");
        let chart = session.chart().current().unwrap();
        assert_eq!(chart.config.dataset.values, vec![12.5, 7.0]);
        assert_eq!(session.chart().mounted_count(), 1);
    }

    #[test]
    fn invalid_submit_changes_nothing() {
        let mut session = session();
        session.submit("a", "1").unwrap();
        let generation = session.chart().current().unwrap().generation();

        assert_eq!(session.submit("", "5"), Err(InputError::EmptyDate));
        assert!(session.submit("b", "five").is_err());
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.chart().current().unwrap().generation(), generation);
    }

    #[test]
    fn switching_mode_leaves_store_alone() {
        let mut session = session();
        session.submit("a", "1").unwrap();
        session.submit("b", "2").unwrap();
        let before = session.store().all().to_vec();

        for mode in DisplayMode::ALL {
            session.switch_mode(mode);
            assert_eq!(session.store().all(), before.as_slice());
            assert_eq!(session.chart().current().unwrap().mode(), mode);
            assert_eq!(session.chart().mounted_count(), 1);
        }
    }

    #[test]
    fn keep_last_policy_preserves_mode_after_add() {
        let mut session = session();
        session.switch_mode(DisplayMode::Bar);
        session.submit("a", "1").unwrap();
        assert_eq!(session.chart().current().unwrap().mode(), DisplayMode::Bar);
    }

    #[test]
    fn reset_policy_returns_to_default_after_delete() {
        let config = AppConfig {
            mode_policy: ModePolicy::ResetToDefault,
            ..AppConfig::default()
        };
        let mut session = TrackerSession::new(&config);
        let id = session.submit("a", "1").unwrap();
        session.switch_mode(DisplayMode::Comparison);
        assert!(session.delete(id));
        assert_eq!(session.chart().current().unwrap().mode(), DisplayMode::Line);
        assert_eq!(session.selected_mode(), DisplayMode::Line);
    }

    #[test]
    fn delete_uses_live_position() {
        let mut session = session();
        let first = session.submit("a", "1").unwrap();
        let second = session.submit("b", "2").unwrap();
        session.submit("c", "3").unwrap();

        assert!(session.delete(first));
        assert!(session.delete(second));
        assert!(!session.delete(second));
        assert_eq!(session.store().dates(), vec!["c"]);
        assert_eq!(session.rows().len(), 1);
    }

    #[test]
    fn table_export_uses_configured_name() {
        let mut session = session();
        session.submit("2024-01-01", "12.5").unwrap();
        let pending = session.export_table().unwrap();
        assert_eq!(pending.file_name(), "water_consumption_data.csv");
        assert_eq!(pending.mime(), "text/csv");
        assert_eq!(
            pending.bytes(),
            b"Date,Water Consumption (liters)\n2024-01-01,12.5"
        );
    }

    #[test]
    fn chart_export_with_no_data_is_not_empty() {
        let config = AppConfig {
            chart_width: 200,
            chart_height: 100,
            ..AppConfig::default()
        };
        let session = TrackerSession::new(&config);
        let pending = session.export_chart().unwrap();
        assert_eq!(pending.file_name(), "water_consumption_chart.pdf");
        assert!(!pending.is_empty());
    }
}
