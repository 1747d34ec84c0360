//! Water Consumption Tracker Main Application
//! Main window with the entry form and table on the left and the chart in the
//! center.

use crate::config::AppConfig;
use crate::export::download::open_with_default_app;
use crate::export::{DirectoryTarget, DownloadTarget, ExportError, PendingDownload, SaveDialogTarget};
use crate::gui::{ChartViewer, DataTable, EntryForm, FormAction};
use crate::session::TrackerSession;
use egui::{Color32, RichText, SidePanel};

/// Main application window.
pub struct TrackerApp {
    session: TrackerSession,
    form: EntryForm,
    table: DataTable,
    chart_viewer: ChartViewer,
    target: Box<dyn DownloadTarget>,
    open_after_export: bool,
    status: String,
}

impl TrackerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let target: Box<dyn DownloadTarget> = match &config.export_dir {
            Some(dir) => Box::new(DirectoryTarget::new(dir.clone())),
            None => Box::new(SaveDialogTarget),
        };

        Self {
            session: TrackerSession::new(&config),
            form: EntryForm::new(),
            table: DataTable::new(),
            chart_viewer: ChartViewer::new(),
            target,
            open_after_export: config.open_after_export,
            status: "Ready".to_string(),
        }
    }

    /// Handle form submit - inputs are only cleared when the entry is accepted
    fn handle_submit(&mut self) {
        if self.session.submit(&self.form.date, &self.form.quantity).is_ok() {
            self.form.clear();
            self.status = format!("{} entries", self.session.store().len());
        }
    }

    fn handle_export(&mut self, what: &str, pending: Result<PendingDownload, ExportError>) {
        let result = pending.and_then(|pending| pending.deliver(self.target.as_ref()));
        match result {
            Ok(Some(path)) => {
                self.status = format!("{} exported: {}", what, path.display());
                if self.open_after_export {
                    open_with_default_app(&path);
                }
            }
            Ok(None) => {} // User cancelled
            Err(e) => {
                tracing::error!(error = %e, "{} export failed", what);
                self.status = format!("Export error: {}", e);
            }
        }
    }
}

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - entry form and table
        SidePanel::left("entry_panel")
            .min_width(340.0)
            .max_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.form.show(
                        ui,
                        self.session.selected_mode(),
                        !self.session.store().is_empty(),
                    );

                    match action {
                        FormAction::Submit => self.handle_submit(),
                        FormAction::SwitchMode(mode) => self.session.switch_mode(mode),
                        FormAction::ExportChart => {
                            let pending = self.session.export_chart();
                            self.handle_export("Chart", pending);
                        }
                        FormAction::ExportTable => {
                            let pending = self.session.export_table();
                            self.handle_export("Table", pending);
                        }
                        FormAction::None => {}
                    }

                    ui.add_space(15.0);
                    ui.separator();
                    ui.add_space(10.0);

                    if let Some(id) = self.table.show(ui, self.session.rows()) {
                        self.session.delete(id);
                        self.status = format!("{} entries", self.session.store().len());
                    }

                    ui.add_space(10.0);
                    ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, self.session.chart());
        });
    }
}
