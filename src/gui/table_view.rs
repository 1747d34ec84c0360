//! Data Table Widget
//! Grid of the recorded observations with a delete button per row.

use crate::data::table::{CONSUMPTION_HEADER, DATE_HEADER};
use crate::data::{ObservationId, TableRow};
use egui::{Color32, RichText, ScrollArea};

const TABLE_HEIGHT: f32 = 320.0;

#[derive(Default)]
pub struct DataTable;

impl DataTable {
    pub fn new() -> Self {
        Self
    }

    /// Draw every row. Returns the id whose Delete button was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, rows: &[TableRow]) -> Option<ObservationId> {
        let mut clicked = None;

        ui.label(RichText::new("📊 Recorded Data").size(14.0).strong());
        ui.add_space(5.0);

        if rows.is_empty() {
            ui.label(RichText::new("No Data").size(12.0).color(Color32::GRAY));
            return None;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .max_height(TABLE_HEIGHT)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        egui::Grid::new("observation_table")
                            .striped(true)
                            .min_col_width(60.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                ui.label(RichText::new(DATE_HEADER).strong().size(12.0));
                                ui.label(RichText::new(CONSUMPTION_HEADER).strong().size(12.0));
                                ui.label(RichText::new("Action").strong().size(12.0));
                                ui.end_row();

                                for row in rows {
                                    ui.label(RichText::new(&row.date).size(12.0));
                                    ui.label(RichText::new(&row.consumption).size(12.0));
                                    if ui.small_button("Delete").clicked() {
                                        clicked = Some(row.id);
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });

        clicked
    }
}
