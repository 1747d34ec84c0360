//! Chart Viewer Widget
//! Central panel showing the mounted chart.

use crate::charts::{ChartPlotter, ChartSlot};
use egui::{Color32, RichText};

#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the mounted chart, if any.
    pub fn show(&mut self, ui: &mut egui::Ui, slot: &ChartSlot) {
        let Some(instance) = slot.current() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Chart").size(20.0));
            });
            return;
        };

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, Color32::from_rgb(75, 192, 192)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!("Water Consumption - {}", instance.mode().label()))
                        .size(18.0)
                        .strong(),
                );
                ui.add_space(8.0);
                ChartPlotter::draw(ui, instance);
            });
    }
}
