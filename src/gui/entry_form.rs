//! Entry Form Widget
//! Left side panel with the observation inputs, chart mode buttons and export
//! buttons.

use crate::charts::DisplayMode;
use egui::{Color32, RichText};

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    SwitchMode(DisplayMode),
    ExportChart,
    ExportTable,
}

/// Date and quantity inputs. Kept as raw text until submit.
#[derive(Default)]
pub struct EntryForm {
    pub date: String,
    pub quantity: String,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both inputs after a successful submit.
    pub fn clear(&mut self) {
        self.date.clear();
        self.quantity.clear();
    }

    /// Draw the form
    pub fn show(&mut self, ui: &mut egui::Ui, selected: DisplayMode, has_data: bool) -> FormAction {
        let mut action = FormAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💧 Water Consumption Tracker")
                    .size(20.0)
                    .color(Color32::from_rgb(75, 192, 192)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Entry Section =====
        ui.label(RichText::new("📝 New Entry").size(14.0).strong());
        ui.add_space(5.0);

        let label_width = 110.0;
        let field_width = 150.0;
        let mut enter_pressed = false;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.add_sized([label_width, 20.0], egui::Label::new("Date:"));
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.date)
                            .hint_text("YYYY-MM-DD")
                            .desired_width(field_width),
                    );
                    enter_pressed |= response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                });

                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    ui.add_sized([label_width, 20.0], egui::Label::new("Liters:"));
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.quantity)
                            .hint_text("0.0")
                            .desired_width(field_width),
                    );
                    enter_pressed |= response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                });

                ui.add_space(8.0);

                ui.vertical_centered(|ui| {
                    let button = egui::Button::new(RichText::new("➕ Add Entry").size(14.0))
                        .min_size(egui::vec2(160.0, 28.0));
                    if ui.add(button).clicked() || enter_pressed {
                        action = FormAction::Submit;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Mode Section =====
        ui.label(RichText::new("📈 Chart Type").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal_wrapped(|ui| {
            for mode in DisplayMode::ALL {
                if ui.selectable_label(selected == mode, mode.label()).clicked() {
                    action = FormAction::SwitchMode(mode);
                }
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui.button("📄 Chart to PDF").clicked() {
                action = FormAction::ExportChart;
            }
            if ui.button("📋 Table to CSV").clicked() {
                action = FormAction::ExportTable;
            }
        });
        if !has_data {
            ui.label(
                RichText::new("No entries yet - exports will be empty")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        action
    }
}
