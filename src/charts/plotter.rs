//! Chart Plotter Module
//! Draws the mounted chart interactively using egui_plot.

use super::config::{category_label, plotted_value, ChartConfig, Orientation, SeriesKind};
use super::slot::ChartInstance;
use super::smoothing;
use egui::{RichText, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

/// Plot height in the central panel.
const PLOT_HEIGHT: f32 = 420.0;
/// Samples per segment when smoothing the line.
const SMOOTH_STEPS: usize = 12;
const BAR_WIDTH: f64 = 0.6;

/// Draws chart instances with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw `instance` into `ui`.
    pub fn draw(ui: &mut egui::Ui, instance: &ChartInstance) {
        let config = &instance.config;

        if config.is_empty() {
            ui.label(
                RichText::new("No observations yet - add one to see the chart")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        }

        // A fresh id per render so no zoom/drag state survives a re-render.
        let plot = Plot::new(("consumption_chart", instance.generation()))
            .height(PLOT_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false);

        let (x_title, y_title) = config.axis_titles();
        let plot = plot.x_axis_label(x_title).y_axis_label(y_title);

        match config.orientation {
            Orientation::Vertical => {
                let labels = config.labels.clone();
                let count = config.labels.len();
                plot.include_y(0.0)
                    .x_grid_spacer(move |_input| Self::category_marks(count))
                    .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
                    .show(ui, |plot_ui| match config.kind {
                        SeriesKind::Line => {
                            let (line, points) = Self::line_series(config);
                            plot_ui.line(line);
                            plot_ui.points(points);
                        }
                        SeriesKind::Bar => plot_ui.bar_chart(Self::bar_series(config)),
                    });
            }
            Orientation::Horizontal => {
                let labels = config.labels.clone();
                let count = config.labels.len();
                plot.include_x(0.0)
                    .y_grid_spacer(move |_input| Self::category_marks(count))
                    .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(Self::bar_series(config).horizontal())
                    });
            }
        }
    }

    /// One grid mark per category so every date gets a tick.
    fn category_marks(count: usize) -> Vec<GridMark> {
        (0..count)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }

    fn line_series(config: &ChartConfig) -> (Line, Points) {
        let dataset = &config.dataset;
        let raw = config.points();
        let curve = smoothing::smooth(&raw, dataset.tension, SMOOTH_STEPS);

        let mut line = Line::new(PlotPoints::from(curve))
            .color(dataset.border_color(0))
            .width(dataset.border_width + 1.0)
            .name(&dataset.label);
        if dataset.fill {
            line = line.fill(0.0_f32);
        }

        let points = Points::new(PlotPoints::from(raw))
            .radius(3.0)
            .color(dataset.border_color(0));

        (line, points)
    }

    fn bar_series(config: &ChartConfig) -> BarChart {
        let dataset = &config.dataset;
        let bars: Vec<Bar> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                Bar::new(i as f64, plotted_value(value))
                    .width(BAR_WIDTH)
                    .fill(dataset.fill_color(i))
                    .stroke(Stroke::new(dataset.border_width, dataset.border_color(i)))
                    .name(config.labels.get(i).map(String::as_str).unwrap_or_default())
            })
            .collect();

        BarChart::new(bars).name(&dataset.label)
    }
}
