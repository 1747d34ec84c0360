//! Static Chart Renderer
//! Rasterises a chart configuration with plotters for export.
//!
//! Layout:
//! 1. Caption: series label centered at the top
//! 2. Plot area with the category axis ("Date") and value axis
//!    ("Consumption (liters)"), value axis starting at zero
//! 3. Legend in the upper right corner
//!
//! When no font is available the chart is drawn without any text (series and
//! axis lines only) instead of failing.

use super::config::{category_label, plotted_value, ChartConfig, Orientation, SeriesKind, FILL_ALPHA};
use super::smoothing;
use crate::export::ExportError;
use egui::Color32;
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const SMOOTH_STEPS: usize = 16;
const BAR_WIDTH: f64 = 0.6;
const POINT_RADIUS: i32 = 3;

fn render_err(err: impl std::fmt::Display) -> ExportError {
    ExportError::Render(err.to_string())
}

fn rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `config` to an RGB raster of `width` x `height` pixels.
    pub fn render_rgb(config: &ChartConfig, width: u32, height: u32) -> Result<RgbImage, ExportError> {
        let width = width.max(1);
        let height = height.max(1);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            if let Err(err) = Self::draw_labelled(&root, config) {
                tracing::warn!(error = %err, "labelled chart failed, drawing without text");
                root.fill(&WHITE).map_err(render_err)?;
                Self::draw_plain(&root, config)?;
            }
            root.present().map_err(render_err)?;
        }

        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ExportError::Render("raster buffer size mismatch".to_string()))
    }

    /// Render `config` and encode it as JPEG.
    pub fn render_jpeg(config: &ChartConfig, width: u32, height: u32) -> Result<EncodedRaster, ExportError> {
        let image = Self::render_rgb(config, width, height)?;
        let (width, height) = image.dimensions();

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;

        Ok(EncodedRaster {
            width,
            height,
            bytes,
        })
    }

    /// Axis ranges as (x, y), depending on orientation.
    fn ranges(config: &ChartConfig) -> ((f64, f64), (f64, f64)) {
        let count = config.labels.len().max(1) as f64;
        let categories = (-0.5, count - 0.5);
        let values = config.value_range();
        match config.orientation {
            Orientation::Vertical => (categories, values),
            Orientation::Horizontal => (values, categories),
        }
    }

    fn draw_labelled(root: &DrawingArea<BitMapBackend<'_>, Shift>, config: &ChartConfig) -> Result<(), ExportError> {
        let ((x0, x1), (y0, y1)) = Self::ranges(config);
        let mut chart = ChartBuilder::on(root)
            .caption(&config.dataset.label, ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(55)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        let labels = &config.labels;
        let category_count = labels.len().max(1);
        let date_labels = |v: &f64| category_label(labels, *v);
        let value_labels = |v: &f64| {
            let rounded = (v * 100.0).round() / 100.0;
            if rounded.is_finite() {
                rounded.to_string()
            } else {
                format!("{v:e}")
            }
        };

        let (x_title, y_title) = config.axis_titles();
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(x_title).y_desc(y_title);
        match config.orientation {
            Orientation::Vertical => {
                mesh.disable_x_mesh()
                    .x_labels(category_count)
                    .x_label_formatter(&date_labels)
                    .y_label_formatter(&value_labels);
            }
            Orientation::Horizontal => {
                mesh.disable_y_mesh()
                    .y_labels(category_count)
                    .y_label_formatter(&date_labels)
                    .x_label_formatter(&value_labels);
            }
        }
        mesh.draw().map_err(render_err)?;

        Self::draw_series(&mut chart, config, true)?;

        if !config.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_err)?;
        }
        Ok(())
    }

    fn draw_plain(root: &DrawingArea<BitMapBackend<'_>, Shift>, config: &ChartConfig) -> Result<(), ExportError> {
        let ((x0, x1), (y0, y1)) = Self::ranges(config);
        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        let axis = BLACK.stroke_width(1);
        chart
            .draw_series(std::iter::once(PathElement::new(vec![(x0, y1), (x0, y0), (x1, y0)], axis)))
            .map_err(render_err)?;

        Self::draw_series(&mut chart, config, false)
    }

    fn draw_series(chart: &mut Chart<'_, '_>, config: &ChartConfig, with_legend: bool) -> Result<(), ExportError> {
        if config.is_empty() {
            return Ok(());
        }
        match config.kind {
            SeriesKind::Line => Self::draw_line(chart, config, with_legend),
            SeriesKind::Bar => Self::draw_bars(chart, config, with_legend),
        }
    }

    fn draw_line(chart: &mut Chart<'_, '_>, config: &ChartConfig, with_legend: bool) -> Result<(), ExportError> {
        let dataset = &config.dataset;
        let color = rgb(dataset.border_color(0));
        let raw = config.points();
        let curve: Vec<(f64, f64)> = smoothing::smooth(&raw, dataset.tension, SMOOTH_STEPS)
            .into_iter()
            .map(|p| (p[0], p[1]))
            .collect();

        let stroke = color.stroke_width((dataset.border_width * 2.0).round().max(1.0) as u32);
        let annotation = if dataset.fill {
            chart
                .draw_series(
                    AreaSeries::new(curve, 0.0, color.mix(FILL_ALPHA as f64)).border_style(stroke),
                )
                .map_err(render_err)?
        } else {
            chart
                .draw_series(LineSeries::new(curve, stroke))
                .map_err(render_err)?
        };

        if with_legend {
            annotation
                .label(dataset.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
        }

        chart
            .draw_series(
                raw.iter()
                    .map(|p| Circle::new((p[0], p[1]), POINT_RADIUS, color.filled())),
            )
            .map_err(render_err)?;
        Ok(())
    }

    fn draw_bars(chart: &mut Chart<'_, '_>, config: &ChartConfig, with_legend: bool) -> Result<(), ExportError> {
        let dataset = &config.dataset;
        let horizontal = config.orientation == Orientation::Horizontal;
        let half = BAR_WIDTH / 2.0;

        let corners = |i: usize, value: f64| -> [(f64, f64); 2] {
            let c = i as f64;
            let value = plotted_value(value);
            if horizontal {
                [(0.0, c - half), (value, c + half)]
            } else {
                [(c - half, 0.0), (c + half, value)]
            }
        };

        let annotation = chart
            .draw_series(dataset.values.iter().enumerate().map(|(i, &value)| {
                let fill = rgb(dataset.border_color(i)).mix(FILL_ALPHA as f64);
                Rectangle::new(corners(i, value), fill.filled())
            }))
            .map_err(render_err)?;

        if with_legend {
            let color = rgb(dataset.border_color(0));
            annotation
                .label(dataset.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.mix(0.4).filled()));
        }

        let border = (dataset.border_width.round().max(1.0)) as u32;
        chart
            .draw_series(dataset.values.iter().enumerate().map(|(i, &value)| {
                Rectangle::new(corners(i, value), rgb(dataset.border_color(i)).stroke_width(border))
            }))
            .map_err(render_err)?;
        Ok(())
    }
}

/// An encoded raster ready to be embedded in a document.
#[derive(Debug, Clone)]
pub struct EncodedRaster {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}
