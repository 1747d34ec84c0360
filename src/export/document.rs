//! PDF Chart Document Module
//! Builds a single-page PDF with the chart raster placed at a fixed position.
//!
//! The file is written directly (objects, xref table, trailer) rather than
//! through a PDF library: one page, one JPEG image XObject embedded with
//! DCTDecode, one content stream that places it.

use super::ExportError;
use crate::charts::{ChartConfig, EncodedRaster, StaticChartRenderer};
use std::io::Write;

const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Page geometry and raster resolution for the chart document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfLayout {
    /// A4 portrait by default.
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// Offset of the image from the top-left corner.
    pub left_mm: f64,
    pub top_mm: f64,
    /// Image width on the page; height follows the raster aspect ratio.
    pub image_width_mm: f64,
    pub raster_width: u32,
    pub raster_height: u32,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            left_mm: 10.0,
            top_mm: 10.0,
            image_width_mm: 180.0,
            raster_width: 1200,
            raster_height: 600,
        }
    }
}

impl PdfLayout {
    /// Image placement in PDF user space: (x, y, width, height) in points,
    /// origin at the bottom-left of the page.
    pub fn placement(&self, raster_width: u32, raster_height: u32) -> (f64, f64, f64, f64) {
        let width_mm = self.image_width_mm;
        let height_mm = if raster_width == 0 {
            0.0
        } else {
            raster_height as f64 * width_mm / raster_width as f64
        };

        let x = self.left_mm * POINTS_PER_MM;
        let y = (self.page_height_mm - self.top_mm - height_mm) * POINTS_PER_MM;
        (x, y, width_mm * POINTS_PER_MM, height_mm * POINTS_PER_MM)
    }
}

/// Rasterise `config` and wrap it in a one-page PDF.
pub fn chart_pdf(config: &ChartConfig, layout: &PdfLayout) -> Result<Vec<u8>, ExportError> {
    let raster = StaticChartRenderer::render_jpeg(config, layout.raster_width, layout.raster_height)?;
    let bytes = PdfWriter::single_image_page(&raster, layout, "Water Consumption Chart")?;
    tracing::debug!(
        mode = %config.mode,
        raster = raster.bytes.len(),
        document = bytes.len(),
        "chart document built"
    );
    Ok(bytes)
}

/// Minimal PDF object writer that records byte offsets for the xref table.
struct PdfWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            out,
            offsets: Vec::new(),
        }
    }

    /// Start object number `offsets.len() + 1`.
    fn begin_object(&mut self) -> Result<usize, ExportError> {
        self.offsets.push(self.out.len());
        let id = self.offsets.len();
        write!(self.out, "{} 0 obj\n", id)?;
        Ok(id)
    }

    fn dictionary_object(&mut self, dictionary: &str) -> Result<usize, ExportError> {
        let id = self.begin_object()?;
        write!(self.out, "{}\nendobj\n", dictionary)?;
        Ok(id)
    }

    fn stream_object(&mut self, dictionary: &str, data: &[u8]) -> Result<usize, ExportError> {
        let id = self.begin_object()?;
        write!(self.out, "<< {} /Length {} >>\nstream\n", dictionary, data.len())?;
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(b"\nendstream\nendobj\n");
        Ok(id)
    }

    fn finish(mut self, root: usize, info: usize) -> Result<Vec<u8>, ExportError> {
        let xref_offset = self.out.len();
        let size = self.offsets.len() + 1;
        write!(self.out, "xref\n0 {}\n", size)?;
        self.out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets {
            write!(self.out, "{:010} 00000 n \n", offset)?;
        }
        write!(
            self.out,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, root, info, xref_offset
        )?;
        Ok(self.out)
    }

    fn single_image_page(
        raster: &EncodedRaster,
        layout: &PdfLayout,
        title: &str,
    ) -> Result<Vec<u8>, ExportError> {
        let page_w = layout.page_width_mm * POINTS_PER_MM;
        let page_h = layout.page_height_mm * POINTS_PER_MM;
        let (x, y, w, h) = layout.placement(raster.width, raster.height);
        let content = format!("q\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/Im0 Do\nQ\n", w, h, x, y);

        // Object numbers are fixed: 1 catalog, 2 pages, 3 page, 4 image,
        // 5 content, 6 info.
        let mut pdf = Self::new();
        let catalog = pdf.dictionary_object("<< /Type /Catalog /Pages 2 0 R >>")?;
        pdf.dictionary_object("<< /Type /Pages /Kids [3 0 R] /Count 1 >>")?;
        pdf.dictionary_object(&format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /XObject << /Im0 4 0 R >> >> /Contents 5 0 R >>",
            page_w, page_h
        ))?;
        pdf.stream_object(
            &format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode",
                raster.width, raster.height
            ),
            &raster.bytes,
        )?;
        pdf.stream_object("", content.as_bytes())?;
        let info = pdf.dictionary_object(&format!(
            "<< /Title ({}) /Producer (Water Consumption Tracker) >>",
            escape_text(title)
        ))?;

        pdf.finish(catalog, info)
    }
}

/// Escape a PDF literal string.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::DisplayMode;

    fn small_layout() -> PdfLayout {
        PdfLayout {
            raster_width: 300,
            raster_height: 150,
            ..PdfLayout::default()
        }
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn placement_scales_height_by_aspect_ratio() {
        let layout = PdfLayout::default();
        let (x, y, w, h) = layout.placement(1200, 600);
        assert!((x - 10.0 * POINTS_PER_MM).abs() < 1e-9);
        assert!((w - 180.0 * POINTS_PER_MM).abs() < 1e-9);
        assert!((h - 90.0 * POINTS_PER_MM).abs() < 1e-9);
        // top edge sits 10 mm below the top of the page
        assert!((y + h - 287.0 * POINTS_PER_MM).abs() < 1e-9);
    }

    #[test]
    fn empty_chart_produces_a_complete_document() {
        let config = ChartConfig::build(DisplayMode::Line, &[]);
        let pdf = chart_pdf(&config, &small_layout()).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert_eq!(count(&pdf, b"/Type /Page "), 1);
        assert_eq!(count(&pdf, b"/DCTDecode"), 1);
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let config = ChartConfig::build(DisplayMode::Bar, &[]);
        let pdf = chart_pdf(&config, &small_layout()).unwrap();

        let marker = b"startxref\n";
        let pos = pdf
            .windows(marker.len())
            .rposition(|w| w == marker)
            .unwrap();
        let tail = std::str::from_utf8(&pdf[pos + marker.len()..]).unwrap();
        let start: usize = tail.lines().next().unwrap().parse().unwrap();

        let xref = std::str::from_utf8(&pdf[start..]).unwrap();
        assert!(xref.starts_with("xref\n0 7\n"));

        let entries: Vec<&str> = xref.lines().skip(3).take(6).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let header = format!("{} 0 obj", i + 1);
            assert!(pdf[offset..].starts_with(header.as_bytes()), "object {}", i + 1);
        }
    }

    #[test]
    fn title_is_escaped() {
        assert_eq!(escape_text("a (b) \\ c"), "a \\(b\\) \\\\ c");
        assert_eq!(escape_text("caf\u{e9}"), "caf?");
    }
}
