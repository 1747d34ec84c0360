//! Table export: the current observations as delimited text.

use super::ExportError;
use crate::data::table::{format_quantity, CONSUMPTION_HEADER, DATE_HEADER};
use crate::data::Observation;
use serde::Deserialize;

/// How fields are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvStyle {
    /// Fields joined with commas as-is. A date containing a comma or quote
    /// produces a malformed row.
    #[default]
    Raw,
    /// Fields containing a delimiter, quote or line break are quoted.
    Quoted,
}

/// Header row, then one row per entry, joined with `\n` and no trailing newline.
pub fn to_csv(records: &[Observation], style: CsvStyle) -> Result<String, ExportError> {
    match style {
        CsvStyle::Raw => Ok(raw(records)),
        CsvStyle::Quoted => quoted(records),
    }
}

fn raw(records: &[Observation]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push([DATE_HEADER, CONSUMPTION_HEADER].join(","));
    for entry in records {
        rows.push(format!("{},{}", entry.date, format_quantity(entry.consumption)));
    }
    rows.join("\n")
}

fn quoted(records: &[Observation]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record([DATE_HEADER, CONSUMPTION_HEADER])?;
    for entry in records {
        writer.write_record([entry.date.as_str(), format_quantity(entry.consumption).as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
