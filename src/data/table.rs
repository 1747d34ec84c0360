//! Table projection: one display row per observation, in store order.

use super::observation::{Observation, ObservationId};

/// Column headers shared by the on-screen table and the CSV export.
pub const DATE_HEADER: &str = "Date";
pub const CONSUMPTION_HEADER: &str = "Water Consumption (liters)";

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: ObservationId,
    pub date: String,
    pub consumption: String,
}

/// Text of a quantity as shown in the table and written to CSV.
///
/// Shortest round-trip digits in plain decimal notation. Magnitudes of `1e21`
/// and above or below `1e-6` use exponent notation with an explicit sign
/// (`1e+21`, `1.5e-7`). Negative zero is written as `0`.
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&value.abs()) {
        return value.to_string();
    }
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Build the rows shown in the table. Values are shown verbatim, using the
/// shortest `f64` representation.
pub fn project(records: &[Observation]) -> Vec<TableRow> {
    records
        .iter()
        .map(|entry| TableRow {
            id: entry.id,
            date: entry.date.clone(),
            consumption: format_quantity(entry.consumption),
        })
        .collect()
}
