//! GUI module - User interface components

mod app;
mod chart_viewer;
mod entry_form;
mod table_view;

pub use app::TrackerApp;
pub use chart_viewer::ChartViewer;
pub use entry_form::{EntryForm, FormAction};
pub use table_view::DataTable;
