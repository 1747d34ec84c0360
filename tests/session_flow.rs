//! End-to-end flows through the tracker session, without the window.

use std::fs;
use water_tracker::charts::{DisplayMode, Orientation, SeriesKind};
use water_tracker::export::DirectoryTarget;
use water_tracker::session::ModePolicy;
use water_tracker::{AppConfig, TrackerSession};

fn small_chart_config() -> AppConfig {
    AppConfig {
        chart_width: 240,
        chart_height: 120,
        ..AppConfig::default()
    }
}

#[test]
fn table_tracks_insertion_order_and_deletes() {
    let mut session = TrackerSession::new(&AppConfig::default());
    for (date, qty) in [("mon", "10"), ("tue", "12.5"), ("wed", "9"), ("thu", "11")] {
        session.submit(date, qty).unwrap();
    }
    assert_eq!(session.rows().len(), session.store().len());

    let removed = session.delete_at(1);
    assert_eq!(removed.date, "tue");
    let dates: Vec<&str> = session.rows().iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["mon", "wed", "thu"]);

    while !session.store().is_empty() {
        session.delete_at(0);
    }
    assert!(session.rows().is_empty());
    assert_eq!(session.chart().mounted_count(), 1);
    assert!(session.chart().current().unwrap().config.is_empty());
}

#[test]
fn rejected_input_never_reaches_the_store() {
    let mut session = TrackerSession::new(&AppConfig::default());
    assert!(session.submit("", "3").is_err());
    assert!(session.submit("2024-01-01", "").is_err());
    assert!(session.submit("2024-01-01", "abc").is_err());
    assert!(session.submit("2024-01-01", "NaN").is_err());
    assert!(session.store().is_empty());
}

#[test]
fn mode_switches_only_change_the_encoding() {
    let mut session = TrackerSession::new(&AppConfig::default());
    session.submit("a", "1").unwrap();
    session.submit("b", "2").unwrap();

    session.switch_mode(DisplayMode::Column);
    let config = &session.chart().current().unwrap().config;
    assert_eq!(config.kind, SeriesKind::Bar);
    assert_eq!(config.orientation, Orientation::Horizontal);

    for _ in 0..10 {
        for mode in DisplayMode::ALL {
            session.switch_mode(mode);
        }
    }
    assert_eq!(session.chart().mounted_count(), 1);
    assert_eq!(session.store().consumptions(), vec![1.0, 2.0]);
}

#[test]
fn reset_policy_snaps_back_to_line_after_add() {
    let config = AppConfig {
        mode_policy: ModePolicy::ResetToDefault,
        ..AppConfig::default()
    };
    let mut session = TrackerSession::new(&config);
    session.switch_mode(DisplayMode::Bar);
    session.submit("a", "1").unwrap();
    assert_eq!(session.chart().current().unwrap().mode(), DisplayMode::Line);
}

#[test]
fn exports_land_in_the_export_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = DirectoryTarget::new(dir.path());

    let mut session = TrackerSession::new(&small_chart_config());
    session.submit("2024-01-01", "12.5").unwrap();

    let csv_path = session.export_table().unwrap().deliver(&target).unwrap().unwrap();
    assert_eq!(csv_path.file_name().unwrap(), "water_consumption_data.csv");
    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "Date,Water Consumption (liters)\n2024-01-01,12.5"
    );

    let pdf_path = session.export_chart().unwrap().deliver(&target).unwrap().unwrap();
    assert_eq!(pdf_path.file_name().unwrap(), "water_consumption_chart.pdf");
    let pdf = fs::read(&pdf_path).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn empty_exports_still_produce_files() {
    let dir = tempfile::tempdir().unwrap();
    let target = DirectoryTarget::new(dir.path());
    let session = TrackerSession::new(&small_chart_config());

    let csv_path = session.export_table().unwrap().deliver(&target).unwrap().unwrap();
    assert_eq!(
        fs::read_to_string(csv_path).unwrap(),
        "Date,Water Consumption (liters)"
    );

    let pdf_path = session.export_chart().unwrap().deliver(&target).unwrap().unwrap();
    assert!(fs::metadata(pdf_path).unwrap().len() > 0);
}
