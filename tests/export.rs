mod common;

use std::fs::File;

use common::{a320, reference_trip};
use descent_planner::output::{write_bracket_json, write_profile_csv, write_search_json};
use descent_planner::trajectory::{
    RtaQuery, SpeedSchedule, compute_descent_profile, compute_eta_bracket, find_profiles_for_rta,
};
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn descent_table_and_deceleration_log_are_written() {
    let profile = compute_descent_profile(&a320(), &reference_trip().descent(), &SpeedSchedule::FASTEST)
        .expect("profile");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("out").join("fast.csv");
    write_profile_csv(&path, &profile).expect("write csv");

    let mut reader = csv::Reader::from_path(&path).expect("open table");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.get(0), Some("fl"));
    assert!(headers.iter().any(|h| h == "cum_fuel_kg"));
    assert_eq!(headers.len(), 22);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), profile.points.len());
    assert_eq!(&rows[0][0], "370");
    assert_eq!(&rows[0][2], "Mach 0.80");

    let decel_path = dir.path().join("out").join("fast_decelerations.csv");
    let mut reader = csv::Reader::from_path(&decel_path).expect("open log");
    let triggers: Vec<String> = reader
        .records()
        .map(|r| r.expect("row")[0].to_string())
        .collect();
    assert_eq!(triggers, ["regulatory", "approach"]);
}

#[test]
fn bracket_json_carries_both_trips() {
    let bracket = compute_eta_bracket(&a320(), &reference_trip()).expect("bracket");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bracket.json");
    write_bracket_json(&path, &bracket).expect("write json");

    let value: Value = serde_json::from_reader(File::open(&path).expect("open")).expect("parse");
    assert_eq!(value["fastest"]["eta_s"].as_f64(), Some(bracket.eta_min_s()));
    assert_eq!(value["slowest"]["schedule"]["intermediate"]["flight_level"], 150);
    assert!(value["fastest"]["profile"]["points"].as_array().is_some_and(|p| p.len() == 37));
}

#[test]
fn search_report_json_lists_ranked_candidates() {
    let bracket = compute_eta_bracket(&a320(), &reference_trip()).expect("bracket");
    let rta = (bracket.eta_min_s() + bracket.eta_max_s()) / 2.0;
    let report = find_profiles_for_rta(&a320(), &reference_trip(), &RtaQuery::new(rta, 10.0, 3))
        .expect("report");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("search.json");
    write_search_json(&path, &report).expect("write json");

    let value: Value = serde_json::from_reader(File::open(&path).expect("open")).expect("parse");
    assert_eq!(value["band_index"], 2);
    assert!(value["infeasible"].is_null());
    let candidates = value["candidates"].as_array().expect("candidates");
    assert_eq!(candidates.len(), report.candidates.len());
    assert_eq!(
        candidates[0]["label"].as_str(),
        report.best().map(|best| best.label.as_str())
    );
}
