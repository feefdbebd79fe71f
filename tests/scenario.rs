mod common;

use std::fs;

use common::{CATALOG, SCENARIOS};
use descent_planner::config::{ConfigError, load_scenarios};
use descent_planner::performance::PerformanceOracle;
use descent_planner::scenario::{ScenarioError, load_scenario};
use tempfile::tempdir;

#[test]
fn first_scenario_is_the_default() {
    let scenario = load_scenario(SCENARIOS, None).expect("scenario");
    assert_eq!(scenario.config.name, "a320-fl370-200nm");
    assert_eq!(scenario.aircraft.model_name(), "A320-232");
    let trip = scenario.trip_request();
    assert_eq!((trip.origin_fl, trip.target_fl), (370, 30));
    assert_eq!(trip.route_length_nm, 200.0);
}

#[test]
fn named_scenario_fills_defaults() {
    let scenario = load_scenario(SCENARIOS, Some("B738-FL350-180NM")).expect("scenario");
    assert_eq!(scenario.aircraft.model_name(), "B738");
    assert_eq!(scenario.config.tolerance_s, 10.0);
    assert_eq!(scenario.config.max_results, 5);
    assert_eq!(scenario.config.delta_temp_k, 0.0);

    let query = scenario.rta_query(1700.0);
    assert_eq!(query.target_rta_s, 1700.0);
    assert_eq!(query.candidate_budget, None);
    assert_eq!(scenario.descent_request().cruise_fl, 350);
}

#[test]
fn unknown_scenario_name_is_reported() {
    let err = load_scenario(SCENARIOS, Some("concorde")).expect_err("missing");
    assert!(matches!(err, ScenarioError::NotFound(name) if name == "concorde"));
}

#[test]
fn catalog_path_resolves_relative_to_scenario_file() {
    let scenarios = load_scenarios(SCENARIOS).expect("scenarios");
    let catalog = &scenarios[0].performance_model.catalog_path;
    assert!(catalog.ends_with("../aircraft"));
    assert!(catalog.is_dir());
}

fn absolute_catalog() -> String {
    fs::canonicalize(CATALOG)
        .expect("catalog dir")
        .display()
        .to_string()
}

#[test]
fn inverted_levels_fail_validation() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        format!(
            "- name: climb\n  aircraft: A320-232\n  origin_fl: 100\n  target_fl: 200\n  \
             mass_kg: 60000.0\n  route_length_nm: 150.0\n  performance_model:\n    \
             version: parametric-1\n    catalog_path: {}\n",
            absolute_catalog()
        ),
    )
    .expect("write scenario");
    let err = load_scenario(&path, None).expect_err("invalid");
    assert!(matches!(
        err,
        ScenarioError::Config(ConfigError::InvalidScenario { ref name, .. }) if name == "climb"
    ));
}

#[test]
fn toml_scenario_loads_single_record() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("short.toml");
    fs::write(
        &path,
        format!(
            "name = \"short-hop\"\naircraft = \"A320-232\"\norigin_fl = 250\ntarget_fl = 30\n\
             mass_kg = 55000.0\nroute_length_nm = 120.0\ntolerance_s = 5.0\n\n\
             [performance_model]\nversion = \"parametric-1\"\ncatalog_path = \"{}\"\n",
            absolute_catalog()
        ),
    )
    .expect("write scenario");
    let scenario = load_scenario(&path, None).expect("scenario");
    assert_eq!(scenario.config.name, "short-hop");
    assert_eq!(scenario.config.tolerance_s, 5.0);
    assert_eq!(scenario.config.max_results, 5);
}

#[test]
fn unknown_aircraft_in_scenario_is_a_performance_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ghost.yaml");
    fs::write(
        &path,
        format!(
            "- name: ghost\n  aircraft: X999\n  origin_fl: 300\n  target_fl: 30\n  \
             mass_kg: 60000.0\n  route_length_nm: 150.0\n  performance_model:\n    \
             version: parametric-1\n    catalog_path: {}\n",
            absolute_catalog()
        ),
    )
    .expect("write scenario");
    let err = load_scenario(&path, None).expect_err("unknown aircraft");
    assert!(matches!(err, ScenarioError::Performance(_)), "{err}");
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "- name: [unterminated\n").expect("write");
    let err = load_scenarios(&path).expect_err("parse failure");
    assert!(matches!(err, ConfigError::Parse(_)));
}
