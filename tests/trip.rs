mod common;

use common::{FaultyOracle, a320, reference_trip};
use descent_planner::trajectory::{
    BracketSide, ConfigurationError, SpeedSchedule, TrajectoryError, TripRequest, assemble_trip,
    compute_eta_bracket,
};

#[test]
fn fast_trip_combines_cruise_and_descent() {
    let trip = assemble_trip(&a320(), &reference_trip(), &SpeedSchedule::FASTEST).expect("trip");
    assert!(
        (trip.cruise_ground_speed_kt - 458.9).abs() <= 0.2,
        "ground speed {}",
        trip.cruise_ground_speed_kt
    );
    assert!(
        (trip.cruise_distance_nm + trip.profile.summary.descent_distance_nm - 200.0).abs() < 1e-9
    );
    assert!((trip.eta_s - (trip.cruise_time_s + trip.descent_time_s)).abs() <= 0.05);
    assert!((trip.eta_s - 1752.4).abs() <= 5.0, "ETA {}", trip.eta_s);
}

#[test]
fn bracket_orders_fast_before_slow() {
    let bracket = compute_eta_bracket(&a320(), &reference_trip()).expect("bracket");
    assert_eq!(bracket.fastest.schedule, SpeedSchedule::FASTEST);
    assert_eq!(bracket.slowest.schedule, SpeedSchedule::SLOWEST);
    assert!(bracket.eta_min_s() < bracket.eta_max_s());
    assert!((bracket.eta_min_s() - 1752.4).abs() <= 5.0, "ETAmin {}", bracket.eta_min_s());
    assert!((bracket.eta_max_s() - 2067.5).abs() <= 5.0, "ETAmax {}", bracket.eta_max_s());
    assert!((bracket.window_s() - (bracket.eta_max_s() - bracket.eta_min_s())).abs() < 1e-9);
}

#[test]
fn relative_position_is_clamped() {
    let bracket = compute_eta_bracket(&a320(), &reference_trip()).expect("bracket");
    let midpoint = (bracket.eta_min_s() + bracket.eta_max_s()) / 2.0;
    assert!((bracket.relative_position(midpoint) - 0.5).abs() < 1e-9);
    assert_eq!(bracket.relative_position(bracket.eta_min_s() - 100.0), 0.0);
    assert_eq!(bracket.relative_position(bracket.eta_max_s() + 100.0), 1.0);
}

#[test]
fn degenerate_window_reports_position_zero() {
    let bracket = compute_eta_bracket(&a320(), &reference_trip()).expect("bracket");
    let mut flat = bracket.clone();
    flat.slowest = flat.fastest.clone();
    assert_eq!(flat.window_s(), 0.0);
    assert_eq!(flat.relative_position(flat.eta_min_s() + 30.0), 0.0);
}

#[test]
fn route_shorter_than_descent_is_rejected() {
    let request = TripRequest {
        route_length_nm: 50.0,
        ..reference_trip()
    };
    let err = assemble_trip(&a320(), &request, &SpeedSchedule::FASTEST).expect_err("too short");
    match err {
        TrajectoryError::Configuration(ConfigurationError::NegativeCruiseDistance {
            route_nm,
            descent_nm,
        }) => {
            assert_eq!(route_nm, 50.0);
            assert!(descent_nm > 50.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_positive_route_is_rejected() {
    let request = TripRequest {
        route_length_nm: 0.0,
        ..reference_trip()
    };
    let err = assemble_trip(&a320(), &request, &SpeedSchedule::FASTEST).expect_err("empty route");
    assert!(matches!(
        err,
        TrajectoryError::Configuration(ConfigurationError::NonPositive { quantity: "route length", .. })
    ));
}

#[test]
fn bracket_failure_names_the_failing_side() {
    let oracle = FaultyOracle::failing_at(SpeedSchedule::SLOWEST.descent_mach);
    let err = compute_eta_bracket(&oracle, &reference_trip()).expect_err("slow side fails");
    assert!(matches!(
        err,
        TrajectoryError::BracketUnavailable {
            side: BracketSide::Slowest,
            ..
        }
    ));
    assert!(err.to_string().contains("slowest"));

    let oracle = FaultyOracle::failing_at(SpeedSchedule::FASTEST.descent_mach);
    let err = compute_eta_bracket(&oracle, &reference_trip()).expect_err("fast side fails");
    assert!(matches!(
        err,
        TrajectoryError::BracketUnavailable {
            side: BracketSide::Fastest,
            ..
        }
    ));
}

#[test]
fn configuration_errors_are_not_wrapped_as_bracket_failures() {
    let request = TripRequest {
        route_length_nm: 50.0,
        ..reference_trip()
    };
    let err = compute_eta_bracket(&a320(), &request).expect_err("too short");
    assert!(matches!(err, TrajectoryError::Configuration(_)));
}

#[test]
fn second_aircraft_brackets_its_own_window() {
    let model = descent_planner::performance::ParametricAircraft::from_catalog(
        &common::model_config(),
        "B738",
    )
    .expect("B738");
    let request = TripRequest {
        origin_fl: 350,
        target_fl: 30,
        mass_kg: 65_000.0,
        route_length_nm: 180.0,
        delta_temp_k: 0.0,
    };
    let bracket = compute_eta_bracket(&model, &request).expect("bracket");
    assert!((bracket.eta_min_s() - 1589.8).abs() <= 5.0, "ETAmin {}", bracket.eta_min_s());
    assert!((bracket.eta_max_s() - 1885.7).abs() <= 5.0, "ETAmax {}", bracket.eta_max_s());
}
