use descent_planner::performance::FlightEvolution;
use descent_planner::trajectory::deceleration::{
    DecelerationTrigger, deceleration_demand,
};
use descent_planner::trajectory::schedule::{SpeedTarget, resolve_speed};
use descent_planner::trajectory::search::{SEARCH_BANDS, band_index, candidate_schedules};
use descent_planner::trajectory::{ConfigurationError, SpeedSchedule};

#[test]
fn labels_match_schedule_shape() {
    assert_eq!(SpeedSchedule::FASTEST.to_string(), "0.80M/310kt");
    assert_eq!(SpeedSchedule::SLOWEST.to_string(), "0.73M/245kt/220kt@FL150");
    let zero_step = SpeedSchedule::new(0.78, 290.0).with_intermediate(0.0, 100);
    assert_eq!(zero_step.to_string(), "0.78M/290kt");
}

#[test]
fn mach_held_at_and_above_crossover_without_intermediate() {
    let schedule = SpeedSchedule::new(0.78, 280.0);
    let at = resolve_speed(320, 320, &schedule, None);
    assert_eq!(at.target, SpeedTarget::Mach(0.78));
    assert_eq!(at.evolution, FlightEvolution::ConstantMach);
    assert_eq!(at.label(), "Mach 0.78");

    let below = resolve_speed(310, 320, &schedule, None);
    assert_eq!(below.cas_target_kt(), Some(280.0));
    assert_eq!(below.evolution, FlightEvolution::ConstantCas);
    assert_eq!(below.label(), "CAS 280kt");
}

#[test]
fn intermediate_step_splits_cas_at_trigger_level() {
    let schedule = SpeedSchedule::new(0.76, 270.0).with_intermediate(220.0, 80);
    // Mach is never held once an intermediate step is configured.
    assert_eq!(resolve_speed(370, 300, &schedule, None).cas_target_kt(), Some(270.0));
    assert_eq!(resolve_speed(80, 300, &schedule, None).cas_target_kt(), Some(270.0));
    assert_eq!(resolve_speed(70, 300, &schedule, None).cas_target_kt(), Some(220.0));
}

#[test]
fn forced_cas_overrides_schedule() {
    let schedule = SpeedSchedule::FASTEST;
    let forced = resolve_speed(370, 290, &schedule, Some(250.0));
    assert_eq!(forced.target, SpeedTarget::CasKt(250.0));
    assert_eq!(forced.mach_target(), None);
    assert_eq!(forced.evolution, FlightEvolution::ConstantCas);
}

#[test]
fn mach_hold_always_counts_as_exceeding_a_ceiling() {
    let schedule = SpeedSchedule::new(0.78, 280.0);
    assert!(resolve_speed(350, 300, &schedule, None).exceeds(400.0));
    assert!(!resolve_speed(200, 300, &schedule, None).exceeds(280.0));
    assert!(resolve_speed(200, 300, &schedule, None).exceeds(250.0));
}

#[test]
fn validation_rejects_inverted_steps() {
    let inverted = SpeedSchedule::new(0.75, 240.0).with_intermediate(260.0, 100);
    assert_eq!(
        inverted.validate(),
        Err(ConfigurationError::IntermediateAboveHighCas {
            intermediate_kt: 260.0,
            high_kt: 240.0,
        })
    );
    assert!(SpeedSchedule::new(0.0, 280.0).validate().is_err());
    assert!(SpeedSchedule::SLOWEST.validate().is_ok());
}

#[test]
fn deceleration_triggers_need_strict_excess() {
    let schedule = SpeedSchedule::FASTEST;
    let regulatory = deceleration_demand(100, 310.0, &schedule).expect("FL100 limit");
    assert_eq!(regulatory.trigger, DecelerationTrigger::Regulatory);
    assert_eq!(regulatory.target_cas_kt, 250.0);

    assert!(deceleration_demand(100, 250.0, &schedule).is_none());
    assert!(deceleration_demand(110, 310.0, &schedule).is_none());

    let approach = deceleration_demand(30, 250.0, &schedule).expect("FL30 limit");
    assert_eq!(approach.trigger, DecelerationTrigger::Approach);
    assert_eq!(approach.target_cas_kt, 220.0);
    assert!(deceleration_demand(30, 220.0, &schedule).is_none());
}

#[test]
fn profile_step_takes_precedence_at_shared_level() {
    let at_fl100 = SpeedSchedule::new(0.78, 300.0).with_intermediate(230.0, 100);
    let demand = deceleration_demand(100, 300.0, &at_fl100).expect("decelerate");
    assert_eq!(demand.trigger, DecelerationTrigger::Profile);
    assert_eq!(demand.target_cas_kt, 230.0);

    let at_fl30 = SpeedSchedule::new(0.78, 300.0).with_intermediate(200.0, 30);
    let demand = deceleration_demand(30, 250.0, &at_fl30).expect("decelerate");
    assert_eq!(demand.trigger, DecelerationTrigger::Profile);
    assert_eq!(demand.target_cas_kt, 200.0);
}

#[test]
fn bands_partition_relative_position() {
    assert_eq!(band_index(0.0), 0);
    assert_eq!(band_index(0.1999), 0);
    assert_eq!(band_index(0.2), 1);
    assert_eq!(band_index(0.5), 2);
    assert_eq!(band_index(0.8), 4);
    assert_eq!(band_index(1.0), 4);
    assert_eq!(SEARCH_BANDS.len(), 5);
}

#[test]
fn candidates_include_baselines_once() {
    let early = candidate_schedules(0.0);
    // 9 Mach/CAS pairs × 2 distinct intermediates; the fast baseline is already in the grid.
    assert_eq!(early.len(), 19);
    assert_eq!(
        early.iter().filter(|s| **s == SpeedSchedule::FASTEST).count(),
        1
    );
    assert_eq!(early.last(), Some(&SpeedSchedule::SLOWEST));

    let middle = candidate_schedules(0.5);
    assert_eq!(middle.len(), 42);
    assert_eq!(middle[40], SpeedSchedule::FASTEST);
    assert_eq!(middle[41], SpeedSchedule::SLOWEST);

    let late = candidate_schedules(1.0);
    assert!(late.contains(&SpeedSchedule::SLOWEST));
    assert_eq!(late.len(), 6 * 5 + 1);
}
