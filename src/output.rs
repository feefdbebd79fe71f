//! Writers for descent tables, deceleration logs and search reports.

use std::io;
use std::path::Path;

use descent_export::sidecar::{sibling_path, write_json};
use descent_export::table::{DecelerationRecord, PointRecord, write_rows};
use descent_trajectory::{DescentPoint, DescentProfile, EtaBracket, RtaSearchReport};

fn point_record(point: &DescentPoint) -> PointRecord<'_> {
    PointRecord {
        fl: point.flight_level,
        altitude_ft: point.altitude_ft,
        speed_mode: &point.speed_mode,
        mach: point.mach,
        cas_kt: point.cas_kt,
        tas_kt: point.tas_kt,
        rate_ft_min: point.descent_rate_ft_min,
        rate_m_s: point.descent_rate_m_s,
        angle_deg: point.descent_angle_deg,
        gradient_pct: point.descent_gradient_pct,
        ratio_ft_nm: point.altitude_distance_ratio_ft_nm,
        esf: point.energy_share_factor,
        drag_n: point.drag_n,
        idle_thrust_n: point.idle_thrust_n,
        fuel_flow_kg_h: point.fuel_flow_kg_h,
        fuel_flow_kg_s: point.fuel_flow_kg_s,
        cl: point.lift_coefficient,
        cd: point.drag_coefficient,
        deceleration: point.is_deceleration_point,
        cum_distance_nm: point.cumulative_distance_nm,
        cum_time_s: point.cumulative_time_s,
        cum_fuel_kg: point.cumulative_fuel_kg,
    }
}

/// Write the descent table to `path` and, for file outputs, the deceleration log beside it
/// as `<stem>_decelerations.csv`.
pub fn write_profile_csv(path: &Path, profile: &DescentProfile) -> io::Result<()> {
    write_rows(path, profile.points.iter().map(point_record))?;
    if path == Path::new("-") {
        return Ok(());
    }
    let triggers: Vec<String> = profile
        .decelerations
        .iter()
        .map(|segment| segment.trigger.to_string())
        .collect();
    let records = profile
        .decelerations
        .iter()
        .zip(&triggers)
        .map(|(segment, trigger)| DecelerationRecord {
            trigger,
            fl: segment.flight_level,
            cas_before_kt: segment.cas_before_kt,
            cas_after_kt: segment.cas_after_kt,
            distance_nm: segment.distance_nm,
            time_s: segment.time_s,
            fuel_kg: segment.fuel_kg,
            tas_kt: segment.tas_kt,
        });
    write_rows(&sibling_path(path, "decelerations", "csv"), records)
}

pub fn write_bracket_json(path: &Path, bracket: &EtaBracket) -> io::Result<()> {
    write_json(path, bracket)
}

pub fn write_search_json(path: &Path, report: &RtaSearchReport) -> io::Result<()> {
    write_json(path, report)
}
