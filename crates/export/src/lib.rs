//! Export helpers for descent tables (CSV) and JSON sidecars.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod table {
    use std::io;
    use std::path::Path;

    use serde::Serialize;

    use super::writer_for_path;

    /// One row of the descent table, in column order.
    #[derive(Debug, Clone, Serialize)]
    pub struct PointRecord<'a> {
        pub fl: i32,
        pub altitude_ft: f64,
        pub speed_mode: &'a str,
        pub mach: f64,
        pub cas_kt: f64,
        pub tas_kt: f64,
        pub rate_ft_min: f64,
        pub rate_m_s: f64,
        pub angle_deg: f64,
        pub gradient_pct: f64,
        pub ratio_ft_nm: f64,
        pub esf: f64,
        pub drag_n: f64,
        pub idle_thrust_n: f64,
        pub fuel_flow_kg_h: f64,
        pub fuel_flow_kg_s: f64,
        pub cl: f64,
        pub cd: f64,
        pub deceleration: bool,
        pub cum_distance_nm: f64,
        pub cum_time_s: f64,
        pub cum_fuel_kg: f64,
    }

    /// One row of the deceleration log.
    #[derive(Debug, Clone, Serialize)]
    pub struct DecelerationRecord<'a> {
        pub trigger: &'a str,
        pub fl: i32,
        pub cas_before_kt: f64,
        pub cas_after_kt: f64,
        pub distance_nm: f64,
        pub time_s: f64,
        pub fuel_kg: f64,
        pub tas_kt: f64,
    }

    /// Write serializable rows as CSV with a header derived from the field names.
    pub fn write_rows<R, I>(path: &Path, rows: I) -> io::Result<()>
    where
        R: Serialize,
        I: IntoIterator<Item = R>,
    {
        let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()
    }
}

pub mod sidecar {
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::writer_for_path;

    /// Sibling path `<stem>_<suffix>.<extension>` next to `output`.
    pub fn sibling_path(output: &Path, suffix: &str, extension: &str) -> PathBuf {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("descent");
        parent.join(format!("{stem}_{suffix}.{extension}"))
    }

    /// Pretty-print `value` as JSON to `path` (or stdout for `-`).
    pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()
    }
}
