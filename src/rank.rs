//! Table ranking and row formatting.
//!

use tabled::Tabled;

use crate::{is_military, PolarPosition, RawAircraft};

/// One row of the data table, nearest aircraft first.
///
#[derive(Clone, Debug, PartialEq, Tabled)]
pub struct TableRow {
    #[tabled(rename = "CALL")]
    pub callsign: String,
    #[tabled(rename = "ALT")]
    pub altitude: String,
    #[tabled(rename = "SPD")]
    pub speed: String,
    #[tabled(rename = "DIST")]
    pub distance: String,
    #[tabled(rename = "HDG")]
    pub track: String,
    #[tabled(skip)]
    pub hex: String,
    #[tabled(skip)]
    pub distance_nm: f64,
    #[tabled(skip)]
    pub is_military: bool,
}

impl TableRow {
    pub fn new(a: &RawAircraft, polar: &PolarPosition, is_military: bool) -> Self {
        TableRow {
            callsign: a.callsign.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
            altitude: fmt_altitude(a),
            speed: fmt_opt(a.speed, |v| format!("{:.0}", v)),
            distance: format!("{:.1}", polar.distance_nm),
            track: fmt_opt(a.track, |v| format!("{:03.0}°", v)),
            hex: a.hex.clone(),
            distance_nm: polar.distance_nm,
            is_military,
        }
    }
}

fn fmt_altitude(a: &RawAircraft) -> String {
    if a.on_ground {
        return "GND".to_string();
    }
    fmt_opt(a.altitude, |v| format!("{:.0}", v))
}

fn fmt_opt(v: Option<f64>, f: impl Fn(f64) -> String) -> String {
    v.map(f).unwrap_or_else(|| "N/A".to_string())
}

/// Order the filtered set for display.
///
/// Ascending by distance, ties broken on the hex identifier so the order is
/// deterministic, then truncated to `max_rows`.
///
#[tracing::instrument(skip(entries, mil_prefixes))]
pub fn rank(
    entries: &[(RawAircraft, PolarPosition)],
    max_rows: usize,
    mil_prefixes: &[String],
) -> Vec<TableRow> {
    let mut sorted: Vec<&(RawAircraft, PolarPosition)> = entries.iter().collect();
    sorted.sort_by(|(a, pa), (b, pb)| {
        pa.distance_nm
            .total_cmp(&pb.distance_nm)
            .then_with(|| a.hex.cmp(&b.hex))
    });

    sorted
        .into_iter()
        .take(max_rows)
        .map(|(a, polar)| TableRow::new(a, polar, is_military(&a.hex, mil_prefixes)))
        .collect()
}
