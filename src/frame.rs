//! Per-tick frame assembly.
//!
//! `FrameBuilder` runs the whole pipeline over the latest batch: filter to
//! the scope radius, project onto the screen, classify, rank for the table.
//! It is a pure function of (batch, elapsed time), the render loop owns all
//! clocks and channels.
//!

use tracing::trace;

use crate::{
    blink_visible, in_range, is_military, rank, Config, FeedStatus, GeoPoint, RawAircraft,
    ScopeGeometry, TableRow,
};

/// One positioned, styled aircraft marker.
///
/// `is_visible = false` means "not drawn this tick" (blink phase), which is
/// different from not being in the frame at all (filtered out).
///
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenBlip {
    pub hex: String,
    /// Absolute pixel position on the scope
    pub x: f64,
    pub y: f64,
    pub callsign: String,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub track: Option<f64>,
    pub distance_nm: f64,
    pub is_military: bool,
    pub is_visible: bool,
}

/// Everything a sink needs to render one tick.
///
#[derive(Clone, Debug, Default)]
pub struct RadarFrame {
    /// All in-range aircraft, positioned and styled
    pub blips: Vec<ScreenBlip>,
    /// Nearest-first table, truncated
    pub rows: Vec<TableRow>,
    /// In-range contact count
    pub contacts: usize,
    /// How many of those are military
    pub military: usize,
    /// Feed state for the status block, derived by the caller from the
    /// snapshot state and the in-range contact count
    pub status: FeedStatus,
    /// Seconds until the next fetch
    pub next_update_s: u64,
}

/// Builds frames from raw batches for a fixed configuration.
///
#[derive(Clone, Debug)]
pub struct FrameBuilder {
    center: GeoPoint,
    radius_nm: f64,
    geometry: ScopeGeometry,
    mil_prefixes: Vec<String>,
    blink_military: bool,
    blink_period_ms: u64,
    max_table_rows: usize,
}

impl FrameBuilder {
    pub fn new(cfg: &Config) -> Self {
        FrameBuilder {
            center: cfg.center(),
            radius_nm: cfg.radius_nm,
            geometry: cfg.geometry(),
            mil_prefixes: cfg.mil_prefixes.clone(),
            blink_military: cfg.blink_military,
            blink_period_ms: cfg.blink_period_ms,
            max_table_rows: cfg.max_table_rows,
        }
    }

    /// Assemble one frame.
    ///
    /// The table is never blink-suppressed, only blips carry the visibility
    /// flag.  `status` comes back as the default; the render loop fills it
    /// in once it knows the contact count (see `Snapshot::status`).
    ///
    #[tracing::instrument(skip(self, batch))]
    pub fn build(&self, batch: &[RawAircraft], elapsed_ms: u64, next_update_s: u64) -> RadarFrame {
        let kept = in_range(batch, self.center, self.radius_nm);

        let blips: Vec<ScreenBlip> = kept
            .iter()
            .map(|(a, polar)| {
                let (x, y) = self.geometry.place(*polar, self.radius_nm);
                let military = is_military(&a.hex, &self.mil_prefixes);
                ScreenBlip {
                    hex: a.hex.clone(),
                    x,
                    y,
                    callsign: a.callsign.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
                    altitude: a.altitude,
                    speed: a.speed,
                    track: a.track,
                    distance_nm: polar.distance_nm,
                    is_military: military,
                    is_visible: blink_visible(
                        military,
                        self.blink_military,
                        elapsed_ms,
                        self.blink_period_ms,
                    ),
                }
            })
            .collect();

        let rows = rank(&kept, self.max_table_rows, &self.mil_prefixes);
        let military = blips.iter().filter(|b| b.is_military).count();

        trace!("{} blips, {} rows", blips.len(), rows.len());

        RadarFrame {
            contacts: blips.len(),
            military,
            blips,
            rows,
            status: FeedStatus::default(),
            next_update_s,
        }
    }
}
