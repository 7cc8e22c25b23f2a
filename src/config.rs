//! Scope configuration, loaded from an HCL file.
//!
//! The file carries a `version` field checked on load.  Without `-c` we fall
//! back to the embedded defaults, which mirror a stock tar1090 install with
//! the scope centered on (0, 0).
//!

use std::fs;
use std::path::PathBuf;

use eyre::Result;
use serde::Deserialize;
use tracing::trace;

use crate::{GeoPoint, ScopeGeometry, Status};

/// Current version
pub const CVERSION: usize = 1;

/// All the knobs for the scope.
///
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Version number for safety
    pub version: usize,
    /// Feed endpoint, a tar1090 `aircraft.json` URL
    pub url: String,
    /// Seconds between two fetches
    pub fetch_interval: u64,
    /// Name shown in the header
    pub area_name: String,
    /// Scope center
    pub latitude: f64,
    /// Scope center
    pub longitude: f64,
    /// Scope radius in nautical miles
    pub radius_nm: f64,
    /// Hex prefixes classified as military, case-insensitive
    pub mil_prefixes: Vec<String>,
    /// Blink military blips?
    pub blink_military: bool,
    /// Full blink period in milliseconds
    pub blink_period_ms: u64,
    /// Screen size, used to derive the scope pixel geometry
    pub screen_width: u32,
    /// Screen size, used to derive the scope pixel geometry
    pub screen_height: u32,
    /// Table truncation
    pub max_table_rows: usize,
    /// Render ticks per second
    pub fps: u32,
}

impl Config {
    /// Load the config from the given file, or the embedded defaults.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<PathBuf>) -> Result<Self> {
        trace!("loading config");

        let data = match fname {
            Some(fname) => fs::read_to_string(&fname)
                .map_err(|_| Status::MissingConfig(fname.display().to_string()))?,
            None => include_str!("scope.hcl").to_owned(),
        };

        let cfg: Config = hcl::from_str(&data)?;
        if cfg.version != CVERSION {
            return Err(Status::BadFileVersion(cfg.version).into());
        }
        Ok(cfg)
    }

    /// Scope center as a point.
    ///
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Pixel geometry derived from the configured screen size.
    ///
    pub fn geometry(&self) -> ScopeGeometry {
        ScopeGeometry::from_screen(self.screen_width, self.screen_height)
    }

    /// Duration of one render tick.
    ///
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

impl Default for Config {
    fn default() -> Self {
        // the embedded file is the single source of defaults
        Self::load(None).unwrap()
    }
}
