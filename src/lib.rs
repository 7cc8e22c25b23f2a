//! Library part of the `adsb-scope` utility.
//!
//! The crate turns a tar1090-style `aircraft.json` feed into radar frames:
//! raw telemetry is filtered to the configured radius, projected into polar
//! display space around a fixed center, classified (military hex prefixes,
//! blink phase) and ranked for a nearest-first data table.  The drawing
//! backend is behind the `RenderSink` trait; `ConsoleSink` is the built-in
//! text rendition.
//!
//! Pipeline, once per render tick:
//!
//! 1. `filter::in_range` drops entries without a fix or beyond the radius
//! 2. `geo::project` / `ScopeGeometry::place` position the survivors
//! 3. `classify` attaches military/blink styling
//! 4. `rank::rank` orders the table
//! 5. `FrameBuilder::build` assembles the `RadarFrame` for the sink
//!

use clap::{crate_name, crate_version};

pub use cli::*;
pub use config::*;
pub use error::*;
pub use feed::*;
pub use fetch::*;
pub use frame::*;
pub use geo::*;
pub use rank::*;
pub use sink::*;

mod cli;
mod config;
mod error;
mod feed;
mod fetch;
mod frame;
mod geo;
mod rank;
mod sink;

pub mod classify;
pub mod filter;

pub use classify::{blink_visible, is_military};
pub use filter::in_range;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
