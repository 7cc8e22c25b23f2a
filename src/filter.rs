//! Batch filtering: position and range.
//!
//! An aircraft without a fresh fix or beyond the scope radius is silently
//! excluded, neither is an error.  Output order follows input order; ranking
//! for display is a separate concern (see `rank`).
//!

use std::collections::HashSet;

use tracing::trace;

use crate::{project, GeoPoint, PolarPosition, RawAircraft};

/// Keep the aircraft that belong on the scope, with their polar position.
///
/// Duplicate hex identifiers within one batch are collapsed, first
/// occurrence wins, so one frame never shows the same aircraft twice.
///
#[tracing::instrument(skip(batch))]
pub fn in_range(
    batch: &[RawAircraft],
    center: GeoPoint,
    radius_nm: f64,
) -> Vec<(RawAircraft, PolarPosition)> {
    let mut seen = HashSet::new();

    let kept: Vec<_> = batch
        .iter()
        .filter_map(|a| {
            let pos = a.position()?;
            let polar = project(center, pos);
            if polar.distance_nm > radius_nm || !seen.insert(a.hex.clone()) {
                return None;
            }
            Some((a.clone(), polar))
        })
        .collect();

    trace!("{} of {} aircraft in range", kept.len(), batch.len());
    kept
}
