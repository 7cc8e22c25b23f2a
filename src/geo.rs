//! Geographic math for the scope.
//!
//! Everything in here is a pure transform: great-circle distance and bearing
//! from the configured center, then polar → screen projection.  Range
//! filtering is a separate concern (see `filter`), the projector never
//! rejects a point.
//!

/// Mean Earth radius, in nautical miles.
const EARTH_RADIUS_NM: f64 = 3440.065;

/// A plain (latitude, longitude) pair in degrees.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }
}

/// Position of a target relative to the scope center.
///
/// `bearing_deg` is a compass bearing: 0 = north, clockwise positive,
/// always normalized into [0, 360).
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPosition {
    /// Great-circle distance in nautical miles, always >= 0
    pub distance_nm: f64,
    /// Forward azimuth in degrees, [0, 360)
    pub bearing_deg: f64,
}

/// Distance and bearing from `center` to `target`.
///
/// Haversine for the distance, standard forward-azimuth formula for the
/// bearing.  Two equal points yield (0, 0) by convention, `atan2(0, 0)`
/// being 0 takes care of it.
///
pub fn project(center: GeoPoint, target: GeoPoint) -> PolarPosition {
    let lat1 = center.lat.to_radians();
    let lat2 = target.lat.to_radians();
    let dlat = (target.lat - center.lat).to_radians();
    let dlon = (target.lon - center.lon).to_radians();

    let a = (dlat / 2.).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.).sin().powi(2);
    let distance_nm = 2. * a.sqrt().asin() * EARTH_RADIUS_NM;

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let bearing_deg = (y.atan2(x).to_degrees() + 360.) % 360.;

    PolarPosition {
        distance_nm,
        bearing_deg,
    }
}

/// Project a polar position onto the scope, bearing 0 pointing up.
///
/// Returns the pixel offsets added to the scope center.  Out-of-range
/// distances simply land outside the circle.
///
pub fn to_screen(polar: PolarPosition, radius_nm: f64, radius_px: f64) -> (f64, f64) {
    let scale = radius_px / radius_nm;
    let bearing = polar.bearing_deg.to_radians();

    let px = scale * polar.distance_nm * bearing.sin();
    let py = -scale * polar.distance_nm * bearing.cos();
    (px, py)
}

/// Pixel geometry of the scope, derived from the configured screen size.
///
/// The scope occupies the left half of the screen, the data table the right
/// half, hence the asymmetric insets.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScopeGeometry {
    /// Scope center, pixels
    pub center_x: f64,
    /// Scope center, pixels
    pub center_y: f64,
    /// Scope radius, pixels
    pub radius_px: f64,
}

impl ScopeGeometry {
    pub fn from_screen(width: u32, height: u32) -> Self {
        let radius_px = height
            .saturating_sub(120)
            .min((width / 2).saturating_sub(50)) as f64
            / 2.;
        ScopeGeometry {
            center_x: width as f64 / 4.,
            center_y: height as f64 / 2. + 30.,
            radius_px,
        }
    }

    /// Absolute pixel position of a polar position on this scope.
    ///
    pub fn place(&self, polar: PolarPosition, radius_nm: f64) -> (f64, f64) {
        let (px, py) = to_screen(polar, radius_nm, self.radius_px);
        (self.center_x + px, self.center_y + py)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[inline]
    fn shorten(v: f64) -> String {
        format!("{:.3}", v)
    }

    #[test]
    fn test_project_same_point() {
        let p = GeoPoint::new(-31.9522, 115.8614);
        let polar = project(p, p);

        assert!(polar.distance_nm.abs() < 1e-9);
        assert_eq!(shorten(0.), shorten(polar.bearing_deg));
    }

    #[test]
    fn test_project_due_north() {
        // one degree of latitude is 60 NM
        let center = GeoPoint::new(0., 0.);
        let target = GeoPoint::new(1., 0.);
        let polar = project(center, target);

        assert_eq!(shorten(60.040), shorten(polar.distance_nm));
        assert_eq!(shorten(0.), shorten(polar.bearing_deg));
    }

    #[test]
    fn test_project_due_south_bearing_normalized() {
        let center = GeoPoint::new(1., 0.);
        let target = GeoPoint::new(0., 0.);
        let polar = project(center, target);

        assert_eq!(shorten(180.), shorten(polar.bearing_deg));
    }

    #[rstest]
    #[case(GeoPoint::new(0., 0.), GeoPoint::new(0., 1.))]
    #[case(GeoPoint::new(54.7, -6.2), GeoPoint::new(50.8, 4.4))]
    #[case(GeoPoint::new(-31.9522, 115.8614), GeoPoint::new(-32.1, 115.9))]
    #[case(GeoPoint::new(89., 10.), GeoPoint::new(-89., -170.))]
    fn test_bearing_in_range(#[case] center: GeoPoint, #[case] target: GeoPoint) {
        let polar = project(center, target);

        assert!(polar.distance_nm >= 0.);
        assert!((0. ..360.).contains(&polar.bearing_deg));
    }

    #[test]
    fn test_to_screen_north_is_up() {
        let polar = PolarPosition {
            distance_nm: 30.,
            bearing_deg: 0.,
        };
        let (px, py) = to_screen(polar, 60., 200.);

        assert_eq!(shorten(0.), shorten(px));
        assert_eq!(shorten(-100.), shorten(py));
    }

    #[test]
    fn test_to_screen_east_is_right() {
        let polar = PolarPosition {
            distance_nm: 60.,
            bearing_deg: 90.,
        };
        let (px, py) = to_screen(polar, 60., 200.);

        assert_eq!(shorten(200.), shorten(px));
        assert_eq!(shorten(0.), shorten(py));
    }

    #[test]
    fn test_geometry_from_screen() {
        let geom = ScopeGeometry::from_screen(960, 540);

        assert_eq!(shorten(240.), shorten(geom.center_x));
        assert_eq!(shorten(300.), shorten(geom.center_y));
        assert_eq!(shorten(210.), shorten(geom.radius_px));
    }

    #[test]
    fn test_geometry_place() {
        let geom = ScopeGeometry {
            center_x: 240.,
            center_y: 300.,
            radius_px: 200.,
        };
        let polar = PolarPosition {
            distance_nm: 30.,
            bearing_deg: 180.,
        };
        let (x, y) = geom.place(polar, 60.);

        assert_eq!(shorten(240.), shorten(x));
        assert_eq!(shorten(400.), shorten(y));
    }
}
