//! National grid to geographic coordinate conversion.
//!
//! Stations arrive with Ordnance Survey National Grid references. The map
//! needs WGS84 longitude/latitude, so conversion goes grid -> OSGB36
//! lat/lon (inverse transverse Mercator on the Airy 1830 ellipsoid) ->
//! geocentric cartesian -> Helmert shift -> WGS84 lat/lon.

use crate::constants::GRID_REFERENCE_SCALE;
use crate::models::{GeoPoint, GridReference};
use std::f64::consts::PI;

/// Converts a stored grid reference into a geographic position.
///
/// Implementations must be pure: the same input always yields the same
/// output, so callers are free to recompute instead of caching.
pub trait GeodeticConverter {
    /// Returns `None` when the reference lies outside the converter's domain.
    fn to_geographic(&self, grid: GridReference) -> Option<GeoPoint>;
}

// Airy 1830
const AIRY_A: f64 = 6_377_563.396;
const AIRY_B: f64 = 6_356_256.909;

// GRS80 / WGS84
const WGS84_A: f64 = 6_378_137.000;
const WGS84_B: f64 = 6_356_752.3141;

// National Grid true and false origins
const F0: f64 = 0.999_601_271_7;
const LAT0_DEG: f64 = 49.0;
const LON0_DEG: f64 = -2.0;
const N0: f64 = -100_000.0;
const E0: f64 = 400_000.0;

const MAX_EASTING: f64 = 700_000.0;
const MAX_NORTHING: f64 = 1_300_000.0;

// OSGB36 -> WGS84 Helmert parameters
const TX: f64 = 446.448;
const TY: f64 = -125.157;
const TZ: f64 = 542.060;
const SCALE_PPM: f64 = -20.4894;
const RX_SEC: f64 = 0.1502;
const RY_SEC: f64 = 0.2470;
const RZ_SEC: f64 = 0.8421;

const MERIDIAN_TOLERANCE: f64 = 0.000_01;
const LATITUDE_TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 64;

/// Ordnance Survey National Grid converter.
///
/// Expects references in the lookup service's stored units, which are
/// scaled by [`GRID_REFERENCE_SCALE`] to metres before conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsGridConverter;

impl GeodeticConverter for OsGridConverter {
    fn to_geographic(&self, grid: GridReference) -> Option<GeoPoint> {
        let easting = grid.easting * GRID_REFERENCE_SCALE;
        let northing = grid.northing * GRID_REFERENCE_SCALE;
        grid_to_wgs84(easting, northing)
    }
}

/// Convert a National Grid reference in metres to WGS84 degrees.
#[must_use]
pub fn grid_to_wgs84(easting: f64, northing: f64) -> Option<GeoPoint> {
    if !easting.is_finite() || !northing.is_finite() {
        return None;
    }
    if !(0.0..=MAX_EASTING).contains(&easting) || !(0.0..=MAX_NORTHING).contains(&northing) {
        return None;
    }

    let (lat, lon) = grid_to_osgb36(easting, northing)?;
    let cartesian = geodetic_to_cartesian(lat, lon, AIRY_A, AIRY_B);
    let shifted = helmert_osgb36_to_wgs84(cartesian);
    let (lat, lon) = cartesian_to_geodetic(shifted, WGS84_A, WGS84_B)?;

    Some(GeoPoint {
        lon: lon.to_degrees(),
        lat: lat.to_degrees(),
    })
}

fn meridional_arc(lat: f64, lat0: f64) -> f64 {
    let n = (AIRY_A - AIRY_B) / (AIRY_A + AIRY_B);
    let n2 = n * n;
    let n3 = n2 * n;
    let d = lat - lat0;
    let s = lat + lat0;

    let ma = (1.0 + n + 1.25 * n2 + 1.25 * n3) * d;
    let mb = (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * d.sin() * s.cos();
    let mc = (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * d).sin() * (2.0 * s).cos();
    let md = 35.0 / 24.0 * n3 * (3.0 * d).sin() * (3.0 * s).cos();

    AIRY_B * F0 * (ma - mb + mc - md)
}

/// Inverse transverse Mercator, returning OSGB36 (lat, lon) in radians.
fn grid_to_osgb36(easting: f64, northing: f64) -> Option<(f64, f64)> {
    let lat0 = LAT0_DEG * PI / 180.0;
    let lon0 = LON0_DEG * PI / 180.0;
    let e2 = 1.0 - (AIRY_B * AIRY_B) / (AIRY_A * AIRY_A);

    let mut lat = lat0;
    let mut m = 0.0;
    let mut iterations = 0;
    loop {
        lat += (northing - N0 - m) / (AIRY_A * F0);
        m = meridional_arc(lat, lat0);
        iterations += 1;
        if (northing - N0 - m).abs() < MERIDIAN_TOLERANCE {
            break;
        }
        if iterations >= MAX_ITERATIONS {
            return None;
        }
    }

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let denom = 1.0 - e2 * sin_lat * sin_lat;
    let nu = AIRY_A * F0 / denom.sqrt();
    let rho = AIRY_A * F0 * (1.0 - e2) / denom.powf(1.5);
    let eta2 = nu / rho - 1.0;

    let tan_lat = lat.tan();
    let tan2 = tan_lat * tan_lat;
    let tan4 = tan2 * tan2;
    let tan6 = tan4 * tan2;
    let sec_lat = 1.0 / cos_lat;
    let nu3 = nu.powi(3);
    let nu5 = nu.powi(5);
    let nu7 = nu.powi(7);

    let vii = tan_lat / (2.0 * rho * nu);
    let viii = tan_lat / (24.0 * rho * nu3) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
    let ix = tan_lat / (720.0 * rho * nu5) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
    let x = sec_lat / nu;
    let xi = sec_lat / (6.0 * nu3) * (nu / rho + 2.0 * tan2);
    let xii = sec_lat / (120.0 * nu5) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
    let xiia = sec_lat / (5040.0 * nu7) * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

    let de = easting - E0;
    let de2 = de * de;
    let de3 = de2 * de;
    let de4 = de3 * de;
    let de5 = de4 * de;
    let de6 = de5 * de;
    let de7 = de6 * de;

    let lat = lat - vii * de2 + viii * de4 - ix * de6;
    let lon = lon0 + x * de - xi * de3 + xii * de5 - xiia * de7;

    (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
}

fn geodetic_to_cartesian(lat: f64, lon: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let e2 = 1.0 - (b * b) / (a * a);
    let sin_lat = lat.sin();
    let nu = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    (
        nu * lat.cos() * lon.cos(),
        nu * lat.cos() * lon.sin(),
        (1.0 - e2) * nu * sin_lat,
    )
}

fn helmert_osgb36_to_wgs84((x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
    let s = SCALE_PPM * 1e-6;
    let rx = (RX_SEC / 3600.0).to_radians();
    let ry = (RY_SEC / 3600.0).to_radians();
    let rz = (RZ_SEC / 3600.0).to_radians();

    (
        TX + (1.0 + s) * x - rz * y + ry * z,
        TY + rz * x + (1.0 + s) * y - rx * z,
        TZ - ry * x + rx * y + (1.0 + s) * z,
    )
}

fn cartesian_to_geodetic((x, y, z): (f64, f64, f64), a: f64, b: f64) -> Option<(f64, f64)> {
    let e2 = 1.0 - (b * b) / (a * a);
    let p = (x * x + y * y).sqrt();

    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..MAX_ITERATIONS {
        let sin_lat = lat.sin();
        let nu = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * nu * sin_lat).atan2(p);
        if (next - lat).abs() < LATITUDE_TOLERANCE {
            lat = next;
            let lon = y.atan2(x);
            return Some((lat, lon));
        }
        lat = next;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected} +/- {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_inverse_projection_matches_os_worked_example() {
        // OS guide worked example: TG 51409 13177
        let (lat, lon) = grid_to_osgb36(651_409.903, 313_177.270).expect("converts");
        assert_close(lat.to_degrees(), 52.657_570, 1e-5);
        assert_close(lon.to_degrees(), 1.717_921, 1e-5);
    }

    #[test]
    fn test_wgs84_shift_is_small() {
        let point = grid_to_wgs84(651_409.903, 313_177.270).expect("converts");
        assert_close(point.lat, 52.658, 0.002);
        assert_close(point.lon, 1.716, 0.002);
    }

    #[test]
    fn test_scaled_station_reference() {
        // Cambridge, stored as hectometres
        let point = OsGridConverter
            .to_geographic(GridReference::new(5427.0, 2589.0))
            .expect("converts");
        assert_close(point.lat, 52.21, 0.02);
        assert_close(point.lon, 0.09, 0.03);
    }

    #[test]
    fn test_true_origin_maps_to_projection_origin() {
        let (lat, lon) = grid_to_osgb36(E0, N0).expect("converts");
        assert_close(lat.to_degrees(), 49.0, 1e-6);
        assert_close(lon.to_degrees(), -2.0, 1e-6);
    }

    #[test]
    fn test_out_of_range_is_none() {
        assert!(grid_to_wgs84(-1.0, 100_000.0).is_none());
        assert!(grid_to_wgs84(100_000.0, 1_400_000.0).is_none());
        assert!(grid_to_wgs84(f64::NAN, 100_000.0).is_none());
        assert!(OsGridConverter.to_geographic(GridReference::new(9000.0, 100.0)).is_none());
    }
}
