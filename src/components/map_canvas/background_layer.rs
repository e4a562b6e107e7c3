use crate::models::{BackgroundPath, GeoPoint};
use crate::projection::Projection;
use serde_json::Value;

/// Coarse coastline drawn behind the stations
pub const GREAT_BRITAIN_GEOJSON: &str = include_str!("../../../assets/great_britain.geojson");

/// One ring or line of background geometry, in geographic coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRing {
    pub points: Vec<GeoPoint>,
    pub closed: bool,
}

/// Parse the bundled background geometry
///
/// # Errors
///
/// Returns an error if the bundled asset is not valid JSON.
pub fn bundled() -> Result<Vec<GeoRing>, String> {
    parse_geojson(GREAT_BRITAIN_GEOJSON)
}

/// Parse a GeoJSON document into rings
///
/// Accepts a `FeatureCollection`, a single `Feature` or a bare geometry.
/// Features that are not polygons or lines, or whose coordinates are
/// malformed, are skipped with a warning.
///
/// # Errors
///
/// Returns an error if `text` is not valid JSON.
pub fn parse_geojson(text: &str) -> Result<Vec<GeoRing>, String> {
    let document: Value = serde_json::from_str(text).map_err(|e| format!("Failed to parse GeoJSON: {e}"))?;
    let mut rings = Vec::new();

    match document.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            let features = document.get("features").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);
            for (index, feature) in features.iter().enumerate() {
                match feature.get("geometry") {
                    Some(geometry) => collect_geometry(geometry, index, &mut rings),
                    None => leptos::logging::warn!("Skipping background feature #{index}: no geometry"),
                }
            }
        }
        Some("Feature") => {
            if let Some(geometry) = document.get("geometry") {
                collect_geometry(geometry, 0, &mut rings);
            }
        }
        _ => collect_geometry(&document, 0, &mut rings),
    }

    Ok(rings)
}

fn collect_geometry(geometry: &Value, index: usize, rings: &mut Vec<GeoRing>) {
    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or_default();
    let Some(coordinates) = geometry.get("coordinates") else {
        leptos::logging::warn!("Skipping background feature #{index}: no coordinates");
        return;
    };

    let parsed = match kind {
        "Polygon" => parse_polygon(coordinates),
        "MultiPolygon" => coordinates
            .as_array()
            .map(|polygons| polygons.iter().filter_map(parse_polygon).flatten().collect()),
        "LineString" => parse_line(coordinates, false).map(|ring| vec![ring]),
        "MultiLineString" => coordinates
            .as_array()
            .map(|lines| lines.iter().filter_map(|line| parse_line(line, false)).collect()),
        other => {
            leptos::logging::warn!("Skipping background feature #{index}: unsupported geometry {other:?}");
            return;
        }
    };

    match parsed {
        Some(parsed) => rings.extend(parsed),
        None => leptos::logging::warn!("Skipping background feature #{index}: malformed {kind} coordinates"),
    }
}

fn parse_polygon(coordinates: &Value) -> Option<Vec<GeoRing>> {
    let rings = coordinates.as_array()?;
    Some(rings.iter().filter_map(|ring| parse_line(ring, true)).collect())
}

fn parse_line(coordinates: &Value, closed: bool) -> Option<GeoRing> {
    let points = coordinates
        .as_array()?
        .iter()
        .filter_map(|position| {
            let position = position.as_array()?;
            let lon = position.first()?.as_f64()?;
            let lat = position.get(1)?.as_f64()?;
            Some(GeoPoint { lon, lat })
        })
        .collect::<Vec<_>>();

    (points.len() >= 2).then_some(GeoRing { points, closed })
}

/// Every vertex of the background, for fitting the projection
pub fn extent(rings: &[GeoRing]) -> impl Iterator<Item = GeoPoint> + '_ {
    rings.iter().flat_map(|ring| ring.points.iter().copied())
}

/// Project rings into world coordinates, dropping vertices that do not project
#[must_use]
pub fn project(rings: &[GeoRing], projection: &dyn Projection) -> Vec<BackgroundPath> {
    rings
        .iter()
        .filter_map(|ring| {
            let points: Vec<(f64, f64)> = ring.points.iter().filter_map(|p| projection.project(*p)).collect();
            (points.len() >= 2).then_some(BackgroundPath {
                points,
                closed: ring.closed,
            })
        })
        .collect()
}
