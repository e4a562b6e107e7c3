use crate::models::{GridReference, MapSettings, Station};
use serde::Deserialize;
use serde_json::Value;

const LOOKUP_PATH: &str = "lookup";
const STATION_PATH: &str = "station";

/// Station descriptor as returned by the lookup service
///
/// Accepts both the camel-case descriptor form and the service's native
/// field names (`crs`, `gref_east`, `gref_north`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationInfo {
    #[serde(alias = "crs")]
    pub code: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "gridEastRef", alias = "gref_east")]
    pub grid_east_ref: f64,
    #[serde(rename = "gridNorthRef", alias = "gref_north")]
    pub grid_north_ref: f64,
}

impl TryFrom<StationInfo> for Station {
    type Error = String;

    fn try_from(info: StationInfo) -> Result<Self, Self::Error> {
        Station::new(info.code, info.names, GridReference::new(info.grid_east_ref, info.grid_north_ref))
    }
}

/// Turn raw descriptors into stations, skipping any that are malformed
#[must_use]
pub fn stations_from_descriptors(raw: Vec<Value>) -> Vec<Station> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let parsed = serde_json::from_value::<StationInfo>(entry)
                .map_err(|e| e.to_string())
                .and_then(Station::try_from);
            match parsed {
                Ok(station) => Some(station),
                Err(e) => {
                    leptos::logging::warn!("Skipping station descriptor #{index}: {e}");
                    None
                }
            }
        })
        .collect()
}

fn encode_segment(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

/// Search stations by name or code
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not a success
/// - The response body is not a JSON array
pub async fn lookup_stations(settings: &MapSettings, query: &str) -> Result<Vec<Station>, String> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let url = settings.endpoint(&format!("{LOOKUP_PATH}/{}", encode_segment(query)));
    let response = reqwest::get(&url)
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Lookup service returned {status}"));
    }

    let raw = response
        .json::<Vec<Value>>()
        .await
        .map_err(|e| format!("Failed to deserialize: {e}"))?;

    Ok(stations_from_descriptors(raw))
}

/// Fetch a single station by its code; unknown codes yield `Ok(None)`
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is neither a success nor 404
/// - The response body is not a valid station descriptor
pub async fn fetch_station(settings: &MapSettings, code: &str) -> Result<Option<Station>, String> {
    let url = settings.endpoint(&format!("{STATION_PATH}/{}", encode_segment(code.trim())));
    let response = reqwest::get(&url)
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(format!("Station service returned {status}"));
    }

    let info = response
        .json::<StationInfo>()
        .await
        .map_err(|e| format!("Failed to deserialize: {e}"))?;

    Station::try_from(info).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_form() {
        let raw = vec![json!({
            "code": "CBG",
            "names": ["Cambridge"],
            "gridEastRef": 5427,
            "gridNorthRef": 2589
        })];
        let stations = stations_from_descriptors(raw);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].code(), "CBG");
        assert_eq!(stations[0].name(), "Cambridge");
        assert_eq!(stations[0].grid(), GridReference::new(5427.0, 2589.0));
    }

    #[test]
    fn test_service_native_form() {
        let raw = vec![json!({
            "crs": "KGX",
            "tiplocs": ["KNGX"],
            "names": ["LONDON KINGS CROSS"],
            "min_change_time": 15,
            "gref_east": 5303,
            "gref_north": 1830
        })];
        let stations = stations_from_descriptors(raw);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].code(), "KGX");
        assert_eq!(stations[0].grid(), GridReference::new(5303.0, 1830.0));
    }

    #[test]
    fn test_invalid_descriptors_skipped() {
        let raw = vec![
            json!({ "code": "", "names": ["Blank"], "gridEastRef": 1, "gridNorthRef": 1 }),
            json!({ "code": "NON", "names": [], "gridEastRef": 1, "gridNorthRef": 1 }),
            json!({ "code": "MIS", "names": ["Missing grid"] }),
            json!(42),
            json!({ "code": "ELY", "names": ["Ely"], "gridEastRef": 5543, "gridNorthRef": 2797 }),
        ];
        let stations = stations_from_descriptors(raw);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].code(), "ELY");
    }
}
