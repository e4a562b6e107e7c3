use super::{MapSettings, Station};
use crate::time::to_hhmm;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// A journey-time query for one origin against a set of destinations
///
/// `destinations` is never empty and never contains `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyRequest {
    pub departure: NaiveTime,
    pub origin: String,
    pub destinations: BTreeSet<String>,
    pub contingency: Duration,
    pub flexi_depart: Duration,
}

impl JourneyRequest {
    /// Build a request from `origin` to every other listed station
    ///
    /// Returns `None` when no other station is listed.
    #[must_use]
    pub fn for_origin(origin: &Station, stations: &[Station], settings: &MapSettings) -> Option<Self> {
        let destinations: BTreeSet<String> = stations
            .iter()
            .map(Station::code)
            .filter(|code| *code != origin.code())
            .map(str::to_string)
            .collect();

        if destinations.is_empty() {
            return None;
        }

        Some(Self {
            departure: settings.departure,
            origin: origin.code().to_string(),
            destinations,
            contingency: settings.contingency,
            flexi_depart: settings.flexi_depart,
        })
    }

    #[must_use]
    pub fn to_wire(&self) -> ComputeJourneysBody {
        ComputeJourneysBody {
            start: to_hhmm(self.departure),
            origin: self.origin.clone(),
            dests: self.destinations.iter().cloned().collect(),
            contingency: self.contingency.num_seconds(),
            flexi_depart: self.flexi_depart.num_seconds(),
        }
    }
}

/// Body of `POST /computejourneys`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeJourneysBody {
    pub start: String,
    pub origin: String,
    pub dests: Vec<String>,
    pub contingency: i64,
    pub flexi_depart: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    Rail,
    Walk,
    Tube,
    Metro,
    Bus,
    Ferry,
    Transfer,
    Dummy,
    #[serde(other)]
    Unknown,
}

impl LinkKind {
    /// Whether the hop carries the passenger somewhere, as opposed to a
    /// change of platform or a placeholder
    #[must_use]
    pub fn is_movement(self) -> bool {
        !matches!(self, Self::Transfer | Self::Dummy)
    }
}

/// One hop of a journey as sent by the service
///
/// Only `dst` is needed, and only on the final hop. The hop type feeds the
/// leg count and the departure feeds the tooltip; other fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkInfo {
    #[serde(rename = "type")]
    pub kind: Option<LinkKind>,
    pub dst: Option<String>,
    pub depart: Option<String>,
}

impl LinkInfo {
    /// Untyped hops count as movement
    #[must_use]
    pub fn is_movement(&self) -> bool {
        !self.kind.is_some_and(|kind| !kind.is_movement())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JourneyInfo {
    pub depart: Option<String>,
    /// Total journey time in seconds
    pub time: u32,
    pub links: Vec<LinkInfo>,
}

impl JourneyInfo {
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.links.last().and_then(|link| link.dst.as_deref())
    }

    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.time / 60
    }

    /// Number of travelled hops; transfers between them are not legs
    #[must_use]
    pub fn legs(&self) -> usize {
        self.links.iter().filter(|link| link.is_movement()).count()
    }

    /// Departure of the first hop that has one, falling back to the journey's
    fn first_departure(&self) -> Option<String> {
        self.links
            .iter()
            .find_map(|link| link.depart.clone())
            .or_else(|| self.depart.clone())
    }
}

/// Best-known journey to one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub minutes: u32,
    pub legs: usize,
    pub depart: Option<String>,
}

impl Annotation {
    #[must_use]
    pub fn minutes(minutes: u32) -> Self {
        Self {
            minutes,
            legs: 0,
            depart: None,
        }
    }
}

/// Destination code -> best journey; unreachable destinations are absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneyResult {
    annotations: BTreeMap<String, Annotation>,
}

impl JourneyResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a journey, keeping the shorter one if the destination is known
    pub fn insert(&mut self, destination: impl Into<String>, annotation: Annotation) {
        let destination = destination.into();
        match self.annotations.get(&destination) {
            Some(existing) if existing.minutes <= annotation.minutes => {}
            _ => {
                self.annotations.insert(destination, annotation);
            }
        }
    }

    #[must_use]
    pub fn get(&self, destination: &str) -> Option<&Annotation> {
        self.annotations.get(destination)
    }

    #[must_use]
    pub fn minutes(&self, destination: &str) -> Option<u32> {
        self.get(destination).map(|a| a.minutes)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Annotation)> {
        self.annotations.iter().map(|(code, a)| (code.as_str(), a))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.annotations.retain(|code, _| keep(code));
    }

    /// Normalize the raw service response for `request`
    ///
    /// Each entry contributes its last hop's destination and its total time in
    /// minutes. Malformed entries and destinations that were not asked for are
    /// skipped with a warning.
    #[must_use]
    pub fn from_response(raw: Vec<Value>, request: &JourneyRequest) -> Self {
        let mut result = Self::new();

        for (index, entry) in raw.into_iter().enumerate() {
            let journey = match serde_json::from_value::<JourneyInfo>(entry) {
                Ok(journey) => journey,
                Err(e) => {
                    leptos::logging::warn!("Skipping malformed journey #{index} from {}: {e}", request.origin);
                    continue;
                }
            };

            let Some(destination) = journey.destination() else {
                leptos::logging::warn!("Skipping journey #{index} from {}: final hop has no destination", request.origin);
                continue;
            };

            if !request.destinations.contains(destination) {
                leptos::logging::warn!("Ignoring journey #{index} from {} to unrequested {destination}", request.origin);
                continue;
            }

            result.insert(
                destination,
                Annotation {
                    minutes: journey.minutes(),
                    legs: journey.legs(),
                    depart: journey.first_departure(),
                },
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GridReference;
    use serde_json::json;

    fn station(code: &str) -> Station {
        Station::new(code, vec![code.to_string()], GridReference::new(5000.0, 2000.0)).expect("valid station")
    }

    fn request(origin: &str, dests: &[&str]) -> JourneyRequest {
        JourneyRequest {
            departure: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            origin: origin.to_string(),
            destinations: dests.iter().map(|d| (*d).to_string()).collect(),
            contingency: Duration::minutes(15),
            flexi_depart: Duration::hours(2),
        }
    }

    #[test]
    fn test_request_excludes_origin() {
        let stations = vec![station("CBG"), station("KGX"), station("ELY")];
        let req = JourneyRequest::for_origin(&stations[0], &stations, &MapSettings::default()).expect("has destinations");
        assert_eq!(req.origin, "CBG");
        assert!(!req.destinations.contains("CBG"));
        assert_eq!(req.destinations.len(), 2);
    }

    #[test]
    fn test_request_needs_a_destination() {
        let stations = vec![station("CBG")];
        assert!(JourneyRequest::for_origin(&stations[0], &stations, &MapSettings::default()).is_none());
    }

    #[test]
    fn test_wire_body_defaults() {
        let stations = vec![station("CBG"), station("KGX")];
        let req = JourneyRequest::for_origin(&stations[0], &stations, &MapSettings::default()).expect("has destinations");
        let body = serde_json::to_value(req.to_wire()).expect("serializes");
        assert_eq!(
            body,
            json!({
                "start": "0800",
                "origin": "CBG",
                "dests": ["KGX"],
                "contingency": 900,
                "flexi_depart": 7200,
            })
        );
    }

    #[test]
    fn test_minimal_response_normalizes() {
        let raw = vec![json!({ "links": [{ "dst": "KGX" }], "time": 3600 })];
        let result = JourneyResult::from_response(raw, &request("CBG", &["KGX"]));
        assert_eq!(result.minutes("KGX"), Some(60));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_uses_final_hop_and_total_time() {
        let raw = vec![json!({
            "origin": "CBG",
            "depart": "0805",
            "time": 5430,
            "links": [
                { "type": "Rail", "dst": "KGX", "time": 3000, "depart": "0812", "service": 17 },
                { "type": "Tube", "dst": "EUS", "time": 600 },
                { "type": "Rail", "dst": "MKC", "time": 1800, "depart": "0930", "service": 4 }
            ]
        })];
        let result = JourneyResult::from_response(raw, &request("CBG", &["MKC", "KGX"]));
        let annotation = result.get("MKC").expect("annotated");
        assert_eq!(annotation.minutes, 90);
        assert_eq!(annotation.legs, 3);
        assert_eq!(annotation.depart.as_deref(), Some("0812"));
        assert!(result.get("KGX").is_none());
    }

    #[test]
    fn test_transfers_are_not_legs() {
        let raw = vec![json!({
            "time": 4800,
            "links": [
                { "type": "Rail", "dst": "PBO", "depart": "0815" },
                { "type": "Transfer", "dst": "PBO", "time": 300 },
                { "type": "Rail", "dst": "YRK" },
                { "type": "Dummy", "dst": "YRK" }
            ]
        })];
        let result = JourneyResult::from_response(raw, &request("CBG", &["YRK"]));
        let annotation = result.get("YRK").expect("annotated");
        assert_eq!(annotation.legs, 2);
        assert_eq!(annotation.minutes, 80);
    }

    #[test]
    fn test_untyped_hop_is_a_leg() {
        let link: LinkInfo = serde_json::from_value(json!({ "dst": "KGX" })).expect("deserializes");
        assert!(link.is_movement());
        assert!(LinkKind::Walk.is_movement());
        assert!(!LinkKind::Transfer.is_movement());
        assert!(!LinkKind::Dummy.is_movement());
    }

    #[test]
    fn test_absent_destination_has_no_annotation() {
        let raw = vec![json!({ "links": [{ "dst": "A" }], "time": 2700 })];
        let result = JourneyResult::from_response(raw, &request("O", &["A", "B"]));
        assert_eq!(result.minutes("A"), Some(45));
        assert_eq!(result.minutes("B"), None);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let raw = vec![
            json!("not an object"),
            json!({ "links": [{ "dst": "A" }] }),
            json!({ "links": [], "time": 60 }),
            json!({ "links": [{ "type": "Dummy" }], "time": 60 }),
            json!({ "links": [{ "dst": "B" }], "time": 600 }),
        ];
        let result = JourneyResult::from_response(raw, &request("O", &["A", "B"]));
        assert_eq!(result.len(), 1);
        assert_eq!(result.minutes("B"), Some(10));
    }

    #[test]
    fn test_unrequested_destination_ignored() {
        let raw = vec![json!({ "links": [{ "dst": "ZZZ" }], "time": 600 })];
        let result = JourneyResult::from_response(raw, &request("O", &["A"]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_shortest_journey_wins() {
        let raw = vec![
            json!({ "links": [{ "dst": "A" }], "time": 3600 }),
            json!({ "links": [{ "dst": "A" }], "time": 1800 }),
            json!({ "links": [{ "dst": "A" }], "time": 2400 }),
        ];
        let result = JourneyResult::from_response(raw, &request("O", &["A"]));
        assert_eq!(result.minutes("A"), Some(30));
    }

    #[test]
    fn test_unknown_link_type_accepted() {
        let raw = vec![json!({ "links": [{ "type": "Hovercraft", "dst": "A" }], "time": 120 })];
        let result = JourneyResult::from_response(raw, &request("O", &["A"]));
        assert_eq!(result.minutes("A"), Some(2));
    }

    #[test]
    fn test_minutes_truncate() {
        let raw = vec![json!({ "links": [{ "dst": "A" }], "time": 119 })];
        let result = JourneyResult::from_response(raw, &request("O", &["A"]));
        assert_eq!(result.minutes("A"), Some(1));
    }
}
