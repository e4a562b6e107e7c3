use chrono::NaiveTime;

/// Default departure time-of-day sent with journey requests (08:00)
///
/// A placeholder, not derived from any clock.
pub const DEFAULT_DEPARTURE_TIME: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(time) => time,
    None => panic!("Invalid default departure time"),
};

/// Default transfer contingency, in minutes
pub const DEFAULT_CONTINGENCY_MINUTES: i64 = 15;

/// Default flexible departure window, in hours
pub const DEFAULT_FLEXI_DEPART_HOURS: i64 = 2;

/// Default base URL of the journey computation service
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Stored grid references are in hectometres; the converter expects metres
pub const GRID_REFERENCE_SCALE: f64 = 100.0;

/// Base marker diameter and label font size for the selected station
pub const SELECTED_BASE_SIZE: f64 = 16.0;

/// Base marker diameter and label font size for every other station
pub const DESELECTED_BASE_SIZE: f64 = 12.0;

/// Base stroke width of connector lines
pub const CONNECTOR_BASE_WIDTH: f64 = 5.0;

/// Base font size of duration labels
pub const DURATION_LABEL_BASE_SIZE: f64 = 16.0;

pub const DEFAULT_MIN_ZOOM: f64 = 0.5;
pub const DEFAULT_MAX_ZOOM: f64 = 64.0;

/// Padding around the background geometry when fitting the projection
pub const PROJECTION_PADDING: f64 = 20.0;
