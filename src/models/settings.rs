use super::StaleResponsePolicy;
use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_CONTINGENCY_MINUTES, DEFAULT_DEPARTURE_TIME, DEFAULT_FLEXI_DEPART_HOURS,
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Map and journey-query settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Base URL of the journey computation service, without trailing slash
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_departure")]
    pub departure: NaiveTime,
    #[serde(default = "default_contingency", with = "duration_serde")]
    pub contingency: Duration,
    #[serde(default = "default_flexi_depart", with = "duration_serde")]
    pub flexi_depart: Duration,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    #[serde(default)]
    pub stale_responses: StaleResponsePolicy,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_departure() -> NaiveTime {
    DEFAULT_DEPARTURE_TIME
}

fn default_contingency() -> Duration {
    Duration::minutes(DEFAULT_CONTINGENCY_MINUTES)
}

fn default_flexi_depart() -> Duration {
    Duration::hours(DEFAULT_FLEXI_DEPART_HOURS)
}

fn default_min_zoom() -> f64 {
    DEFAULT_MIN_ZOOM
}

fn default_max_zoom() -> f64 {
    DEFAULT_MAX_ZOOM
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            departure: default_departure(),
            contingency: default_contingency(),
            flexi_depart: default_flexi_depart(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

impl MapSettings {
    /// Join a path onto the service base URL
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

mod duration_serde {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = i64::deserialize(deserializer)?;
        Ok(Duration::seconds(seconds))
    }
}
