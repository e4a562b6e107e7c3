use crate::geodesy::GeodeticConverter;
use serde::{Deserialize, Serialize};

/// National grid (easting, northing) pair as stored by the lookup service
///
/// Values are in the service's units (hectometres); scaling to metres happens
/// at conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridReference {
    pub easting: f64,
    pub northing: f64,
}

impl GridReference {
    #[must_use]
    pub const fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}

/// Geographic position in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// A plottable station
///
/// Immutable once built; `code` is the entity key and is never empty, and
/// `names` always holds at least one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    code: String,
    names: Vec<String>,
    grid: GridReference,
}

impl Station {
    /// Build a station, validating its invariants
    ///
    /// # Errors
    ///
    /// Returns an error if `code` is empty or `names` has no entries.
    pub fn new(code: impl Into<String>, names: Vec<String>, grid: GridReference) -> Result<Self, String> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err("Station code must not be empty".to_string());
        }
        if names.is_empty() {
            return Err(format!("Station {code} has no names"));
        }
        Ok(Self { code, names, grid })
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Canonical display name (the first name)
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or(self.code.as_str(), String::as_str)
    }

    #[must_use]
    pub fn grid(&self) -> GridReference {
        self.grid
    }

    /// Geographic position, derived on demand; never cached
    #[must_use]
    pub fn geo_position(&self, converter: &dyn GeodeticConverter) -> Option<GeoPoint> {
        converter.to_geographic(self.grid)
    }
}
