pub mod journeys;
pub mod stations;

pub use journeys::fetch_journey_times;
pub use stations::{fetch_station, lookup_stations, stations_from_descriptors, StationInfo};
