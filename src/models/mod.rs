mod journey;
mod scene;
mod selection;
mod settings;
mod station;
mod viewport;

pub use journey::{Annotation, ComputeJourneysBody, JourneyInfo, JourneyRequest, JourneyResult, LinkInfo, LinkKind};
pub use scene::{BackgroundPath, Connector, DurationLabel, Scene, StationLabel, StationMarker, VisualClass};
pub use selection::{FetchTicket, SelectionMachine, SelectionState, StaleResponsePolicy};
pub use settings::MapSettings;
pub use station::{GeoPoint, GridReference, Station};
pub use viewport::{PanZoom, ViewportController, ViewportTransform};
