use super::background_layer::{self, GeoRing};
use super::{annotation_layer, hit_detection, station_layer};
use crate::constants::PROJECTION_PADDING;
use crate::geodesy::GeodeticConverter;
use crate::models::{
    FetchTicket, JourneyRequest, JourneyResult, MapSettings, PanZoom, Scene, SelectionMachine, SelectionState, Station,
    ViewportController, ViewportTransform,
};
use crate::projection::MercatorProjection;
use std::collections::BTreeSet;

/// A journey fetch the caller should run and hand back to
/// [`MapEngine::resolve_fetch`] together with its ticket
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub request: JourneyRequest,
}

/// Map state: stations, selection, viewport and the scene drawn from them
///
/// Every state transition ends in an explicit render of the affected layers.
pub struct MapEngine {
    settings: MapSettings,
    converter: Box<dyn GeodeticConverter>,
    projection: MercatorProjection,
    viewport: ViewportController,
    selection: SelectionMachine,
    stations: Vec<Station>,
    /// Destinations covered by the last request for the current selection
    requested: BTreeSet<String>,
    scene: Scene,
}

impl MapEngine {
    /// Build an engine for a canvas of `size`, fitting the projection to `background`
    ///
    /// The fit and the projected background are fixed for the engine's
    /// lifetime; later canvas size changes only repaint.
    #[must_use]
    pub fn new(settings: MapSettings, converter: Box<dyn GeodeticConverter>, background: Vec<GeoRing>, size: (f64, f64)) -> Self {
        let projection = MercatorProjection::fit(background_layer::extent(&background), size, PROJECTION_PADDING);
        let scene = Scene {
            background: background_layer::project(&background, &projection),
            ..Scene::default()
        };

        Self {
            viewport: ViewportController::new(settings.min_zoom, settings.max_zoom),
            selection: SelectionMachine::new(settings.stale_responses),
            settings,
            converter,
            projection,
            stations: Vec::new(),
            requested: BTreeSet::new(),
            scene,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.viewport.transform()
    }

    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.viewport.current_scale()
    }

    /// Full redraw of the station and annotation layers
    pub fn render(&mut self) {
        station_layer::render(
            &self.stations,
            self.selection.state(),
            self.converter.as_ref(),
            &self.projection,
            &self.viewport,
            &mut self.scene,
        );
        annotation_layer::render(&self.stations, self.selection.state(), &self.viewport, &mut self.scene);
    }

    /// Replace the station list
    ///
    /// A selected station that is still listed stays selected and keeps its
    /// annotations for destinations still listed; a fetch is returned when the
    /// list gained destinations the last request did not cover. A selected
    /// station that is no longer listed clears the selection.
    pub fn set_stations(&mut self, stations: Vec<Station>) -> Option<PendingFetch> {
        self.stations = stations;

        let Some(selected) = self.selection.selected().map(|s| s.code().to_string()) else {
            self.render();
            return None;
        };

        if !self.stations.iter().any(|s| s.code() == selected) {
            crate::log!("Selected station {} is no longer listed, clearing selection", selected);
            self.selection.clear();
            self.requested.clear();
            self.render();
            return None;
        }

        let listed: BTreeSet<&str> = self.stations.iter().map(Station::code).collect();
        self.selection.retain_destinations(|code| listed.contains(code));
        self.requested.retain(|code| listed.contains(code.as_str()));
        self.render();

        let uncovered = self
            .stations
            .iter()
            .any(|s| s.code() != selected && !self.requested.contains(s.code()));
        if !uncovered {
            return None;
        }

        let ticket = self.selection.reissue()?;
        self.issue(ticket)
    }

    /// Select the listed station with `code`, drawing its connectors at once
    ///
    /// Returns the fetch for its journey times, or `None` when the code is not
    /// listed or there is no other station to travel to.
    pub fn select(&mut self, code: &str) -> Option<PendingFetch> {
        let Some(station) = self.stations.iter().find(|s| s.code() == code).cloned() else {
            leptos::logging::warn!("Cannot select {code}: not in the station list");
            return None;
        };

        let ticket = self.selection.select(station);
        self.requested.clear();
        self.render();
        self.issue(ticket)
    }

    /// Select whatever station is under the screen point, if any
    pub fn click(&mut self, screen: (f64, f64)) -> Option<PendingFetch> {
        let transform = self.viewport.transform();
        let (x, y) = transform.screen_to_world(screen);
        let code = hit_detection::find_station_at_position(&self.scene, x, y, transform.k)?.to_string();
        self.select(&code)
    }

    pub fn on_pan_zoom(&mut self, delta: PanZoom) -> bool {
        self.viewport.on_pan_zoom(delta, &mut self.scene)
    }

    /// Apply the outcome of a fetch started from a [`PendingFetch`]
    ///
    /// Failures leave existing annotations untouched. Returns whether the
    /// scene changed.
    pub fn resolve_fetch(&mut self, ticket: &FetchTicket, outcome: Result<JourneyResult, String>) -> bool {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                leptos::logging::error!("Journey fetch from {} failed: {e}", ticket.origin);
                return false;
            }
        };

        if !self.selection.resolve(ticket, result) {
            return false;
        }
        annotation_layer::render(&self.stations, self.selection.state(), &self.viewport, &mut self.scene);
        true
    }

    fn issue(&mut self, ticket: FetchTicket) -> Option<PendingFetch> {
        let origin = self.selection.selected()?;
        let request = JourneyRequest::for_origin(origin, &self.stations, &self.settings)?;
        self.requested.clone_from(&request.destinations);
        Some(PendingFetch { ticket, request })
    }
}
