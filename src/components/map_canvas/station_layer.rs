use crate::geodesy::GeodeticConverter;
use crate::models::{Scene, SelectionState, Station, StationLabel, StationMarker, ViewportController, VisualClass};
use crate::projection::Projection;

/// Replace every marker and label in `scene` with one pair per projectable
/// station, then resize them for the current zoom
///
/// Stations whose position cannot be converted or projected are skipped.
pub fn render(
    stations: &[Station],
    selection: &SelectionState,
    converter: &dyn GeodeticConverter,
    projection: &dyn Projection,
    viewport: &ViewportController,
    scene: &mut Scene,
) {
    scene.clear_stations();

    for station in stations {
        let Some(position) = station.geo_position(converter).and_then(|geo| projection.project(geo)) else {
            leptos::logging::warn!("Station {} has no map position, skipping", station.code());
            continue;
        };

        let class = if selection.is_selected(station.code()) {
            VisualClass::Selected
        } else {
            VisualClass::Deselected
        };

        scene.markers.push(StationMarker {
            code: station.code().to_string(),
            position,
            class,
            size: class.base_size(),
        });
        scene.labels.push(StationLabel {
            code: station.code().to_string(),
            text: station.name().to_string(),
            position,
            class,
            font_size: class.base_size(),
        });
    }

    viewport.rescale(scene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::OsGridConverter;
    use crate::models::{GeoPoint, GridReference, PanZoom};
    use crate::projection::MercatorProjection;

    fn stations() -> Vec<Station> {
        vec![
            Station::new("CBG", vec!["Cambridge".to_string()], GridReference::new(5427.0, 2589.0)).expect("valid"),
            Station::new("KGX", vec!["London Kings Cross".to_string()], GridReference::new(5303.0, 1830.0)).expect("valid"),
            Station::new("ELY", vec!["Ely".to_string()], GridReference::new(5543.0, 2797.0)).expect("valid"),
        ]
    }

    fn projection() -> MercatorProjection {
        let extent = [GeoPoint { lon: -6.0, lat: 50.0 }, GeoPoint { lon: 2.0, lat: 58.7 }];
        MercatorProjection::fit(extent, (800.0, 600.0), 20.0)
    }

    #[test]
    fn test_one_marker_and_label_per_station() {
        let mut scene = Scene::default();
        let viewport = ViewportController::new(0.5, 64.0);
        render(&stations(), &SelectionState::NoSelection, &OsGridConverter, &projection(), &viewport, &mut scene);

        assert_eq!(scene.markers.len(), 3);
        assert_eq!(scene.labels.len(), 3);
        for station in stations() {
            let marker = scene.marker(station.code()).expect("marker");
            let label = scene.label(station.code()).expect("label");
            assert_eq!(marker.position, label.position);
            assert_eq!(label.text, station.name());
            assert_eq!(marker.class, VisualClass::Deselected);
        }
    }

    #[test]
    fn test_selected_station_emphasized() {
        let mut scene = Scene::default();
        let viewport = ViewportController::new(0.5, 64.0);
        let selection = SelectionState::Selected {
            station: stations()[0].clone(),
            annotations: crate::models::JourneyResult::new(),
        };
        render(&stations(), &selection, &OsGridConverter, &projection(), &viewport, &mut scene);

        assert_eq!(scene.marker("CBG").map(|m| m.class), Some(VisualClass::Selected));
        assert_eq!(scene.label("CBG").map(|l| l.class), Some(VisualClass::Selected));
        assert_eq!(scene.marker("KGX").map(|m| m.class), Some(VisualClass::Deselected));
    }

    #[test]
    fn test_render_at_current_zoom() {
        let mut scene = Scene::default();
        let mut viewport = ViewportController::new(0.5, 64.0);
        viewport.on_pan_zoom(PanZoom::Zoom { factor: 4.0, pivot: (0.0, 0.0) }, &mut scene);
        render(&stations(), &SelectionState::NoSelection, &OsGridConverter, &projection(), &viewport, &mut scene);

        let marker = scene.marker("ELY").expect("marker");
        assert!((marker.size - VisualClass::Deselected.base_size() / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unprojectable_station_skipped() {
        let mut list = stations();
        list.push(Station::new("BAD", vec!["Nowhere".to_string()], GridReference::new(-1.0, f64::NAN)).expect("valid"));
        let mut scene = Scene::default();
        let viewport = ViewportController::new(0.5, 64.0);
        render(&list, &SelectionState::NoSelection, &OsGridConverter, &projection(), &viewport, &mut scene);

        assert_eq!(scene.markers.len(), 3);
        assert!(scene.marker("BAD").is_none());
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let mut scene = Scene::default();
        let viewport = ViewportController::new(0.5, 64.0);
        render(&stations(), &SelectionState::NoSelection, &OsGridConverter, &projection(), &viewport, &mut scene);
        let first = scene.clone();
        render(&stations(), &SelectionState::NoSelection, &OsGridConverter, &projection(), &viewport, &mut scene);
        assert_eq!(scene, first);
    }
}
