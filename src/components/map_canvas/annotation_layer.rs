use crate::constants::{CONNECTOR_BASE_WIDTH, DURATION_LABEL_BASE_SIZE};
use crate::models::{Connector, DurationLabel, JourneyResult, Scene, SelectionState, Station, ViewportController};
use crate::time::format_duration;

/// Redraw connectors and duration labels for the current selection
///
/// Expects the station layer to be up to date: connectors run between
/// existing markers, so stations without a marker get neither connector nor
/// label.
pub fn render(stations: &[Station], selection: &SelectionState, viewport: &ViewportController, scene: &mut Scene) {
    scene.clear_annotations();

    let SelectionState::Selected { station, annotations } = selection else {
        return;
    };

    draw_connectors(scene, station.code(), stations);
    draw_duration_labels(scene, annotations);
    viewport.rescale(scene);
}

fn draw_connectors(scene: &mut Scene, origin: &str, stations: &[Station]) {
    let Some(start) = scene.marker(origin).map(|m| m.position) else {
        return;
    };

    let connectors: Vec<Connector> = stations
        .iter()
        .filter(|s| s.code() != origin)
        .filter_map(|s| {
            let end = scene.marker(s.code())?.position;
            Some(Connector {
                from: origin.to_string(),
                to: s.code().to_string(),
                start,
                end,
                width: CONNECTOR_BASE_WIDTH,
            })
        })
        .collect();

    scene.connectors = connectors;
}

fn draw_duration_labels(scene: &mut Scene, annotations: &JourneyResult) {
    let labels: Vec<DurationLabel> = annotations
        .iter()
        .filter_map(|(destination, annotation)| {
            let connector = scene.connector_to(destination)?;
            Some(DurationLabel {
                destination: destination.to_string(),
                text: format_duration(annotation.minutes),
                position: connector.midpoint(),
                font_size: DURATION_LABEL_BASE_SIZE,
            })
        })
        .collect();

    scene.duration_labels = labels;
}
