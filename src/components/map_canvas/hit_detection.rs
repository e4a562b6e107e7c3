use crate::geometry::distance;
use crate::models::Scene;

/// Extra screen-space tolerance around markers and labels
const CLICK_SLOP: f64 = 4.0;

/// Station whose marker or label is under the world point `(x, y)`
///
/// Labels are painted above markers and later stations above earlier ones,
/// so they are searched in that order. `k` is the current zoom scale, used to
/// keep the tolerance constant on screen.
#[must_use]
pub fn find_station_at_position(scene: &Scene, x: f64, y: f64, k: f64) -> Option<&str> {
    let slop = if k > 0.0 { CLICK_SLOP / k } else { CLICK_SLOP };

    let on_label = scene.labels.iter().rev().find(|label| {
        let bounds = label.bounds();
        x >= bounds.min_x - slop && x <= bounds.max_x + slop && y >= bounds.min_y - slop && y <= bounds.max_y + slop
    });
    if let Some(label) = on_label {
        return Some(label.code.as_str());
    }

    scene
        .markers
        .iter()
        .rev()
        .find(|marker| distance(marker.position, (x, y)) <= marker.radius() + slop)
        .map(|marker| marker.code.as_str())
}
