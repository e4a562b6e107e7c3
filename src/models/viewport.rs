use super::Scene;

/// Translation and uniform scale applied to the whole map group
///
/// `k` is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, k: 1.0 }
    }
}

impl ViewportTransform {
    #[must_use]
    pub fn screen_to_world(&self, (sx, sy): (f64, f64)) -> (f64, f64) {
        ((sx - self.x) / self.k, (sy - self.y) / self.k)
    }

    #[must_use]
    pub fn world_to_screen(&self, (wx, wy): (f64, f64)) -> (f64, f64) {
        (wx * self.k + self.x, wy * self.k + self.y)
    }
}

/// A single pan or zoom input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanZoom {
    /// Move the map by a screen-space offset
    Pan { dx: f64, dy: f64 },
    /// Multiply the scale by `factor`, keeping the screen point `pivot` fixed
    Zoom { factor: f64, pivot: (f64, f64) },
}

/// Owns the viewport transform and keeps scale-dependent sizes in step
#[derive(Debug, Clone)]
pub struct ViewportController {
    transform: ViewportTransform,
    min_zoom: f64,
    max_zoom: f64,
}

impl ViewportController {
    #[must_use]
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        let min_zoom = if min_zoom > 0.0 { min_zoom } else { f64::MIN_POSITIVE };
        Self {
            transform: ViewportTransform::default(),
            min_zoom,
            max_zoom: max_zoom.max(min_zoom),
        }
    }

    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.transform.k
    }

    /// Apply a pan/zoom input and rescale `scene`
    ///
    /// Returns whether the transform changed.
    pub fn on_pan_zoom(&mut self, delta: PanZoom, scene: &mut Scene) -> bool {
        let before = self.transform;

        match delta {
            PanZoom::Pan { dx, dy } => {
                if dx.is_finite() && dy.is_finite() {
                    self.transform.x += dx;
                    self.transform.y += dy;
                }
            }
            PanZoom::Zoom { factor, pivot } => {
                if factor.is_finite() && factor > 0.0 && pivot.0.is_finite() && pivot.1.is_finite() {
                    let old_k = self.transform.k;
                    let new_k = (old_k * factor).clamp(self.min_zoom, self.max_zoom);
                    let ratio = new_k / old_k;
                    self.transform.x = pivot.0 - (pivot.0 - self.transform.x) * ratio;
                    self.transform.y = pivot.1 - (pivot.1 - self.transform.y) * ratio;
                    self.transform.k = new_k;
                }
            }
        }

        let changed = before != self.transform;
        if changed {
            self.rescale(scene);
        }
        changed
    }

    /// Resize every scale-dependent primitive to `base / k`
    pub fn rescale(&self, scene: &mut Scene) {
        scene.rescale(self.transform.k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_translates() {
        let mut controller = ViewportController::new(0.5, 64.0);
        let mut scene = Scene::default();
        assert!(controller.on_pan_zoom(PanZoom::Pan { dx: 10.0, dy: -5.0 }, &mut scene));
        assert_eq!(controller.transform(), ViewportTransform { x: 10.0, y: -5.0, k: 1.0 });
    }

    #[test]
    fn test_zoom_keeps_pivot_fixed() {
        let mut controller = ViewportController::new(0.5, 64.0);
        let mut scene = Scene::default();
        controller.on_pan_zoom(PanZoom::Pan { dx: 30.0, dy: 40.0 }, &mut scene);

        let pivot = (200.0, 100.0);
        let world_before = controller.transform().screen_to_world(pivot);
        controller.on_pan_zoom(PanZoom::Zoom { factor: 2.0, pivot }, &mut scene);
        let world_after = controller.transform().screen_to_world(pivot);

        assert_eq!(controller.current_scale(), 2.0);
        assert!((world_before.0 - world_after.0).abs() < 1e-9);
        assert!((world_before.1 - world_after.1).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut controller = ViewportController::new(0.5, 4.0);
        let mut scene = Scene::default();
        controller.on_pan_zoom(PanZoom::Zoom { factor: 100.0, pivot: (0.0, 0.0) }, &mut scene);
        assert_eq!(controller.current_scale(), 4.0);
        controller.on_pan_zoom(PanZoom::Zoom { factor: 0.0001, pivot: (0.0, 0.0) }, &mut scene);
        assert_eq!(controller.current_scale(), 0.5);
    }

    #[test]
    fn test_invalid_input_ignored() {
        let mut controller = ViewportController::new(0.5, 4.0);
        let mut scene = Scene::default();
        assert!(!controller.on_pan_zoom(PanZoom::Zoom { factor: 0.0, pivot: (0.0, 0.0) }, &mut scene));
        assert!(!controller.on_pan_zoom(PanZoom::Zoom { factor: -2.0, pivot: (0.0, 0.0) }, &mut scene));
        assert!(!controller.on_pan_zoom(PanZoom::Pan { dx: f64::NAN, dy: 0.0 }, &mut scene));
        assert!(controller.current_scale() > 0.0);
    }

    #[test]
    fn test_screen_world_round_trip() {
        let transform = ViewportTransform { x: 12.0, y: -7.0, k: 3.0 };
        let world = transform.screen_to_world((99.0, 45.0));
        let screen = transform.world_to_screen(world);
        assert!((screen.0 - 99.0).abs() < 1e-9);
        assert!((screen.1 - 45.0).abs() < 1e-9);
    }
}
