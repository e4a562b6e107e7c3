use crate::geometry::distance;
use crate::models::PanZoom;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

/// A press and release closer than this, in screen pixels, is a click
pub const CLICK_THRESHOLD: f64 = 4.0;
const ZOOM_IN_FACTOR: f64 = 1.1;
const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Tracks a mouse drag over the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanTracker {
    pressed_at: Option<(f64, f64)>,
    last_mouse_pos: (f64, f64),
    dragging: bool,
}

impl PanTracker {
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn handle_pan_start(&mut self, x: f64, y: f64) {
        self.pressed_at = Some((x, y));
        self.last_mouse_pos = (x, y);
        self.dragging = false;
    }

    /// Pan by the distance moved since the last event
    ///
    /// Nothing moves until the pointer leaves the click radius, so a click
    /// is hit-tested against the transform it was aimed at.
    pub fn handle_pan_move(&mut self, x: f64, y: f64) -> Option<PanZoom> {
        let pressed_at = self.pressed_at?;
        if !self.dragging {
            if distance(pressed_at, (x, y)) < CLICK_THRESHOLD {
                return None;
            }
            self.dragging = true;
        }

        let (last_x, last_y) = self.last_mouse_pos;
        self.last_mouse_pos = (x, y);
        Some(PanZoom::Pan { dx: x - last_x, dy: y - last_y })
    }

    /// Finish the drag; returns the press point if it was a click
    pub fn handle_pan_end(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let pressed_at = self.pressed_at.take()?;
        let dragged = std::mem::take(&mut self.dragging);
        (!dragged && distance(pressed_at, (x, y)) < CLICK_THRESHOLD).then_some(pressed_at)
    }

    pub fn cancel(&mut self) {
        self.pressed_at = None;
        self.dragging = false;
    }
}

/// Zoom around `pivot` by one wheel notch
#[must_use]
pub fn wheel_zoom(delta_y: f64, pivot: (f64, f64)) -> PanZoom {
    let factor = if delta_y < 0.0 { ZOOM_IN_FACTOR } else { ZOOM_OUT_FACTOR };
    PanZoom::Zoom { factor, pivot }
}

#[must_use]
pub fn handle_zoom(ev: &WheelEvent, canvas: &HtmlCanvasElement) -> PanZoom {
    let rect = canvas.get_bounding_client_rect();
    let mouse_x = f64::from(ev.client_x()) - rect.left();
    let mouse_y = f64::from(ev.client_y()) - rect.top();
    wheel_zoom(ev.delta_y(), (mouse_x, mouse_y))
}

/// Mouse position relative to the canvas' top-left corner
#[must_use]
pub fn canvas_position(ev: &MouseEvent, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (f64::from(ev.client_x()) - rect.left(), f64::from(ev.client_y()) - rect.top())
}
