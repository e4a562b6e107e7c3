use crate::constants::{CONNECTOR_BASE_WIDTH, DESELECTED_BASE_SIZE, DURATION_LABEL_BASE_SIZE, SELECTED_BASE_SIZE};
use crate::geometry::{midpoint, Bounds};

/// Approximate glyph advance as a fraction of the font size
const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Gap between a marker's centre and its label, as a fraction of the font size
const LABEL_GAP_RATIO: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualClass {
    Selected,
    Deselected,
}

impl VisualClass {
    #[must_use]
    pub fn base_size(self) -> f64 {
        match self {
            Self::Selected => SELECTED_BASE_SIZE,
            Self::Deselected => DESELECTED_BASE_SIZE,
        }
    }
}

/// Static background geometry, already in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundPath {
    pub points: Vec<(f64, f64)>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    pub code: String,
    pub position: (f64, f64),
    pub class: VisualClass,
    /// Diameter in world units
    pub size: f64,
}

impl StationMarker {
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationLabel {
    pub code: String,
    pub text: String,
    /// Same point as the station's marker; the text is drawn beside it
    pub position: (f64, f64),
    pub class: VisualClass,
    pub font_size: f64,
}

impl StationLabel {
    /// Left-middle point the text is drawn from
    #[must_use]
    pub fn anchor(&self) -> (f64, f64) {
        (self.position.0 + self.font_size * LABEL_GAP_RATIO, self.position.1)
    }

    /// Estimated extent of the drawn text
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        #[allow(clippy::cast_precision_loss)]
        let width = self.text.chars().count() as f64 * self.font_size * CHAR_WIDTH_RATIO;
        let (x, y) = self.anchor();
        let half_height = self.font_size / 2.0;
        [(x, y - half_height), (x + width, y + half_height)].into_iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub from: String,
    pub to: String,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub width: f64,
}

impl Connector {
    #[must_use]
    pub fn midpoint(&self) -> (f64, f64) {
        midpoint(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationLabel {
    pub destination: String,
    pub text: String,
    pub position: (f64, f64),
    pub font_size: f64,
}

/// Everything drawn on the map, in world coordinates
///
/// The viewport transform is applied to the whole scene when painting;
/// only sizes depend on the scale, via [`Scene::rescale`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub background: Vec<BackgroundPath>,
    pub markers: Vec<StationMarker>,
    pub labels: Vec<StationLabel>,
    pub connectors: Vec<Connector>,
    pub duration_labels: Vec<DurationLabel>,
}

impl Scene {
    /// Set every scale-dependent size to `base / k`
    pub fn rescale(&mut self, k: f64) {
        if !(k.is_finite() && k > 0.0) {
            return;
        }
        for marker in &mut self.markers {
            marker.size = marker.class.base_size() / k;
        }
        for label in &mut self.labels {
            label.font_size = label.class.base_size() / k;
        }
        for connector in &mut self.connectors {
            connector.width = CONNECTOR_BASE_WIDTH / k;
        }
        for label in &mut self.duration_labels {
            label.font_size = DURATION_LABEL_BASE_SIZE / k;
        }
    }

    pub fn clear_stations(&mut self) {
        self.markers.clear();
        self.labels.clear();
    }

    pub fn clear_annotations(&mut self) {
        self.connectors.clear();
        self.duration_labels.clear();
    }

    #[must_use]
    pub fn marker(&self, code: &str) -> Option<&StationMarker> {
        self.markers.iter().find(|m| m.code == code)
    }

    #[must_use]
    pub fn label(&self, code: &str) -> Option<&StationLabel> {
        self.labels.iter().find(|l| l.code == code)
    }

    #[must_use]
    pub fn connector_to(&self, code: &str) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.to == code)
    }

    #[must_use]
    pub fn duration_label(&self, code: &str) -> Option<&DurationLabel> {
        self.duration_labels.iter().find(|l| l.destination == code)
    }
}
