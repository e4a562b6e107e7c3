use crate::geometry::Bounds;
use crate::models::GeoPoint;
use std::f64::consts::FRAC_PI_4;

/// Latitude limit of the square Mercator world, in degrees
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Maps geographic positions onto the map's world (pre-viewport) plane.
pub trait Projection {
    /// Returns `None` for positions outside the projection's domain; callers
    /// skip whatever they were about to draw.
    fn project(&self, point: GeoPoint) -> Option<(f64, f64)>;
}

/// Spherical Mercator with a uniform scale and a translation, y growing
/// downwards like the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    pub scale: f64,
    pub translate: (f64, f64),
}

impl Default for MercatorProjection {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: (0.0, 0.0),
        }
    }
}

fn mercator_raw(point: GeoPoint) -> Option<(f64, f64)> {
    if !point.lon.is_finite() || !point.lat.is_finite() || point.lat.abs() > MERCATOR_MAX_LAT {
        return None;
    }
    let x = point.lon.to_radians();
    let y = (FRAC_PI_4 + point.lat.to_radians() / 2.0).tan().ln();
    Some((x, -y))
}

impl MercatorProjection {
    /// Fit the projection so `extent` (a set of geographic points) fills a
    /// `width` x `height` canvas, leaving `padding` on every side.
    ///
    /// Falls back to the identity-like default when nothing in `extent`
    /// projects or the canvas has no usable area.
    #[must_use]
    pub fn fit<I>(extent: I, (width, height): (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let raw: Bounds = extent.into_iter().filter_map(mercator_raw).collect();
        let inner_width = width - 2.0 * padding;
        let inner_height = height - 2.0 * padding;

        if raw.is_empty() || inner_width <= 0.0 || inner_height <= 0.0 {
            return Self::default();
        }

        let scale_x = if raw.width() > 0.0 { inner_width / raw.width() } else { f64::INFINITY };
        let scale_y = if raw.height() > 0.0 { inner_height / raw.height() } else { f64::INFINITY };
        let scale = scale_x.min(scale_y);
        let scale = if scale.is_finite() { scale } else { 1.0 };

        let (cx, cy) = raw.center();
        Self {
            scale,
            translate: (width / 2.0 - cx * scale, height / 2.0 - cy * scale),
        }
    }
}

impl Projection for MercatorProjection {
    fn project(&self, point: GeoPoint) -> Option<(f64, f64)> {
        let (x, y) = mercator_raw(point)?;
        let projected = (x * self.scale + self.translate.0, y * self.scale + self.translate.1);
        (projected.0.is_finite() && projected.1.is_finite()).then_some(projected)
    }
}
