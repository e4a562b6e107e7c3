/// Midpoint of the segment between two points.
#[must_use]
pub fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Axis-aligned bounding box accumulated from a stream of points.
///
/// Starts empty; non-finite points are ignored so a single bad vertex cannot
/// poison the extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn extend(&mut self, point: (f64, f64)) {
        if !point.0.is_finite() || !point.1.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(point.0);
        self.min_y = self.min_y.min(point.1);
        self.max_x = self.max_x.max(point.0);
        self.max_y = self.max_y.max(point.1);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        midpoint((self.min_x, self.min_y), (self.max_x, self.max_y))
    }

    #[must_use]
    pub fn contains(&self, point: (f64, f64)) -> bool {
        point.0 >= self.min_x && point.0 <= self.max_x &&
        point.1 >= self.min_y && point.1 <= self.max_y
    }
}

impl FromIterator<(f64, f64)> for Bounds {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut bounds = Self::empty();
        for point in iter {
            bounds.extend(point);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint((0.0, 0.0), (10.0, 4.0)), (5.0, 2.0));
        assert_eq!(midpoint((-2.0, 3.0), (2.0, -3.0)), (0.0, 0.0));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert_eq!(distance((1.0, 1.0), (1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds: Bounds = [(1.0, 5.0), (-3.0, 2.0), (4.0, -1.0)].into_iter().collect();
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 4.0);
        assert_eq!(bounds.min_y, -1.0);
        assert_eq!(bounds.max_y, 5.0);
        assert_eq!(bounds.width(), 7.0);
        assert_eq!(bounds.height(), 6.0);
        assert!(bounds.contains((0.0, 0.0)));
        assert!(!bounds.contains((10.0, 0.0)));
    }

    #[test]
    fn test_bounds_ignores_non_finite() {
        let bounds: Bounds = [(1.0, 1.0), (f64::NAN, 2.0), (f64::INFINITY, 0.0)].into_iter().collect();
        assert_eq!(bounds.min_x, 1.0);
        assert_eq!(bounds.max_x, 1.0);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(Bounds::empty().is_empty());
        let bounds: Bounds = std::iter::once((2.0, 2.0)).collect();
        assert!(!bounds.is_empty());
    }
}
