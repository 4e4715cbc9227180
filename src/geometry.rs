//! Geometric primitives for outline processing.
//!
//! Provides the point and quadratic-Bézier segment types the contour builder
//! and scanline rasterizer share.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Multiply both coordinates by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// One quadratic-Bézier edge `(p0, control, p2)`.
///
/// Straight edges carry the midpoint of their endpoints as control point, so a
/// single evaluator covers both cases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadSegment {
    /// Start point (on curve).
    pub p0: Point,
    /// Control point (off curve).
    pub control: Point,
    /// End point (on curve).
    pub p2: Point,
}

impl QuadSegment {
    /// Create a curved segment.
    #[must_use]
    pub const fn new(p0: Point, control: Point, p2: Point) -> Self {
        Self { p0, control, p2 }
    }

    /// Create a straight segment with its control at the chord midpoint.
    #[must_use]
    pub fn line(p0: Point, p2: Point) -> Self {
        Self::new(p0, p0.midpoint(p2), p2)
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn eval(&self, t: f32) -> Point {
        let a = self.p0.lerp(self.control, t);
        let b = self.control.lerp(self.p2, t);
        a.lerp(b, t)
    }

    /// Straight-line distance between the endpoints.
    #[must_use]
    pub fn chord_length(&self) -> f32 {
        self.p0.distance(self.p2)
    }

    /// True when both endpoints lie on the same scanline height.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.p0.y == self.p2.y
    }

    /// True when the edge runs towards increasing y.
    #[must_use]
    pub fn winds_up(&self) -> bool {
        self.p0.y < self.p2.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_relative_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn test_point_lerp() {
        let mid = Point::ORIGIN.lerp(Point::new(10.0, 10.0), 0.5);
        assert_relative_eq!(mid.x, 5.0);
        assert_relative_eq!(mid.y, 5.0);
    }

    #[test]
    fn test_point_midpoint_and_scale() {
        let mid = Point::new(-4.0, 2.0).midpoint(Point::new(4.0, 6.0));
        assert_eq!(mid, Point::new(0.0, 4.0));
        assert_eq!(mid.scaled(0.5), Point::new(0.0, 2.0));
    }

    #[test]
    fn test_quad_endpoints() {
        let seg = QuadSegment::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(seg.eval(0.0), seg.p0);
        assert_eq!(seg.eval(1.0), seg.p2);
    }

    #[test]
    fn test_quad_apex() {
        let seg = QuadSegment::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let apex = seg.eval(0.5);
        assert_relative_eq!(apex.x, 5.0);
        assert_relative_eq!(apex.y, 5.0);
    }

    #[test]
    fn test_line_segment_stays_on_chord() {
        let seg = QuadSegment::line(Point::new(0.0, 0.0), Point::new(8.0, 4.0));
        let p = seg.eval(0.25);
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 1.0);
        assert_relative_eq!(seg.chord_length(), 80.0_f32.sqrt());
    }

    #[test]
    fn test_direction_flags() {
        let up = QuadSegment::line(Point::new(0.0, 0.0), Point::new(0.0, 3.0));
        let down = QuadSegment::line(Point::new(0.0, 3.0), Point::new(0.0, 0.0));
        let flat = QuadSegment::line(Point::new(0.0, 3.0), Point::new(9.0, 3.0));
        assert!(up.winds_up());
        assert!(!down.winds_up());
        assert!(flat.is_horizontal());
        assert!(!up.is_horizontal());
    }
}
