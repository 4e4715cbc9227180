//! Contour builder: raw outline points to scaled quadratic segments.
//!
//! TrueType-style contours mix on-curve points with quadratic control points.
//! Two consecutive control points imply an on-curve point halfway between
//! them. The builder makes every implied point explicit and emits one
//! [`QuadSegment`] per edge, already scaled into pixel space.

use crate::geometry::{Point, QuadSegment};
use crate::outline::{Contour, DesignBounds, GlyphOutline};

/// Margin in pixels added on every side of a glyph's pixel bounds.
pub const MARGIN_PX: i32 = 1;

/// One closed contour as a chain of quadratic segments in pixel space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlattenedContour {
    /// Segments in contour order; the last one ends where the first starts.
    pub segments: Vec<QuadSegment>,
    /// Pixels per design unit the segments were built at.
    pub scale: f32,
}

impl FlattenedContour {
    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the contour has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Pixel-space placement of a glyph bitmap.
///
/// Column 0 of the bitmap covers pixel x `origin_x`, row 0 covers pixel y
/// `origin_y`. Pixel y grows upwards, like design space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelBounds {
    /// Pixel x of bitmap column 0.
    pub origin_x: i32,
    /// Pixel y of bitmap row 0.
    pub origin_y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBounds {
    /// Map a design-space box to pixel space at `scale`, with [`MARGIN_PX`]
    /// on every side.
    ///
    /// Minimums are floored and maximums ceiled after scaling, so negative
    /// coordinates (descenders) round away from the glyph just like positive
    /// ones. A degenerate box maps to zero-area bounds.
    #[must_use]
    pub fn from_design(bounds: &DesignBounds, scale: f32) -> Self {
        if bounds.is_degenerate() {
            return Self::default();
        }

        let origin_x = (bounds.min_x as f32 * scale).floor() as i32 - MARGIN_PX;
        let origin_y = (bounds.min_y as f32 * scale).floor() as i32 - MARGIN_PX;
        let end_x = (bounds.max_x as f32 * scale).ceil() as i32 + MARGIN_PX;
        let end_y = (bounds.max_y as f32 * scale).ceil() as i32 + MARGIN_PX;

        Self {
            origin_x,
            origin_y,
            width: (end_x - origin_x).max(0) as u32,
            height: (end_y - origin_y).max(0) as u32,
        }
    }

    /// True when the bitmap would hold no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels.
    #[must_use]
    pub const fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Expand every contour of `outline` into scaled quadratic segments.
#[must_use]
pub fn build(outline: &GlyphOutline, scale: f32) -> Vec<FlattenedContour> {
    outline
        .contours
        .iter()
        .map(|contour| build_contour(contour, scale))
        .collect()
}

/// Expand a single contour.
#[must_use]
pub fn build_contour(contour: &Contour, scale: f32) -> FlattenedContour {
    let points = contour.points();
    let n = points.len();
    let mut segments = Vec::with_capacity(n);

    let scaled = |i: usize| points[i % n].position.scaled(scale);

    // Begin at the first on-curve point. An all-off-curve contour starts at
    // the implied point between its last and first controls.
    let (start, first) = match points.iter().position(|p| p.on_curve) {
        Some(i) => (scaled(i), i + 1),
        None => (scaled(n - 1).midpoint(scaled(0)), 0),
    };

    let mut current = start;
    let mut control: Option<Point> = None;

    for i in first..first + n {
        let p = scaled(i);
        if points[i % n].on_curve {
            segments.push(edge(current, control.take(), p));
            current = p;
        } else if let Some(c) = control.replace(p) {
            let implied = c.midpoint(p);
            segments.push(QuadSegment::new(current, c, implied));
            current = implied;
        }
    }

    // When the start point was synthesized (or the loop stopped on a
    // control), close back to it.
    if current != start || control.is_some() {
        segments.push(edge(current, control, start));
    }

    FlattenedContour { segments, scale }
}

fn edge(p0: Point, control: Option<Point>, p2: Point) -> QuadSegment {
    match control {
        Some(c) => QuadSegment::new(p0, c, p2),
        None => QuadSegment::line(p0, p2),
    }
}


// Property-based tests with proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::outline::OutlinePoint;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Pixel bounds enclose the scaled box with at least the margin and at
        /// most the margin plus one pixel of rounding per side.
        #[test]
        fn prop_pixel_bounds_enclose_scaled_box(
            min_x in -2000i32..2000,
            min_y in -2000i32..2000,
            w in 1i32..2000,
            h in 1i32..2000,
            scale in 0.001f32..4.0,
        ) {
            let design = DesignBounds::new(min_x, min_y, min_x + w, min_y + h);
            let b = PixelBounds::from_design(&design, scale);

            let lo_x = min_x as f32 * scale;
            let hi_x = (min_x + w) as f32 * scale;
            let lo_y = min_y as f32 * scale;
            let hi_y = (min_y + h) as f32 * scale;

            prop_assert!(b.origin_x as f32 <= lo_x - 1.0);
            prop_assert!(b.origin_y as f32 <= lo_y - 1.0);
            prop_assert!((b.origin_x + b.width as i32) as f32 >= hi_x + 1.0);
            prop_assert!((b.origin_y + b.height as i32) as f32 >= hi_y + 1.0);
            prop_assert!(b.width as f32 <= hi_x - lo_x + 4.0);
            prop_assert!(b.height as f32 <= hi_y - lo_y + 4.0);
        }

        /// Every built segment starts where the previous one ended, and the
        /// contour closes on itself.
        #[test]
        fn prop_built_contours_are_closed(
            coords in proptest::collection::vec(
                (-500.0f32..500.0, -500.0f32..500.0, any::<bool>()),
                2..24,
            ),
            scale in 0.01f32..3.0,
        ) {
            let points: Vec<OutlinePoint> = coords
                .iter()
                .map(|&(x, y, on)| {
                    if on {
                        OutlinePoint::on(x, y)
                    } else {
                        OutlinePoint::off(x, y)
                    }
                })
                .collect();
            let contour = Contour::new(points).unwrap();
            let built = build_contour(&contour, scale);

            prop_assert!(!built.is_empty());
            for pair in built.segments.windows(2) {
                prop_assert_eq!(pair[0].p2, pair[1].p0);
            }
            let first = built.segments[0].p0;
            let last = built.segments[built.segments.len() - 1].p2;
            prop_assert!((first.x - last.x).abs() < 1e-3 && (first.y - last.y).abs() < 1e-3);
        }
    }
}
