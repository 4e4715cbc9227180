//! Scanline rasterizer.
//!
//! Each non-horizontal edge is sampled at roughly two points per pixel of
//! chord length. Every sample drops a [`CrossingEvent`] into the row it falls
//! in. Rows are then swept left to right: the most recent crossing strictly
//! left of a column decides whether that column is inside the glyph.
//!
//! # Fill rule
//!
//! The sweep does not accumulate a signed winding number. The last crossing
//! wins: an upward edge turns filling on, a downward edge turns it off. For
//! clockwise outer contours and counter-clockwise holes without
//! self-intersections (ordinary glyph outlines) this matches the non-zero
//! rule. Self-intersecting or overlapping contours can render differently,
//! and switching to a winding counter would change output for those glyphs.

use crate::color::COVERED;
use crate::contour::{self, FlattenedContour, PixelBounds};
use crate::error::{Error, Result};
use crate::geometry::QuadSegment;
use crate::outline::GlyphOutline;
use crate::render::coverage::CoverageBitmap;

/// An edge crossing recorded on one pixel row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    /// Horizontal position relative to the bitmap's left edge.
    pub pixel_x: f32,
    /// True when the edge runs towards increasing y.
    pub winding_up: bool,
}

/// Number of samples taken along `segment`: `2 * chord + 1`, at least one.
#[must_use]
pub fn sample_count(segment: &QuadSegment) -> usize {
    ((2.0 * segment.chord_length() + 1.0) as usize).max(1)
}

/// Row-indexed crossing lists for a single rasterization call.
///
/// Built fresh per call and consumed by [`CrossingTable::fill`].
#[derive(Debug, Clone)]
pub struct CrossingTable {
    bounds: PixelBounds,
    rows: Vec<Vec<CrossingEvent>>,
}

impl CrossingTable {
    /// Create one empty crossing list per bitmap row.
    #[must_use]
    pub fn new(bounds: PixelBounds) -> Self {
        Self {
            bounds,
            rows: vec![Vec::new(); bounds.height as usize],
        }
    }

    /// Crossings recorded on bitmap row `row`, in insertion order until
    /// [`CrossingTable::fill`] sorts them.
    #[must_use]
    pub fn row(&self, row: usize) -> &[CrossingEvent] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }

    /// Total number of recorded crossings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// True when no crossing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Record the crossings of every segment of `contour`.
    pub fn add_contour(&mut self, contour: &FlattenedContour) {
        for segment in &contour.segments {
            self.add_segment(segment);
        }
    }

    /// Sample `segment` and record one crossing per sample.
    ///
    /// Horizontal segments are skipped; their endpoints are already recorded
    /// by the neighbouring edges. Samples outside the bitmap rows are dropped.
    pub fn add_segment(&mut self, segment: &QuadSegment) {
        if segment.is_horizontal() {
            return;
        }

        let winding_up = segment.winds_up();
        let samples = sample_count(segment);
        let steps = (samples - 1).max(1) as f32;

        for i in 0..samples {
            let p = segment.eval(i as f32 / steps);
            let row = p.y.floor() as i64 - i64::from(self.bounds.origin_y);
            if row < 0 || row >= self.rows.len() as i64 {
                continue;
            }
            self.rows[row as usize].push(CrossingEvent {
                pixel_x: p.x - self.bounds.origin_x as f32,
                winding_up,
            });
        }
    }

    /// Sort each row and sweep it into a coverage bitmap.
    #[must_use]
    pub fn fill(mut self) -> CoverageBitmap {
        let mut bitmap = CoverageBitmap::new(self.bounds);
        let width = self.bounds.width;

        for (r, crossings) in self.rows.iter_mut().enumerate() {
            crossings.sort_by(|a, b| a.pixel_x.total_cmp(&b.pixel_x));

            let out = bitmap.row_mut(r as u32);
            let mut inside = false;
            let mut next = 0;

            for col in 0..width {
                let x = col as f32;
                while next < crossings.len() && crossings[next].pixel_x < x {
                    inside = crossings[next].winding_up;
                    next += 1;
                }
                if inside {
                    out[col as usize] = COVERED;
                }
            }
        }

        bitmap
    }
}

/// Rasterize flattened contours into a bitmap placed at `bounds`.
#[must_use]
pub fn rasterize(contours: &[FlattenedContour], bounds: PixelBounds) -> CoverageBitmap {
    if bounds.is_empty() {
        return CoverageBitmap::new(bounds);
    }

    let mut table = CrossingTable::new(bounds);
    for contour in contours {
        table.add_contour(contour);
    }

    let crossings = table.len();
    let bitmap = table.fill();

    if log::log_enabled!(log::Level::Trace) {
        log::trace!(
            "rasterized {} contour(s) into {}x{}: {crossings} crossing(s), {:.1}% covered",
            contours.len(),
            bounds.width,
            bounds.height,
            bitmap.coverage_ratio() * 100.0
        );
    }

    bitmap
}

/// Build and rasterize `outline` at `scale` pixels per design unit.
///
/// # Errors
///
/// Returns [`Error::InvalidScale`] if `scale` is not a positive finite number.
pub fn rasterize_glyph(outline: &GlyphOutline, scale: f32) -> Result<CoverageBitmap> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::InvalidScale(scale));
    }

    let bounds = PixelBounds::from_design(&outline.bounds, scale);
    let contours = contour::build(outline, scale);
    Ok(rasterize(&contours, bounds))
}
