//! Glyph outlines in font design units and the sources that supply them.
//!
//! An [`OutlineSource`] answers "what does this character look like" with an
//! optional [`GlyphOutline`]; absence means the font has no glyph for it and
//! the caller skips or substitutes.

use crate::error::{Error, Result};
use crate::geometry::Point;
use std::collections::HashMap;

/// A raw outline point with its on-curve marker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutlinePoint {
    /// Design-space position.
    pub position: Point,
    /// `false` for a quadratic control point.
    pub on_curve: bool,
}

impl OutlinePoint {
    /// Point lying on the outline.
    #[must_use]
    pub const fn on(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            on_curve: true,
        }
    }

    /// Quadratic control point.
    #[must_use]
    pub const fn off(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            on_curve: false,
        }
    }
}

/// A closed contour with at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<OutlinePoint>,
}

impl Contour {
    /// Minimum number of points in a contour.
    pub const MIN_POINTS: usize = 2;

    /// Create a contour.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContour`] (reported as contour 0) when fewer
    /// than [`Contour::MIN_POINTS`] points are given.
    pub fn new(points: Vec<OutlinePoint>) -> Result<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(Error::MalformedContour {
                contour: 0,
                points: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// The raw points in outline order.
    #[must_use]
    pub fn points(&self) -> &[OutlinePoint] {
        &self.points
    }

    /// Number of raw points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a contour holds at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Inclusive integer bounding box in design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesignBounds {
    /// Minimum x.
    pub min_x: i32,
    /// Minimum y.
    pub min_y: i32,
    /// Maximum x.
    pub max_x: i32,
    /// Maximum y.
    pub max_y: i32,
}

impl DesignBounds {
    /// Create a bounding box.
    #[must_use]
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// True when the box encloses no area.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    /// Smallest box containing every point, rounded outwards.
    #[must_use]
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self::new(
            min_x.floor() as i32,
            min_y.floor() as i32,
            max_x.ceil() as i32,
            max_y.ceil() as i32,
        )
    }
}

/// One glyph's vector description in design units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphOutline {
    /// Design-space bounding box.
    pub bounds: DesignBounds,
    /// Horizontal advance in design units.
    pub advance_width: f32,
    /// Closed contours.
    pub contours: Vec<Contour>,
}

impl GlyphOutline {
    /// Create an outline from explicit parts.
    #[must_use]
    pub fn new(bounds: DesignBounds, advance_width: f32, contours: Vec<Contour>) -> Self {
        Self {
            bounds,
            advance_width,
            contours,
        }
    }

    /// Outline without contours (e.g. a space) that still advances the pen.
    #[must_use]
    pub fn empty(advance_width: f32) -> Self {
        Self::new(DesignBounds::default(), advance_width, Vec::new())
    }

    /// Build an outline from raw point lists, deriving the bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContour`] naming the first contour with fewer
    /// than two points.
    pub fn from_points(advance_width: f32, contours: Vec<Vec<OutlinePoint>>) -> Result<Self> {
        let contours = contours
            .into_iter()
            .enumerate()
            .map(|(index, points)| {
                Contour::new(points).map_err(|e| match e {
                    Error::MalformedContour { points, .. } => Error::MalformedContour {
                        contour: index,
                        points,
                    },
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let bounds = DesignBounds::enclosing(
            contours
                .iter()
                .flat_map(|c| c.points().iter().map(|p| &p.position)),
        );

        Ok(Self::new(bounds, advance_width, contours))
    }

    /// True when there is nothing to rasterize.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Supplies glyph outlines by character.
pub trait OutlineSource {
    /// Outline for `ch`, or `None` if the font has no glyph for it.
    fn outline(&self, ch: char) -> Option<GlyphOutline>;

    /// Design units per em square, used to derive pixel scales.
    fn units_per_em(&self) -> u16;

    /// Scale that maps one em to `px` pixels.
    fn scale_for_pixel_height(&self, px: f32) -> f32 {
        px / f32::from(self.units_per_em().max(1))
    }
}

/// In-memory outline source keyed by character.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, GlyphOutline>,
    units_per_em: u16,
}

impl GlyphTable {
    /// Create an empty table with the given em size.
    #[must_use]
    pub fn new(units_per_em: u16) -> Self {
        Self {
            glyphs: HashMap::new(),
            units_per_em,
        }
    }

    /// Register (or replace) the outline for `ch`.
    pub fn insert(&mut self, ch: char, outline: GlyphOutline) -> &mut Self {
        self.glyphs.insert(ch, outline);
        self
    }

    /// Number of glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True when no glyphs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl OutlineSource for GlyphTable {
    fn outline(&self, ch: char) -> Option<GlyphOutline> {
        self.glyphs.get(&ch).cloned()
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
}
