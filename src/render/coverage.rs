//! Coverage bitmaps produced by the scanline rasterizer.

use crate::color::COVERED;
use crate::contour::PixelBounds;
use trueno::Vector;

/// Binary coverage mask for one glyph.
///
/// Rows are stored bottom-up: row 0 is pixel y `bounds.origin_y`, the lowest
/// row of the glyph box. Consumers that want top-left origin flip on copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageBitmap {
    bounds: PixelBounds,
    data: Vec<u8>,
}

impl CoverageBitmap {
    /// Create an all-empty bitmap for `bounds`.
    #[must_use]
    pub fn new(bounds: PixelBounds) -> Self {
        Self {
            bounds,
            data: vec![0; bounds.area()],
        }
    }

    /// Pixel-space placement.
    #[must_use]
    pub const fn bounds(&self) -> PixelBounds {
        self.bounds
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bounds.height
    }

    /// True for a zero-area bitmap ("no visible bitmap produced").
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Raw coverage bytes, bottom row first.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Coverage values of bitmap row `row` (0 = bottom).
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[u8]> {
        if row >= self.bounds.height {
            return None;
        }
        let w = self.bounds.width as usize;
        let start = row as usize * w;
        Some(&self.data[start..start + w])
    }

    pub(crate) fn row_mut(&mut self, row: u32) -> &mut [u8] {
        let w = self.bounds.width as usize;
        let start = row as usize * w;
        &mut self.data[start..start + w]
    }

    /// Coverage at bitmap column/row, `None` outside the bitmap.
    #[must_use]
    pub fn get(&self, col: u32, row: u32) -> Option<u8> {
        if col >= self.bounds.width {
            return None;
        }
        self.row(row).map(|r| r[col as usize])
    }

    /// Whether the pixel at pixel-space `(x, y)` is covered.
    ///
    /// Pixels outside the bitmap are never covered.
    #[must_use]
    pub fn is_covered(&self, x: i32, y: i32) -> bool {
        let col = x - self.bounds.origin_x;
        let row = y - self.bounds.origin_y;
        if col < 0 || row < 0 {
            return false;
        }
        self.get(col as u32, row as u32)
            .is_some_and(|c| c >= COVERED)
    }

    /// Number of covered pixels.
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.data.iter().filter(|&&c| c >= COVERED).count()
    }

    /// Pixel-space coordinates of every covered pixel.
    pub fn covered_pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let w = self.bounds.width.max(1) as usize;
        let (ox, oy) = (self.bounds.origin_x, self.bounds.origin_y);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &c)| c >= COVERED)
            .map(move |(i, _)| (ox + (i % w) as i32, oy + (i / w) as i32))
    }

    /// Fraction of the bitmap that is covered, in `[0, 1]`.
    ///
    /// Uses trueno's SIMD mean reduction.
    #[must_use]
    pub fn coverage_ratio(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let values: Vec<f32> = self
            .data
            .iter()
            .map(|&c| f32::from(c.min(COVERED)) / f32::from(COVERED))
            .collect();
        Vector::from_vec(values).mean().unwrap_or(0.0)
    }
}
