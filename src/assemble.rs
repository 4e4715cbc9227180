//! Bitmap assembly: coverage masks to RGBA pixel buffers.
//!
//! Coverage bitmaps are stored bottom-up in pixel space; everything produced
//! here is top-left origin, premultiplied by coverage, and clipped to the
//! destination.

use crate::color::Rgba;
use crate::config::RasterConfig;
use crate::contour::{self, FlattenedContour, PixelBounds};
use crate::error::Result;
use crate::outline::{GlyphOutline, OutlineSource};
use crate::pixel_buffer::PixelBuffer;
use crate::render::{self, CoverageBitmap};

/// Baseline position as a fraction of the font size, measured from the top.
pub const BASELINE_RATIO: f32 = 0.8;

/// Horizontal padding in pixels between consecutive glyphs.
pub const GLYPH_PADDING_PX: i32 = 1;

/// Row of the baseline for a line set at `font_size_px`.
#[must_use]
pub fn baseline(font_size_px: f32) -> i32 {
    (font_size_px * BASELINE_RATIO).floor() as i32
}

/// Pen advance in pixels after drawing `outline` at `scale`.
#[must_use]
pub fn advance_px(outline: &GlyphOutline, scale: f32) -> i32 {
    (outline.advance_width * scale).round() as i32 + GLYPH_PADDING_PX
}

/// Convert a coverage bitmap to a top-left-origin RGBA buffer.
///
/// Each pixel is `color` scaled by its coverage on every channel. Returns
/// `None` for a zero-area bitmap: no visible bitmap was produced.
#[must_use]
pub fn to_texture(bitmap: &CoverageBitmap, color: Rgba) -> Option<PixelBuffer> {
    let mut buffer = PixelBuffer::new(bitmap.width(), bitmap.height()).ok()?;
    let height = bitmap.height();

    for row in 0..height {
        let Some(coverage) = bitmap.row(row) else {
            continue;
        };
        let y = height - 1 - row;
        for (x, &c) in coverage.iter().enumerate() {
            buffer.set_pixel(x as u32, y, color.modulate(c));
        }
    }

    Some(buffer)
}

/// A glyph ready for line composition: its outline (for bounds and advance)
/// and its contours already built at the composition scale.
///
/// The contours must come from [`contour::build`] with the same `scale` later
/// passed to [`compose_line`]. Bitmap bounds are derived from the outline at
/// that scale, so contours built at another scale land outside them and are
/// clipped. Debug builds assert the scales match.
#[derive(Debug, Clone, Copy)]
pub struct LineGlyph<'a> {
    /// Source outline.
    pub outline: &'a GlyphOutline,
    /// Contours built at the same scale passed to [`compose_line`].
    pub contours: &'a [FlattenedContour],
}

/// Compose a line of glyphs into `dest`, starting at pen x 0.
///
/// Each glyph is rasterized and placed relative to the shared baseline at
/// [`baseline`]`(font_size_px)`; the pen then moves by [`advance_px`]. Only
/// covered pixels are written, so overlapping glyph boxes do not erase one
/// another. Pixels falling outside `dest` are dropped.
///
/// Returns the final pen position.
///
/// # Panics
///
/// In debug builds, panics if a glyph's contours were built at a scale other
/// than `scale`.
pub fn compose_line(
    dest: &mut PixelBuffer,
    glyphs: &[LineGlyph<'_>],
    scale: f32,
    font_size_px: f32,
    color: Rgba,
) -> i32 {
    let baseline = baseline(font_size_px);
    let mut pen_x = 0;
    let mut clipped = 0usize;

    for glyph in glyphs {
        debug_assert!(
            glyph.contours.iter().all(|c| c.scale == scale),
            "glyph contours built at a different scale than {scale}"
        );
        let bounds = PixelBounds::from_design(&glyph.outline.bounds, scale);
        let bitmap = render::rasterize(glyph.contours, bounds);

        for (x, y) in bitmap.covered_pixels() {
            // pixel y grows upwards; destination rows grow downwards
            if !dest.put_clipped(pen_x + x, baseline - 1 - y, color) {
                clipped += 1;
            }
        }

        pen_x += advance_px(glyph.outline, scale);
    }

    if clipped > 0 {
        log::trace!(
            "compose_line clipped {clipped} pixel(s) outside {}x{}",
            dest.width(),
            dest.height()
        );
    }

    pen_x
}

/// Width in pixels a line of `text` occupies at `scale`.
///
/// Characters without a glyph contribute nothing.
#[must_use]
pub fn measure_line(source: &impl OutlineSource, text: &str, scale: f32) -> i32 {
    text.chars()
        .filter_map(|ch| source.outline(ch))
        .map(|outline| advance_px(&outline, scale))
        .sum()
}

/// Lay out `text` from `source` into a new buffer sized by `config`.
///
/// Characters the source has no glyph for are skipped. Text that runs past
/// the buffer is clipped.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn render_text(
    source: &impl OutlineSource,
    text: &str,
    config: &RasterConfig,
) -> Result<PixelBuffer> {
    config.validate()?;
    let scale = config.scale_for(source.units_per_em());

    let outlines: Vec<GlyphOutline> = text
        .chars()
        .filter_map(|ch| {
            let outline = source.outline(ch);
            if outline.is_none() {
                log::debug!("no glyph for {ch:?}, skipping");
            }
            outline
        })
        .collect();
    let contours: Vec<Vec<FlattenedContour>> = outlines
        .iter()
        .map(|outline| contour::build(outline, scale))
        .collect();
    let glyphs: Vec<LineGlyph<'_>> = outlines
        .iter()
        .zip(&contours)
        .map(|(outline, contours)| LineGlyph { outline, contours })
        .collect();

    let mut layer = PixelBuffer::new(config.width, config.height)?;
    let pen_x = compose_line(
        &mut layer,
        &glyphs,
        scale,
        config.font_size_px,
        config.foreground,
    );
    log::debug!(
        "rendered {} glyph(s) of {:?} at scale {scale}, line width {pen_x}px",
        glyphs.len(),
        text
    );

    let mut buffer = PixelBuffer::new(config.width, config.height)?;
    buffer.clear(config.background);
    buffer.composite_over(&layer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::COVERED;
    use crate::outline::{DesignBounds, GlyphTable, OutlinePoint};

    fn block(width: f32, height: f32, advance: f32) -> GlyphOutline {
        GlyphOutline::from_points(
            advance,
            vec![vec![
                OutlinePoint::on(0.0, 0.0),
                OutlinePoint::on(0.0, height),
                OutlinePoint::on(width, height),
                OutlinePoint::on(width, 0.0),
            ]],
        )
        .unwrap()
    }

    fn bitmap_from_rows(rows: &[&[u8]]) -> CoverageBitmap {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let outline_bounds = PixelBounds {
            origin_x: 0,
            origin_y: 0,
            width,
            height,
        };
        let mut bitmap = CoverageBitmap::new(outline_bounds);
        for (r, values) in rows.iter().enumerate() {
            for (c, &v) in values.iter().enumerate() {
                if v > 0 {
                    set(&mut bitmap, c, r);
                }
            }
        }
        bitmap
    }

    fn set(bitmap: &mut CoverageBitmap, col: usize, row: usize) {
        bitmap.row_mut(row as u32)[col] = COVERED;
    }

    #[test]
    fn test_baseline() {
        assert_eq!(baseline(32.0), 25);
        assert_eq!(baseline(10.0), 8);
    }

    #[test]
    fn test_advance_includes_padding() {
        let glyph = block(10.0, 10.0, 600.0);
        assert_eq!(advance_px(&glyph, 0.02), 13);
    }

    #[test]
    fn test_to_texture_flips_and_modulates() {
        // bottom row covered on the left, top row covered on the right
        let bitmap = bitmap_from_rows(&[&[1, 0], &[0, 1]]);
        let color = Rgba::new(200, 100, 50, 255);

        let texture = to_texture(&bitmap, color).unwrap();
        assert_eq!(texture.get_pixel(0, 1), Some(color));
        assert_eq!(texture.get_pixel(1, 0), Some(color));
        assert_eq!(texture.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(texture.get_pixel(1, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_to_texture_empty_bitmap() {
        let bitmap = CoverageBitmap::new(PixelBounds::default());
        assert!(to_texture(&bitmap, Rgba::WHITE).is_none());
    }

    #[test]
    fn test_compose_line_places_glyphs_on_baseline() {
        let glyph = block(4.0, 4.0, 6.0);
        let contours = contour::build(&glyph, 1.0);
        let glyphs = [
            LineGlyph {
                outline: &glyph,
                contours: &contours,
            },
            LineGlyph {
                outline: &glyph,
                contours: &contours,
            },
        ];

        let mut dest = PixelBuffer::new(32, 10).unwrap();
        let pen = compose_line(&mut dest, &glyphs, 1.0, 10.0, Rgba::RED);

        assert_eq!(pen, 14);
        // baseline row 8; glyph pixel y 0 lands on row 7
        assert_eq!(dest.get_pixel(2, 7), Some(Rgba::RED));
        assert_eq!(dest.get_pixel(2, 8), Some(Rgba::TRANSPARENT));
        // second glyph starts at pen x 7
        assert_eq!(dest.get_pixel(9, 6), Some(Rgba::RED));
        assert_eq!(dest.get_pixel(6, 6), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_compose_line_clips_silently() {
        let glyph = block(40.0, 40.0, 45.0);
        let contours = contour::build(&glyph, 1.0);
        let line_glyph = LineGlyph {
            outline: &glyph,
            contours: &contours,
        };
        let glyphs = vec![line_glyph; 5];

        let mut dest = PixelBuffer::new(50, 20).unwrap();
        let pen = compose_line(&mut dest, &glyphs, 1.0, 20.0, Rgba::WHITE);

        assert_eq!(pen, 5 * 46);
        assert_eq!(dest.get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "different scale")]
    fn test_compose_line_rejects_contours_at_other_scale() {
        let glyph = block(4.0, 4.0, 6.0);
        let contours = contour::build(&glyph, 2.0);
        let glyphs = [LineGlyph {
            outline: &glyph,
            contours: &contours,
        }];

        let mut dest = PixelBuffer::new(16, 16).unwrap();
        compose_line(&mut dest, &glyphs, 1.0, 16.0, Rgba::WHITE);
    }

    #[test]
    fn test_compose_empty_glyph_advances_only() {
        let space = GlyphOutline::empty(300.0);
        let glyphs = [LineGlyph {
            outline: &space,
            contours: &[],
        }];

        let mut dest = PixelBuffer::new(8, 8).unwrap();
        let pen = compose_line(&mut dest, &glyphs, 0.01, 8.0, Rgba::WHITE);

        assert_eq!(pen, 4);
        assert!(dest.to_compact_pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_measure_line_skips_missing() {
        let mut table = GlyphTable::new(100);
        table.insert('a', block(10.0, 10.0, 20.0));
        assert_eq!(measure_line(&table, "a?a", 1.0), 42);
    }

    #[test]
    fn test_render_text_uses_config() {
        let mut table = GlyphTable::new(100);
        table.insert('i', block(20.0, 60.0, 30.0));

        let config = RasterConfig {
            font_size_px: 32.0,
            font_scale: Some(0.5),
            foreground: Rgba::GREEN,
            background: Rgba::BLACK,
            width: 40,
            height: 32,
        };

        let buffer = render_text(&table, "i\u{2603}i", &config).unwrap();
        assert_eq!(buffer.width(), 40);
        // baseline 25, glyph spans pixel y 0..=30 -> rows up to 24
        assert_eq!(buffer.get_pixel(5, 20), Some(Rgba::GREEN));
        assert_eq!(buffer.get_pixel(5, 30), Some(Rgba::BLACK));
        // second 'i' at pen 16
        assert_eq!(buffer.get_pixel(21, 20), Some(Rgba::GREEN));
    }

    #[test]
    fn test_render_text_rejects_invalid_config() {
        let table = GlyphTable::new(100);
        let config = RasterConfig {
            width: 0,
            ..RasterConfig::default()
        };
        assert!(render_text(&table, "x", &config).is_err());
    }

    #[test]
    fn test_degenerate_bounds_outline_draws_nothing() {
        let mut glyph = block(10.0, 10.0, 12.0);
        glyph.bounds = DesignBounds::default();
        let contours = contour::build(&glyph, 1.0);
        let mut dest = PixelBuffer::new(16, 16).unwrap();

        let glyphs = [LineGlyph {
            outline: &glyph,
            contours: &contours,
        }];

        compose_line(&mut dest, &glyphs, 1.0, 16.0, Rgba::WHITE);
        assert!(dest.to_compact_pixels().iter().all(|&b| b == 0));
    }
}
