//! RGBA pixel buffer that receives rasterized glyphs.
//!
//! Rows are stored top-left origin, the order texture uploads expect. The
//! row stride is padded for SIMD alignment; [`PixelBuffer::to_compact_pixels`]
//! returns the tightly packed bytes.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::Vector;

/// Alignment for SIMD operations (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// SIMD-aligned RGBA8 pixel buffer.
///
/// # SIMD Acceleration
///
/// [`PixelBuffer::composite_over`] runs its per-row arithmetic through trueno's
/// vector backend (SSE2/AVX2/AVX512/NEON).
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes per pixel.
    pixels: Vec<u8>,
    /// Stride in bytes (may include padding for alignment).
    stride: usize,
}

impl PixelBuffer {
    /// Create a transparent buffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_glyph::pixel_buffer::PixelBuffer;
    ///
    /// let buffer = PixelBuffer::new(64, 32).unwrap();
    /// assert_eq!(buffer.width(), 64);
    /// assert_eq!(buffer.height(), 32);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);

        Ok(Self {
            width,
            height,
            pixels: vec![0; stride * (height as usize)],
            stride,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the stride (row width in bytes, including any padding).
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get the raw pixel data, stride padding included.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get a row of pixels as a slice.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        let end = start + (self.width as usize) * 4;
        Some(&self.pixels[start..end])
    }

    /// Clear the buffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        let row_bytes = (self.width as usize) * 4;

        for y in 0..self.height as usize {
            let start = y * self.stride;
            for chunk in self.pixels[start..start + row_bytes].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Set a pixel given signed coordinates; anything outside
    /// `[0, width) × [0, height)` is silently dropped.
    ///
    /// Returns whether the pixel was written.
    pub fn put_clipped(&mut self, x: i32, y: i32, color: Rgba) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.set_pixel(x as u32, y as u32, color);
        true
    }

    /// Composite `layer` over this buffer with source-over blending.
    ///
    /// `layer` holds straight (non-premultiplied) colors; each of its pixels
    /// contributes in proportion to its alpha.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers have different dimensions or a SIMD
    /// operation fails.
    pub fn composite_over(&mut self, layer: &PixelBuffer) -> Result<()> {
        if self.width != layer.width || self.height != layer.height {
            return Err(Error::InvalidDimensions {
                width: layer.width,
                height: layer.height,
            });
        }

        let row_bytes = (self.width as usize) * 4;

        for y in 0..self.height as usize {
            let row_start = y * self.stride;
            let src_slice = &layer.pixels[row_start..row_start + row_bytes];
            let dst_slice = &self.pixels[row_start..row_start + row_bytes];

            // Per channel: out = src * src_factor + dst * (1 - src_alpha),
            // where src_factor is the source alpha for color channels and 1
            // for the alpha channel.
            let mut src_factor = Vec::with_capacity(row_bytes);
            let mut dst_factor = Vec::with_capacity(row_bytes);
            for px in src_slice.chunks_exact(4) {
                let alpha = f32::from(px[3]) / 255.0;
                src_factor.extend_from_slice(&[alpha, alpha, alpha, 1.0]);
                dst_factor.extend_from_slice(&[1.0 - alpha; 4]);
            }

            let blended = source_over(
                src_slice.iter().map(|&b| f32::from(b)).collect(),
                src_factor,
                dst_slice.iter().map(|&b| f32::from(b)).collect(),
                dst_factor,
            )?;

            let row = &mut self.pixels[row_start..row_start + row_bytes];
            for (out, &v) in row.iter_mut().zip(&blended) {
                *out = v.round().clamp(0.0, 255.0) as u8;
            }
        }

        Ok(())
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }

    /// Get pixel data as a compact buffer without stride padding.
    ///
    /// This is the layout texture uploads and PNG encoding expect.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;

        if self.stride == row_bytes {
            return self.pixels[..row_bytes * (self.height as usize)].to_vec();
        }

        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height as usize {
            let start = y * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }
}

/// `src * src_factor + dst * dst_factor`, element-wise on trueno vectors.
fn source_over(
    src: Vec<f32>,
    src_factor: Vec<f32>,
    dst: Vec<f32>,
    dst_factor: Vec<f32>,
) -> Result<Vec<f32>> {
    let src = Vector::from_vec(src).mul(&Vector::from_vec(src_factor))?;
    let dst = Vector::from_vec(dst).mul(&Vector::from_vec(dst_factor))?;
    Ok(src.add(&dst)?.as_slice().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = PixelBuffer::new(100, 50).unwrap();
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.height(), 50);
        assert_eq!(buffer.pixel_count(), 5000);
        assert!(buffer.stride() >= 400);
        assert_eq!(buffer.stride() % SIMD_ALIGNMENT, 0);
        assert_eq!(buffer.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(PixelBuffer::new(0, 100).is_err());
        assert!(PixelBuffer::new(100, 0).is_err());
        assert!(PixelBuffer::new(0, 0).is_err());
    }

    #[test]
    fn test_clear() {
        let mut buffer = PixelBuffer::new(10, 10).unwrap();
        buffer.clear(Rgba::RED);

        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(buffer.get_pixel(x, y), Some(Rgba::RED));
            }
        }
    }

    #[test]
    fn test_set_get_pixel() {
        let mut buffer = PixelBuffer::new(10, 10).unwrap();
        buffer.set_pixel(5, 5, Rgba::BLUE);
        assert_eq!(buffer.get_pixel(5, 5), Some(Rgba::BLUE));
        assert_eq!(buffer.get_pixel(100, 100), None);
    }

    #[test]
    fn test_put_clipped_drops_out_of_range() {
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        assert!(!buffer.put_clipped(-1, 0, Rgba::RED));
        assert!(!buffer.put_clipped(0, -1, Rgba::RED));
        assert!(!buffer.put_clipped(4, 0, Rgba::RED));
        assert!(!buffer.put_clipped(0, 4, Rgba::RED));
        assert!(buffer.put_clipped(3, 3, Rgba::RED));
        assert_eq!(buffer.get_pixel(3, 3), Some(Rgba::RED));
    }

    #[test]
    fn test_composite_opaque_replaces() {
        let mut dst = PixelBuffer::new(8, 2).unwrap();
        let mut layer = PixelBuffer::new(8, 2).unwrap();
        dst.clear(Rgba::WHITE);
        layer.set_pixel(3, 1, Rgba::BLUE);

        dst.composite_over(&layer).unwrap();

        assert_eq!(dst.get_pixel(3, 1), Some(Rgba::BLUE));
        assert_eq!(dst.get_pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_composite_half_alpha() {
        let mut dst = PixelBuffer::new(2, 2).unwrap();
        let mut layer = PixelBuffer::new(2, 2).unwrap();
        dst.clear(Rgba::BLACK);
        layer.clear(Rgba::new(255, 255, 255, 128));

        dst.composite_over(&layer).unwrap();

        let px = dst.get_pixel(1, 1).unwrap();
        assert!(px.r > 120 && px.r < 135);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_composite_size_mismatch() {
        let mut dst = PixelBuffer::new(2, 2).unwrap();
        let layer = PixelBuffer::new(3, 2).unwrap();
        assert!(dst.composite_over(&layer).is_err());
    }

    #[test]
    fn test_compact_pixels_strip_padding() {
        let mut buffer = PixelBuffer::new(3, 2).unwrap();
        buffer.set_pixel(2, 1, Rgba::new(1, 2, 3, 4));

        let compact = buffer.to_compact_pixels();
        assert_eq!(compact.len(), 3 * 2 * 4);
        assert_eq!(&compact[20..24], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_row_access() {
        let buffer = PixelBuffer::new(10, 5).unwrap();
        assert_eq!(buffer.row(4).map(<[u8]>::len), Some(40));
        assert!(buffer.row(5).is_none());
    }

    #[test]
    fn test_source_over_reports_length_mismatch() {
        let result = source_over(vec![1.0; 4], vec![1.0; 3], vec![0.0; 4], vec![0.0; 4]);
        assert!(matches!(result, Err(Error::Simd(_))));
    }

    #[test]
    fn test_source_over_weights_both_layers() {
        let out = source_over(vec![200.0], vec![0.5], vec![100.0], vec![0.5]);
        assert_eq!(out.unwrap(), vec![150.0]);
    }
}
