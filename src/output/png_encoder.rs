//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. Buffers are written as 8-bit
//! RGBA with the stride padding stripped.

use crate::error::Result;
use crate::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for pixel buffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Encode `buffer` into any writer.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding or the underlying write fails.
    pub fn encode<W: Write>(buffer: &PixelBuffer, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&buffer.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }

    /// Write a pixel buffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::encode(buffer, BufWriter::new(file))?;
        log::debug!(
            "wrote {}x{} PNG to {}",
            buffer.width(),
            buffer.height(),
            path.display()
        );
        Ok(())
    }

    /// Encode a pixel buffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        Self::encode(buffer, &mut bytes)?;
        Ok(bytes)
    }
}
