//! Output encoders for composed glyph buffers.

mod png_encoder;

pub use png_encoder::PngEncoder;
