//! Error types for trueno-glyph operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-glyph operations.
///
/// Geometry edge cases (empty glyphs, sub-pixel contours, clipped
/// composition) are not errors; they produce empty or partial output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (font files, PNG output, config files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// SIMD vector operation failed.
    #[error("SIMD error: {0}")]
    Simd(#[from] trueno::TruenoError),

    /// Invalid dimensions for a pixel buffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale factor that cannot map design units to pixels.
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f32),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A contour with too few points to form a closed outline.
    #[error("Malformed contour {contour}: {points} point(s), at least 2 required")]
    MalformedContour {
        /// Index of the contour within its glyph.
        contour: usize,
        /// Number of points the contour had.
        points: usize,
    },

    /// Font data ended before a table or record was complete.
    #[error("Font data truncated: need {needed} bytes at offset {offset}")]
    FontTruncated {
        /// Byte offset of the failed read.
        offset: usize,
        /// Number of bytes the read needed.
        needed: usize,
    },

    /// A required TrueType table is absent.
    #[error("Missing font table '{0}'")]
    MissingTable(&'static str),

    /// Font uses a feature this loader does not handle.
    #[error("Unsupported font: {0}")]
    UnsupportedFont(String),

    /// Configuration parsing error with line number.
    #[error("Configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Why the value is invalid.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_malformed_contour_display() {
        let err = Error::MalformedContour {
            contour: 3,
            points: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("contour 3"));
        assert!(msg.contains("1 point"));
    }

    #[test]
    fn test_font_truncated_display() {
        let err = Error::FontTruncated {
            offset: 120,
            needed: 4,
        };
        assert!(err.to_string().contains("120"));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_simd_conversion() {
        let err: Error = trueno::TruenoError::SizeMismatch {
            expected: 4,
            actual: 3,
        }
        .into();
        assert!(matches!(err, Error::Simd(_)));
        assert!(err.to_string().contains("Size mismatch"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "font.ttf");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
