//! # Trueno-Glyph
//!
//! Scanline glyph rasterizer: quadratic-Bézier font outlines in, binary
//! coverage masks and RGBA pixel buffers out.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library for its
//! SIMD compositing. No GPU or windowing dependencies.
//!
//! ## Pipeline
//!
//! 1. An [`OutlineSource`](outline::OutlineSource) (an in-memory
//!    [`GlyphTable`](outline::GlyphTable) or a [`TrueTypeFont`](truetype::TrueTypeFont))
//!    supplies a glyph's contours, bounding box and advance.
//! 2. [`contour::build`] expands raw points into quadratic segments at a
//!    pixel scale, inserting implied on-curve midpoints.
//! 3. [`render::rasterize`] samples every edge, buckets crossings per row and
//!    fills with last-crossing-wins direction semantics.
//! 4. [`assemble`] turns coverage masks into textures or composes a line of
//!    glyphs into a destination [`PixelBuffer`](pixel_buffer::PixelBuffer).
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_glyph::prelude::*;
//!
//! let square = GlyphOutline::from_points(
//!     120.0,
//!     vec![vec![
//!         OutlinePoint::on(0.0, 0.0),
//!         OutlinePoint::on(0.0, 100.0),
//!         OutlinePoint::on(100.0, 100.0),
//!         OutlinePoint::on(100.0, 0.0),
//!     ]],
//! )?;
//!
//! let bitmap = rasterize_glyph(&square, 0.25)?;
//! assert!(bitmap.covered_count() > 0);
//!
//! let texture = to_texture(&bitmap, Rgba::WHITE);
//! assert!(texture.is_some());
//! # Ok::<(), trueno_glyph::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config` (default): YAML loading for [`RasterConfig`](config::RasterConfig)
//! - `cli`: the `glyph-raster` command-line tool

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in rasterization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and coverage modulation.
pub mod color;

/// Points and quadratic segments.
pub mod geometry;

/// Glyph outline data model and outline sources.
pub mod outline;

/// SIMD-aligned RGBA pixel buffer.
pub mod pixel_buffer;

// ============================================================================
// Rasterization Modules
// ============================================================================

/// Contour building: raw outline points to scaled quadratic segments.
pub mod contour;

/// Scanline rasterization into coverage bitmaps.
pub mod render;

/// Bitmap assembly: textures and line composition.
pub mod assemble;

// ============================================================================
// I/O Modules
// ============================================================================

/// TrueType font loading.
pub mod truetype;

/// Output encoders (PNG).
pub mod output;

/// Rasterizer configuration.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-glyph operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use trueno_glyph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assemble::{compose_line, measure_line, render_text, to_texture, LineGlyph};
    pub use crate::color::Rgba;
    pub use crate::config::RasterConfig;
    pub use crate::contour::{FlattenedContour, PixelBounds};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Point, QuadSegment};
    pub use crate::outline::{
        Contour, DesignBounds, GlyphOutline, GlyphTable, OutlinePoint, OutlineSource,
    };
    pub use crate::output::PngEncoder;
    pub use crate::pixel_buffer::PixelBuffer;
    pub use crate::render::{rasterize, rasterize_glyph, CoverageBitmap};
    pub use crate::truetype::TrueTypeFont;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

// ============================================================================
// Tests
// ============================================================================
