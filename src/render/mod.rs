//! Glyph rasterization.
//!
//! Turns flattened contours into binary coverage masks.
//!
//! # Algorithm
//!
//! - **Sampling**: each quadratic edge is evaluated at `2 * chord + 1` evenly
//!   spaced parameters; horizontal edges are skipped.
//! - **Bucketing**: samples become crossing events on their pixel row.
//! - **Sweep**: rows are sorted by x and filled with last-crossing-wins
//!   direction semantics.

mod coverage;
mod scanline;

pub use coverage::CoverageBitmap;
pub use scanline::{rasterize, rasterize_glyph, sample_count, CrossingEvent, CrossingTable};
