//! TrueType outline source.
//!
//! Loads `glyf`-flavoured TrueType files and serves simple-glyph outlines in
//! design units. Supported tables: `head`, `maxp`, `hhea`, `hmtx`, `loca`,
//! `glyf` and a Unicode format 4 `cmap` subtable. Compound glyphs and CFF
//! outlines are reported as [`Error::UnsupportedFont`].

mod tables;

use crate::error::{Error, Result};
use crate::outline::{GlyphOutline, OutlineSource};
use std::ops::Range;
use std::path::Path;

const SFNT_TRUETYPE: u32 = 0x0001_0000;
const SFNT_APPLE_TRUE: u32 = u32::from_be_bytes(*b"true");
const SFNT_CFF: u32 = u32::from_be_bytes(*b"OTTO");

/// A parsed TrueType font.
///
/// The file bytes are kept as-is; glyphs are decoded on lookup.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Vec<u8>,
    units_per_em: u16,
    num_glyphs: u16,
    num_h_metrics: u16,
    long_loca: bool,
    loca: Range<usize>,
    glyf: Range<usize>,
    hmtx: Range<usize>,
    cmap: Range<usize>,
}

impl TrueTypeFont {
    /// Parse a font from its file contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTable`] when a required table is absent,
    /// [`Error::FontTruncated`] when a table runs past the end of the data and
    /// [`Error::UnsupportedFont`] for non-TrueType outlines or a font without
    /// a Unicode BMP character map.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        match tables::read_u32(&data, 0)? {
            SFNT_TRUETYPE | SFNT_APPLE_TRUE => {}
            SFNT_CFF => return Err(Error::UnsupportedFont("CFF outlines".to_string())),
            other => {
                return Err(Error::UnsupportedFont(format!(
                    "unknown sfnt version {other:#010x}"
                )));
            }
        }

        let head = tables::Head::parse(&data[tables::find_table(&data, "head")?])?;
        let num_glyphs = tables::num_glyphs(&data[tables::find_table(&data, "maxp")?])?;
        let num_h_metrics = tables::num_h_metrics(&data[tables::find_table(&data, "hhea")?])?;
        if num_h_metrics == 0 {
            return Err(Error::UnsupportedFont(
                "hhea declares no horizontal metrics".to_string(),
            ));
        }

        let loca = tables::find_table(&data, "loca")?;
        let glyf = tables::find_table(&data, "glyf")?;
        let hmtx = tables::find_table(&data, "hmtx")?;

        let cmap_table = tables::find_table(&data, "cmap")?;
        let subtable = tables::find_unicode_subtable(&data[cmap_table.clone()])?;
        let cmap = cmap_table.start + subtable.start..cmap_table.start + subtable.end;

        log::debug!(
            "loaded TrueType font: {num_glyphs} glyphs, {} units/em, {} loca",
            head.units_per_em,
            if head.long_loca { "long" } else { "short" }
        );

        Ok(Self {
            data,
            units_per_em: head.units_per_em,
            num_glyphs,
            num_h_metrics,
            long_loca: head.long_loca,
            loca,
            glyf,
            hmtx,
            cmap,
        })
    }

    /// Read and parse a font file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a usable font.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::debug!("reading font {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data)
    }

    /// Number of glyphs in the font.
    #[must_use]
    pub const fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    /// Glyph index for `ch`, or `None` when the character map has no entry.
    ///
    /// Characters outside the Basic Multilingual Plane are never mapped.
    #[must_use]
    pub fn glyph_index(&self, ch: char) -> Option<u16> {
        let code = u16::try_from(u32::from(ch)).ok()?;
        match tables::format4_lookup(&self.data[self.cmap.clone()], code) {
            Ok(glyph) => glyph.filter(|&g| g < self.num_glyphs),
            Err(e) => {
                log::debug!("cmap lookup for {ch:?} failed: {e}");
                None
            }
        }
    }

    /// Decode the outline of glyph `glyph`.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-range glyph ids, compound glyphs or
    /// corrupt glyph data.
    pub fn glyph_outline(&self, glyph: u16) -> Result<GlyphOutline> {
        if glyph >= self.num_glyphs {
            return Err(Error::UnsupportedFont(format!(
                "glyph {glyph} out of range ({} glyphs)",
                self.num_glyphs
            )));
        }

        let advance = tables::advance_width(
            &self.data[self.hmtx.clone()],
            self.num_h_metrics,
            glyph,
        )?;
        let range = tables::glyph_range(&self.data[self.loca.clone()], self.long_loca, glyph)?;
        let glyf = &self.data[self.glyf.clone()];
        let bytes = glyf.get(range.clone()).ok_or(Error::FontTruncated {
            offset: self.glyf.start + range.start,
            needed: range.len(),
        })?;

        tables::parse_glyph(glyph, bytes, f32::from(advance))
    }
}

impl OutlineSource for TrueTypeFont {
    fn outline(&self, ch: char) -> Option<GlyphOutline> {
        let glyph = self.glyph_index(ch)?;
        match self.glyph_outline(glyph) {
            Ok(outline) => Some(outline),
            Err(e) => {
                log::warn!("glyph {glyph} for {ch:?} is unusable: {e}");
                None
            }
        }
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
}
