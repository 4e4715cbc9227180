//! Bounds-checked readers for the TrueType tables the loader needs.
//!
//! Byte layouts follow the OpenType specification
//! (<https://learn.microsoft.com/en-us/typography/opentype/spec/otff>).
//! Every read returns [`Error::FontTruncated`] instead of panicking on short
//! data.

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::outline::{Contour, DesignBounds, GlyphOutline, OutlinePoint};
use std::ops::Range;

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    data.get(offset)
        .copied()
        .ok_or(Error::FontTruncated { offset, needed: 1 })
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    match offset.checked_add(2).and_then(|end| data.get(offset..end)) {
        Some(&[a, b]) => Ok(u16::from_be_bytes([a, b])),
        _ => Err(Error::FontTruncated { offset, needed: 2 }),
    }
}

pub(crate) fn read_i16(data: &[u8], offset: usize) -> Result<i16> {
    read_u16(data, offset).map(|v| v as i16)
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    match offset.checked_add(4).and_then(|end| data.get(offset..end)) {
        Some(&[a, b, c, d]) => Ok(u32::from_be_bytes([a, b, c, d])),
        _ => Err(Error::FontTruncated { offset, needed: 4 }),
    }
}

/// Byte range of a table, checked against the file length.
pub(crate) fn find_table(data: &[u8], tag: &'static str) -> Result<Range<usize>> {
    let wanted = tag.as_bytes();
    let num_tables = read_u16(data, 4)? as usize;

    for i in 0..num_tables {
        let record = 12 + i * 16;
        let tag_bytes = data
            .get(record..record + 4)
            .ok_or(Error::FontTruncated {
                offset: record,
                needed: 16,
            })?;
        if tag_bytes != wanted {
            continue;
        }

        let offset = read_u32(data, record + 8)? as usize;
        let length = read_u32(data, record + 12)? as usize;
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= data.len())
            .ok_or(Error::FontTruncated {
                offset,
                needed: length,
            })?;
        return Ok(offset..end);
    }

    Err(Error::MissingTable(tag))
}

/// Fields of `head` the loader uses.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Head {
    pub(crate) units_per_em: u16,
    pub(crate) long_loca: bool,
}

impl Head {
    const MAGIC: u32 = 0x5F0F_3CF5;

    pub(crate) fn parse(table: &[u8]) -> Result<Self> {
        if read_u32(table, 12)? != Self::MAGIC {
            return Err(Error::UnsupportedFont("bad head magic number".to_string()));
        }
        Ok(Self {
            units_per_em: read_u16(table, 18)?,
            long_loca: read_i16(table, 50)? != 0,
        })
    }
}

/// `maxp.numGlyphs`.
pub(crate) fn num_glyphs(maxp: &[u8]) -> Result<u16> {
    read_u16(maxp, 4)
}

/// `hhea.numberOfHMetrics`.
pub(crate) fn num_h_metrics(hhea: &[u8]) -> Result<u16> {
    read_u16(hhea, 34)
}

/// Advance width of `glyph` from `hmtx`. Glyphs past the last long metric
/// share its advance.
pub(crate) fn advance_width(hmtx: &[u8], num_h_metrics: u16, glyph: u16) -> Result<u16> {
    let last = num_h_metrics.saturating_sub(1);
    read_u16(hmtx, usize::from(glyph.min(last)) * 4)
}

/// Byte range of `glyph` inside `glyf`, empty for glyphs without outline.
pub(crate) fn glyph_range(loca: &[u8], long: bool, glyph: u16) -> Result<Range<usize>> {
    let i = usize::from(glyph);
    let (start, end) = if long {
        (
            read_u32(loca, i * 4)? as usize,
            read_u32(loca, i * 4 + 4)? as usize,
        )
    } else {
        (
            usize::from(read_u16(loca, i * 2)?) * 2,
            usize::from(read_u16(loca, i * 2 + 2)?) * 2,
        )
    };
    if end < start {
        return Err(Error::UnsupportedFont(format!(
            "glyph {glyph} has a negative loca length"
        )));
    }
    Ok(start..end)
}

/// Locate a Unicode BMP format 4 subtable inside `cmap`.
pub(crate) fn find_unicode_subtable(cmap: &[u8]) -> Result<Range<usize>> {
    let num_tables = read_u16(cmap, 2)? as usize;

    for i in 0..num_tables {
        let record = 4 + i * 8;
        let platform = read_u16(cmap, record)?;
        let encoding = read_u16(cmap, record + 2)?;
        let offset = read_u32(cmap, record + 4)? as usize;

        let unicode = platform == 0 || (platform == 3 && encoding == 1);
        if unicode && read_u16(cmap, offset)? == 4 {
            let length = read_u16(cmap, offset + 2)? as usize;
            let end = (offset + length).min(cmap.len());
            return Ok(offset..end);
        }
    }

    Err(Error::UnsupportedFont(
        "no Unicode format 4 cmap subtable".to_string(),
    ))
}

/// Map a BMP code point through a format 4 subtable. Glyph 0 means missing.
pub(crate) fn format4_lookup(subtable: &[u8], code: u16) -> Result<Option<u16>> {
    let seg_x2 = read_u16(subtable, 6)? as usize;
    let end_codes = 14;
    let start_codes = end_codes + seg_x2 + 2;
    let id_deltas = start_codes + seg_x2;
    let id_range_offsets = id_deltas + seg_x2;

    for seg in 0..seg_x2 / 2 {
        let end = read_u16(subtable, end_codes + seg * 2)?;
        if end < code {
            continue;
        }

        let start = read_u16(subtable, start_codes + seg * 2)?;
        if start > code {
            return Ok(None);
        }

        let delta = read_u16(subtable, id_deltas + seg * 2)?;
        let range_offset_pos = id_range_offsets + seg * 2;
        let range_offset = read_u16(subtable, range_offset_pos)? as usize;

        let glyph = if range_offset == 0 {
            code.wrapping_add(delta)
        } else {
            let addr = range_offset_pos + range_offset + usize::from(code - start) * 2;
            match read_u16(subtable, addr)? {
                0 => 0,
                g => g.wrapping_add(delta),
            }
        };

        return Ok((glyph != 0).then_some(glyph));
    }

    Ok(None)
}

/// Simple-glyph point flags.
struct PointFlag(u8);

impl PointFlag {
    const ON_CURVE: u8 = 0x01;
    const X_SHORT: u8 = 0x02;
    const Y_SHORT: u8 = 0x04;
    const REPEAT: u8 = 0x08;
    const X_SAME_OR_POSITIVE: u8 = 0x10;
    const Y_SAME_OR_POSITIVE: u8 = 0x20;

    fn is(&self, bit: u8) -> bool {
        self.0 & bit != 0
    }
}

/// Decode one coordinate array (x or y) of a simple glyph.
fn read_coordinates(
    data: &[u8],
    cursor: &mut usize,
    flags: &[PointFlag],
    short: u8,
    same_or_positive: u8,
) -> Result<Vec<i32>> {
    let mut value = 0i32;
    let mut coords = Vec::with_capacity(flags.len());

    for flag in flags {
        if flag.is(short) {
            let delta = i32::from(read_u8(data, *cursor)?);
            *cursor += 1;
            value += if flag.is(same_or_positive) {
                delta
            } else {
                -delta
            };
        } else if !flag.is(same_or_positive) {
            value += i32::from(read_i16(data, *cursor)?);
            *cursor += 2;
        }
        coords.push(value);
    }

    Ok(coords)
}

/// Parse the `glyf` record of one glyph.
pub(crate) fn parse_glyph(glyph_id: u16, data: &[u8], advance_width: f32) -> Result<GlyphOutline> {
    if data.is_empty() {
        return Ok(GlyphOutline::empty(advance_width));
    }

    let num_contours = read_i16(data, 0)?;
    if num_contours < 0 {
        return Err(Error::UnsupportedFont(format!(
            "glyph {glyph_id} is a compound glyph"
        )));
    }
    let num_contours = num_contours as usize;

    let bounds = DesignBounds::new(
        i32::from(read_i16(data, 2)?),
        i32::from(read_i16(data, 4)?),
        i32::from(read_i16(data, 6)?),
        i32::from(read_i16(data, 8)?),
    );
    if num_contours == 0 {
        return Ok(GlyphOutline::new(bounds, advance_width, Vec::new()));
    }

    let end_points = (0..num_contours)
        .map(|i| read_u16(data, 10 + i * 2).map(usize::from))
        .collect::<Result<Vec<_>>>()?;
    let num_points = end_points.last().map_or(0, |&last| last + 1);

    let instruction_length = usize::from(read_u16(data, 10 + num_contours * 2)?);
    let mut cursor = 10 + num_contours * 2 + 2 + instruction_length;

    let mut flags = Vec::with_capacity(num_points);
    while flags.len() < num_points {
        let flag = read_u8(data, cursor)?;
        cursor += 1;
        let mut count = 1;
        if flag & PointFlag::REPEAT != 0 {
            count += usize::from(read_u8(data, cursor)?);
            cursor += 1;
        }
        for _ in 0..count.min(num_points - flags.len()) {
            flags.push(PointFlag(flag));
        }
    }

    let xs = read_coordinates(
        data,
        &mut cursor,
        &flags,
        PointFlag::X_SHORT,
        PointFlag::X_SAME_OR_POSITIVE,
    )?;
    let ys = read_coordinates(
        data,
        &mut cursor,
        &flags,
        PointFlag::Y_SHORT,
        PointFlag::Y_SAME_OR_POSITIVE,
    )?;

    let mut contours = Vec::with_capacity(num_contours);
    let mut first = 0;
    for (index, &last) in end_points.iter().enumerate() {
        if last < first || last >= num_points {
            return Err(Error::UnsupportedFont(format!(
                "glyph {glyph_id} has unordered contour end points"
            )));
        }

        let points = (first..=last)
            .map(|i| OutlinePoint {
                position: Point::new(xs[i] as f32, ys[i] as f32),
                on_curve: flags[i].is(PointFlag::ON_CURVE),
            })
            .collect();
        let contour = Contour::new(points).map_err(|_| Error::MalformedContour {
            contour: index,
            points: last + 1 - first,
        })?;
        contours.push(contour);
        first = last + 1;
    }

    Ok(GlyphOutline::new(bounds, advance_width, contours))
}
