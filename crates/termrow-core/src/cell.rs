//! Measured glyph cells for bulk row writes.
//!
//! A [`RowCell`] is one already-segmented glyph: its UTF-16 code units, the
//! number of columns it occupies, and the attributes to paint those columns
//! with. Grapheme segmentation and width determination happen upstream; the
//! row trusts the span it is handed. [`RowCell::new`] measures with
//! `unicode-width` as a convenience for callers that deal in plain text.

use smallvec::SmallVec;
use unicode_width::UnicodeWidthStr;

use crate::attrs::TextAttribute;

/// The blank code unit used for erased columns and damage fill.
pub const BLANK: u16 = 0x20;

/// Measure how many columns `glyph` occupies on screen.
///
/// Zero-width input (a lone combining mark, an empty string) is clamped to
/// one column: every cell written to a row must cover at least one column.
pub fn measure_columns(glyph: &str) -> u8 {
    let width = UnicodeWidthStr::width(glyph);
    u8::try_from(width.clamp(1, 3)).unwrap_or(1)
}

/// One glyph to be written into a row: code units, column span, attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCell {
    glyph: SmallVec<[u16; 2]>,
    columns: u8,
    pub attrs: TextAttribute,
}

impl RowCell {
    /// Create a cell from text, measuring its column span.
    pub fn new(glyph: &str, attrs: TextAttribute) -> Self {
        Self::with_columns(glyph, measure_columns(glyph), attrs)
    }

    /// Create a cell with a caller-supplied column span.
    pub fn with_columns(glyph: &str, columns: u8, attrs: TextAttribute) -> Self {
        let mut units: SmallVec<[u16; 2]> = glyph.encode_utf16().collect();
        if units.is_empty() {
            units.push(BLANK);
        }
        Self {
            glyph: units,
            columns,
            attrs,
        }
    }

    /// A single-column blank cell.
    pub fn blank(attrs: TextAttribute) -> Self {
        Self {
            glyph: SmallVec::from_slice(&[BLANK]),
            columns: 1,
            attrs,
        }
    }

    /// The glyph's UTF-16 code units. Never empty.
    pub fn glyph(&self) -> &[u16] {
        &self.glyph
    }

    /// Columns this glyph occupies.
    pub fn columns(&self) -> u8 {
        self.columns
    }
}
