//! One row of the screen buffer: column-addressed text storage.
//!
//! A row reconciles two addressing schemes. The terminal addresses it in
//! fixed-width display *columns*; the backing store is a variable-length
//! sequence of UTF-16 *code units*, where a glyph may span one to three
//! columns and one or more units. The bridge is the width-run table: a
//! run-length-encoded record of how many columns each contiguous group of
//! code units occupies. A run value of 1..3 marks the leading unit of a
//! glyph that wide; 0 marks a trailing unit contributing no columns.
//!
//! Overwrites may cut existing wide glyphs in half. The glyph writer
//! computes that "damage" and repairs it with blank fill, so no surviving
//! glyph is ever left split by a run boundary.
//!
//! The per-column attribute store ([`AttrRow`]) is owned by the surrounding
//! buffer and passed in wherever the two must stay in lockstep.

use smallvec::SmallVec;

use crate::attrs::{AttrRow, TextAttribute};
use crate::cell::{BLANK, RowCell};
use crate::error::{Result, RowError};
use crate::rendition::LineRendition;
use crate::rle::{Rle, Run};

/// DBCS span classification of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbcsAttr {
    /// The sole column of a single-width glyph.
    Single,
    /// The leading column of a multi-column glyph.
    Leading,
    /// A trailing column of a multi-column glyph.
    Trailing,
}

/// Word-boundary classification of a column's glyph.
///
/// Used by double-click selection and word-wise navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterClass {
    /// First code unit is U+0020 or below.
    ControlChar,
    /// First code unit is in the caller-supplied delimiter set.
    DelimiterChar,
    /// Anything else.
    RegularChar,
}

/// Result of resolving a column to its backing code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLookup {
    /// Code-unit offset of the glyph's leading unit (or of the unmapped
    /// tail, see [`ColumnLookup::is_unmapped`]).
    pub offset: usize,
    /// Code-unit length of the glyph, including trailing units.
    pub len: usize,
    /// How far into a multi-column glyph the requested column sits:
    /// 0 for the leading column, 1..N-1 inside.
    pub glyph_offset: u8,
    /// Total column width of the glyph at this position.
    pub columns: u8,
}

impl ColumnLookup {
    /// Whether the requested column lies past every recorded run.
    ///
    /// `offset`/`len` then describe the unmapped tail of the backing text:
    /// data may exist there, but no column count can be answered for it.
    pub fn is_unmapped(&self) -> bool {
        self.columns == 0
    }
}

/// One fixed-width display line of the screen buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Declared column count. Immutable between resizes.
    width: u16,
    /// UTF-16 code units backing the row's glyphs.
    data: Vec<u16>,
    /// Columns-per-code-unit, run-length encoded.
    widths: Rle<u8>,
    /// The owning buffer ran out of columns and wrapped output to the next
    /// row mid-line.
    wrap_forced: bool,
    /// A wide glyph did not fit in the last column and the row was padded.
    double_byte_padded: bool,
    /// Horizontal/vertical scaling tag, consumed by the renderer.
    rendition: LineRendition,
    /// Rightmost column ever written (exclusive).
    max_written: u16,
}

impl Row {
    /// Create a blank row of `width` columns.
    pub fn new(width: u16) -> Self {
        Self {
            width,
            data: vec![BLANK; usize::from(width)],
            widths: Rle::with_run(1, usize::from(width)),
            wrap_forced: false,
            double_byte_padded: false,
            rendition: LineRendition::SingleWidth,
            max_written: 0,
        }
    }

    /// Declared column count.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The backing UTF-16 code units.
    #[inline]
    pub fn code_units(&self) -> &[u16] {
        &self.data
    }

    /// The width runs, for diagnostics and invariant checks.
    #[inline]
    pub fn width_runs(&self) -> &[Run<u8>] {
        self.widths.runs()
    }

    /// Total columns covered by the width runs.
    pub fn covered_columns(&self) -> usize {
        self.widths
            .runs()
            .iter()
            .map(|run| usize::from(run.value) * run.length)
            .sum()
    }

    /// The full row text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf16_lossy(&self.data)
    }

    /// Rightmost column ever written (exclusive). 0 for an untouched row.
    #[inline]
    pub fn max_written_column(&self) -> u16 {
        self.max_written
    }

    pub fn wrap_forced(&self) -> bool {
        self.wrap_forced
    }

    /// Record that output wrapped to the next row mid-line. Set by the
    /// owning buffer's line-filling logic.
    pub fn set_wrap_forced(&mut self, wrap: bool) {
        self.wrap_forced = wrap;
    }

    pub fn double_byte_padded(&self) -> bool {
        self.double_byte_padded
    }

    /// Record that the row was padded because a wide glyph did not fit.
    pub fn set_double_byte_padded(&mut self, padded: bool) {
        self.double_byte_padded = padded;
    }

    pub fn line_rendition(&self) -> LineRendition {
        self.rendition
    }

    pub fn set_line_rendition(&mut self, rendition: LineRendition) {
        self.rendition = rendition;
    }

    // ── Column index resolution ─────────────────────────────────────

    /// Resolve a column to the code-unit range backing its glyph.
    ///
    /// Walks the width runs accumulating `width * length` per run, so the
    /// cost is proportional to the number of width transitions in the row,
    /// not to the row width. If the matched run is immediately followed by
    /// a width-0 run, the returned length extends over it (multi-unit
    /// glyph). A column past every recorded run yields the unmapped-tail
    /// sentinel described on [`ColumnLookup::is_unmapped`].
    pub fn lookup(&self, col: u16) -> ColumnLookup {
        let col = usize::from(col);
        let runs = self.widths.runs();
        let mut cur_col = 0;
        let mut cur_unit = 0;
        let mut matched = None;
        for (i, run) in runs.iter().enumerate() {
            let cols_covered = usize::from(run.value) * run.length;
            if cur_col + cols_covered > col {
                matched = Some((i, run));
                break;
            }
            cur_col += cols_covered;
            cur_unit += run.length;
        }

        let Some((idx, run)) = matched else {
            // Somebody asked for a column we cannot answer for. The text
            // may still hold data past the runs; report where it starts
            // and how far it extends so callers can measure it.
            return ColumnLookup {
                offset: cur_unit,
                len: self.data.len() - cur_unit,
                glyph_offset: 0,
                columns: 0,
            };
        };

        // A width-0 run covers no columns, so the matched run's value is
        // always at least 1 and the division below is safe.
        let width = usize::from(run.value);
        let cols_into_run = col - cur_col;
        let offset = cur_unit + cols_into_run / width;

        let mut len = 1;
        // Only the run's last glyph can own trailing units in the next run.
        let cols_consumed = cols_into_run + width;
        if cols_consumed >= width * run.length
            && let Some(next) = runs.get(idx + 1)
            && next.value == 0
        {
            len += next.length;
        }

        ColumnLookup {
            offset,
            len,
            glyph_offset: u8::try_from(cols_into_run % width).unwrap_or(0),
            columns: run.value,
        }
    }

    // ── Glyph writes ────────────────────────────────────────────────

    /// Overwrite `columns` columns starting at `col` with one glyph.
    ///
    /// `glyph` is the glyph's UTF-16 code units (one or more, as handed to
    /// us already segmented and measured). The write always succeeds:
    /// existing glyphs cut in half by the new span (a wide glyph whose
    /// leading or trailing column is overwritten) are "damage", and their
    /// surviving columns are repaired with blank fill.
    ///
    /// Returns the code-unit offset one past the written glyph and the
    /// next column index. The span is trusted; callers must keep
    /// `col + columns` within the declared width.
    pub fn write_glyph(&mut self, col: u16, columns: u8, glyph: &[u16]) -> (usize, u16) {
        debug_assert!(!glyph.is_empty());
        debug_assert!(columns >= 1);
        debug_assert!(
            usize::from(col) + usize::from(columns) <= usize::from(self.width),
            "glyph span {col}+{columns} exceeds row width {}",
            self.width
        );

        let col = usize::from(col);
        let span = usize::from(columns);
        let hit = self.lookup(col_u16(col));
        let begin = hit.offset;
        let mut len = hit.len;

        // Damage extents: every column whose current glyph the new span
        // invalidates. Starts at the left edge of whatever glyph sits at
        // `col` and walks right until the write span is covered.
        let min_damage;
        let mut max_damage;
        if hit.is_unmapped() {
            min_damage = col;
            max_damage = col + span;
        } else {
            min_damage = col - usize::from(hit.glyph_offset);
            max_damage = min_damage + usize::from(hit.columns);
            while max_damage < col + span {
                let next = self.lookup(col_u16(max_damage));
                len += next.len;
                if next.is_unmapped() {
                    max_damage = col + span;
                } else {
                    max_damage += usize::from(next.columns);
                }
            }
        }

        if min_damage == col && max_damage == col + span {
            // Exact fit: the damaged glyphs cover precisely the written
            // span. Splice the code units in place and replace the runs
            // with the glyph's leading unit plus its trailers.
            self.data.splice(begin..begin + len, glyph.iter().copied());
            let new_runs = [Run::new(columns, 1), Run::new(0, glyph.len() - 1)];
            let count = if glyph.len() == 1 { 1 } else { 2 };
            self.widths.splice(begin, begin + len, &new_runs[..count]);
        } else {
            // Spillover: the write cuts into neighbors. Blank-fill the
            // damaged-but-unwritten columns on the left and right.
            let left = col - min_damage;
            let right = max_damage - (col + span);
            let mut replacement: SmallVec<[u16; 8]> =
                SmallVec::with_capacity(left + glyph.len() + right);
            replacement.extend(std::iter::repeat_n(BLANK, left));
            replacement.extend_from_slice(glyph);
            replacement.extend(std::iter::repeat_n(BLANK, right));

            let mut new_runs: SmallVec<[Run<u8>; 4]> = SmallVec::new();
            if left > 0 {
                new_runs.push(Run::new(1, left));
            }
            new_runs.push(Run::new(columns, 1));
            if glyph.len() > 1 {
                new_runs.push(Run::new(0, glyph.len() - 1));
            }
            if right > 0 {
                new_runs.push(Run::new(1, right));
            }

            self.data
                .splice(begin..begin + len, replacement.iter().copied());
            self.widths.splice(begin, begin + len, &new_runs);
        }

        if self.widths.len() != self.data.len() {
            tracing::debug!(
                runs = self.widths.len(),
                units = self.data.len(),
                "repairing width-run skew after splice"
            );
            if self.widths.len() > self.data.len() {
                self.widths.truncate(self.data.len());
            } else {
                self.widths.extend_with(0, self.data.len() - self.widths.len());
            }
        }

        self.max_written = self.max_written.max(col_u16(max_damage));
        (begin + glyph.len(), col_u16(col + span))
    }

    /// Convenience wrapper over [`Row::write_glyph`] taking text.
    pub fn write_glyph_str(&mut self, col: u16, columns: u8, glyph: &str) -> (usize, u16) {
        let units: SmallVec<[u16; 2]> = glyph.encode_utf16().collect();
        self.write_glyph(col, columns, &units)
    }

    /// Overwrite a single column with a blank.
    pub fn clear_column(&mut self, col: u16) {
        if col < self.width {
            self.write_glyph(col, 1, &[BLANK]);
        }
    }

    /// Write a sequence of measured cells starting at `start`.
    ///
    /// Iterates the single-glyph writer and paints each cell's attributes
    /// over its span. Writing stops at `limit_right` (clamped to the row
    /// width). A wide glyph that no longer fits in the remaining columns is
    /// replaced by blank padding carrying its attributes; when that happens
    /// at the true row end, `double_byte_padded` is recorded. If `wrap` is
    /// given and the write reaches the right limit, the wrap-forced flag is
    /// stored.
    ///
    /// Returns the number of cells fully consumed, so the caller can resume
    /// the remainder on the next row.
    pub fn write_cells(
        &mut self,
        attrs: &mut AttrRow,
        cells: &[RowCell],
        start: u16,
        wrap: Option<bool>,
        limit_right: Option<u16>,
    ) -> usize {
        let right = limit_right.map_or(self.width, |limit| limit.min(self.width));
        let mut col = start.min(right);
        let mut consumed = 0;

        for cell in cells {
            if col >= right {
                break;
            }
            let span = u16::from(cell.columns());
            // Compared in usize: `col + span` can overflow u16 when a wide
            // cell starts in the last columns of a maximum-width row.
            if usize::from(col) + usize::from(span) > usize::from(right) {
                // The glyph would spill past the limit. Pad what is left
                // and hand the cell back to the caller.
                for c in col..right {
                    self.clear_column(c);
                }
                attrs.set_range(col, right, cell.attrs);
                if right == self.width {
                    self.double_byte_padded = true;
                }
                col = right;
                break;
            }
            self.write_glyph(col, cell.columns(), cell.glyph());
            attrs.set_range(col, col + span, cell.attrs);
            col += span;
            consumed += 1;
        }

        if let Some(wrap) = wrap
            && col >= right
        {
            self.wrap_forced = wrap;
        }
        consumed
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Collapse the row to a full-width blank run and reset the attribute
    /// store to `fill` at the same call boundary.
    ///
    /// Returns whether either structure actually changed, so callers can
    /// skip redundant redraws.
    pub fn reset(&mut self, attrs: &mut AttrRow, fill: TextAttribute) -> bool {
        let width = usize::from(self.width);
        let blank = self.data.len() == width
            && self.data.iter().all(|&unit| unit == BLANK)
            && self.widths.len() == width
            && self.widths.runs().iter().all(|run| run.value == 1)
            && self.widths.run_count() <= 1;
        let row_changed = !blank
            || self.wrap_forced
            || self.double_byte_padded
            || self.rendition != LineRendition::SingleWidth
            || self.max_written != 0;

        if row_changed {
            self.data.clear();
            self.data.resize(width, BLANK);
            self.widths = Rle::with_run(1, width);
            self.wrap_forced = false;
            self.double_byte_padded = false;
            self.rendition = LineRendition::SingleWidth;
            self.max_written = 0;
        }

        let attrs_changed = attrs.reset(fill);
        tracing::trace!(width, changed = row_changed || attrs_changed, "row reset");
        row_changed || attrs_changed
    }

    /// Re-flow the row to `new_width` columns and resize the attribute
    /// store identically.
    ///
    /// Growing pads with blank single-width columns. Shrinking truncates at
    /// the glyph covering the new boundary; a wide glyph straddling it has
    /// its retained columns blank-filled. On failure the row is left in its
    /// prior, consistent state.
    pub fn resize(&mut self, new_width: u16, attrs: &mut AttrRow) -> Result<()> {
        if new_width > self.width {
            let pad = usize::from(new_width) - usize::from(self.width);
            self.data.extend(std::iter::repeat_n(BLANK, pad));
            self.widths.extend_with(1, pad);
        } else if new_width < self.width {
            let hit = self.lookup(new_width);
            if hit.is_unmapped() {
                return Err(RowError::ResizeFailed {
                    width: new_width,
                    reason: "width runs do not cover the new boundary",
                });
            }
            // `hit.offset` is the leading unit of the glyph covering the
            // boundary; everything from there on is cut. A straddled wide
            // glyph leaves `glyph_offset` retained columns to blank-fill.
            let keep_units = hit.offset;
            let fill_cols = usize::from(hit.glyph_offset);
            self.data.truncate(keep_units);
            self.widths.truncate(keep_units);
            self.data.extend(std::iter::repeat_n(BLANK, fill_cols));
            self.widths.extend_with(1, fill_cols);
            self.max_written = self.max_written.min(new_width);
        }

        self.width = new_width;
        attrs.resize(new_width);
        tracing::trace!(width = new_width, "row resized");
        Ok(())
    }

    // ── Classification ──────────────────────────────────────────────

    /// The code units of the glyph at `col`.
    ///
    /// Empty only when `col` is past both the recorded runs and the end of
    /// the backing text.
    pub fn glyph_at(&self, col: u16) -> &[u16] {
        let hit = self.lookup(col);
        &self.data[hit.offset..hit.offset + hit.len]
    }

    /// DBCS span classification of `col`.
    pub fn dbcs_attr_at(&self, col: u16) -> DbcsAttr {
        let hit = self.lookup(col);
        if hit.glyph_offset >= 1 {
            DbcsAttr::Trailing
        } else if hit.columns > 1 {
            DbcsAttr::Leading
        } else {
            DbcsAttr::Single
        }
    }

    /// Word-delimiter classification of the glyph at `col`.
    ///
    /// Classifies the glyph's first code unit: at or below U+0020 is a
    /// control character, membership in `delimiters` makes a delimiter,
    /// anything else is regular text.
    pub fn delimiter_class_at(&self, col: u16, delimiters: &str) -> Result<DelimiterClass> {
        if col >= self.width {
            return Err(RowError::ColumnOutOfRange {
                column: col,
                width: self.width,
            });
        }
        let unit = self.glyph_at(col).first().copied().unwrap_or(BLANK);
        if unit <= BLANK {
            return Ok(DelimiterClass::ControlChar);
        }
        let is_delimiter =
            char::from_u32(u32::from(unit)).is_some_and(|ch| delimiters.contains(ch));
        Ok(if is_delimiter {
            DelimiterClass::DelimiterChar
        } else {
            DelimiterClass::RegularChar
        })
    }
}

/// Saturating conversion for column math done in `usize`.
#[inline]
fn col_u16(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}
