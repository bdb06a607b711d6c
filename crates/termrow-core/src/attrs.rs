//! Text attributes and the per-row attribute store.
//!
//! The attribute store is a collaborator of [`Row`](crate::Row), not a part
//! of it: the surrounding buffer owns one [`AttrRow`] per row and passes it
//! into `reset`/`resize`/`write_cells` so the two structures stay aligned
//! to the declared width at the same call boundary. Attributes are indexed
//! by *column*, independent of how many code units back those columns.

use bitflags::bitflags;

use crate::rle::Rle;

bitflags! {
    /// SGR text attribute flags.
    ///
    /// Maps directly to the ECMA-48 / VT100 SGR parameter values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SgrFlags: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const INVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

/// Color representation for terminal cells.
///
/// Supports the standard terminal color model hierarchy:
/// default → 16 named → 256 indexed → 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Terminal default (SGR 39 / SGR 49).
    #[default]
    Default,
    /// Named color index (0-15): standard 8 + bright 8.
    Named(u8),
    /// 256-color palette index (0-255).
    Indexed(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

/// Attributes applied to one or more columns: flags + colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextAttribute {
    pub flags: SgrFlags,
    pub fg: Color,
    pub bg: Color,
}

impl TextAttribute {
    /// Attributes with only a background color set (erase fills).
    pub fn with_bg(bg: Color) -> Self {
        Self {
            bg,
            ..Self::default()
        }
    }
}

/// Per-row, per-column attribute store, run-length encoded.
///
/// Always exactly as long as the row's declared width. The row instructs
/// this store to reset/resize whenever the row itself is reset/resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrRow {
    attrs: Rle<TextAttribute>,
}

impl AttrRow {
    /// Create a store of `width` columns, all set to `fill`.
    pub fn new(width: u16, fill: TextAttribute) -> Self {
        Self {
            attrs: Rle::with_run(fill, usize::from(width)),
        }
    }

    /// Number of columns covered.
    pub fn width(&self) -> u16 {
        u16::try_from(self.attrs.len()).unwrap_or(u16::MAX)
    }

    /// Attribute at a column, or `None` out of bounds.
    pub fn at(&self, col: u16) -> Option<TextAttribute> {
        self.attrs.get(usize::from(col))
    }

    /// Number of distinct attribute runs.
    pub fn run_count(&self) -> usize {
        self.attrs.run_count()
    }

    /// Collapse to a single full-width run of `fill`.
    ///
    /// Returns whether the stored state changed.
    pub fn reset(&mut self, fill: TextAttribute) -> bool {
        let width = self.attrs.len();
        let blank = Rle::with_run(fill, width);
        if self.attrs == blank {
            return false;
        }
        self.attrs = blank;
        true
    }

    /// Re-fit to `new_width` columns.
    ///
    /// Shrinking truncates; growing extends with the attribute of the last
    /// run, so a row erased in color keeps that color across a widen.
    pub fn resize(&mut self, new_width: u16) {
        let fill = self
            .attrs
            .runs()
            .last()
            .map_or_else(TextAttribute::default, |run| run.value);
        self.attrs.resize_with(usize::from(new_width), fill);
    }

    /// Apply `attr` to the columns `[start, end)`, clamped to the width.
    pub fn set_range(&mut self, start: u16, end: u16, attr: TextAttribute) {
        self.attrs
            .set_range(usize::from(start), usize::from(end), attr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_covers_width_with_fill() {
        let fill = TextAttribute::with_bg(Color::Named(4));
        let attrs = AttrRow::new(10, fill);
        assert_eq!(attrs.width(), 10);
        assert_eq!(attrs.run_count(), 1);
        assert_eq!(attrs.at(0), Some(fill));
        assert_eq!(attrs.at(9), Some(fill));
        assert_eq!(attrs.at(10), None);
    }

    #[test]
    fn set_range_splits_runs() {
        let mut attrs = AttrRow::new(8, TextAttribute::default());
        let bold = TextAttribute {
            flags: SgrFlags::BOLD,
            ..TextAttribute::default()
        };
        attrs.set_range(2, 5, bold);
        assert_eq!(attrs.at(1), Some(TextAttribute::default()));
        assert_eq!(attrs.at(2), Some(bold));
        assert_eq!(attrs.at(4), Some(bold));
        assert_eq!(attrs.at(5), Some(TextAttribute::default()));
        assert_eq!(attrs.width(), 8);
    }

    #[test]
    fn reset_reports_change() {
        let mut attrs = AttrRow::new(4, TextAttribute::default());
        assert!(!attrs.reset(TextAttribute::default()));
        attrs.set_range(0, 2, TextAttribute::with_bg(Color::Named(1)));
        assert!(attrs.reset(TextAttribute::default()));
        assert_eq!(attrs.run_count(), 1);
    }

    #[test]
    fn resize_grows_with_last_run_attribute() {
        let red = TextAttribute::with_bg(Color::Named(1));
        let mut attrs = AttrRow::new(4, TextAttribute::default());
        attrs.set_range(2, 4, red);
        attrs.resize(6);
        assert_eq!(attrs.width(), 6);
        assert_eq!(attrs.at(4), Some(red));
        assert_eq!(attrs.at(5), Some(red));
    }

    #[test]
    fn resize_shrinks() {
        let mut attrs = AttrRow::new(6, TextAttribute::default());
        attrs.set_range(4, 6, TextAttribute::with_bg(Color::Named(2)));
        attrs.resize(3);
        assert_eq!(attrs.width(), 3);
        assert_eq!(attrs.at(2), Some(TextAttribute::default()));
        assert_eq!(attrs.at(3), None);
    }
}
