//! Per-row horizontal/vertical scaling mode.

/// Line rendition (DECSWL / DECDWL / DECDHL).
///
/// Stored on the row, consumed only by the renderer; the row's own column
/// math is unaffected by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineRendition {
    /// Normal single-width, single-height line.
    #[default]
    SingleWidth,
    /// Double-width line (DECDWL).
    DoubleWidth,
    /// Top half of a double-height line (DECDHL).
    DoubleHeightTop,
    /// Bottom half of a double-height line (DECDHL).
    DoubleHeightBottom,
}
