//! Error types for row operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RowError>;

/// Errors surfaced by [`Row`](crate::Row) operations.
///
/// The glyph writer itself never fails: every overlapping write is
/// resolvable by blank padding, so there is no "write rejected" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("column {column} out of range for row of width {width}")]
    ColumnOutOfRange { column: u16, width: u16 },

    #[error("cannot re-flow row to width {width}: {reason}")]
    ResizeFailed { width: u16, reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::RowError;

    #[test]
    fn column_out_of_range_names_both_bounds() {
        let error = RowError::ColumnOutOfRange {
            column: 12,
            width: 10,
        };
        assert_eq!(
            error.to_string(),
            "column 12 out of range for row of width 10"
        );
    }

    #[test]
    fn resize_failed_carries_reason() {
        let error = RowError::ResizeFailed {
            width: 5,
            reason: "width runs do not cover the row",
        };
        assert!(error.to_string().contains("width 5"));
        assert!(error.to_string().contains("cover"));
    }
}
