#![forbid(unsafe_code)]

//! Column-addressed row storage for a terminal screen buffer.
//!
//! A [`Row`] stores one display line as UTF-16 code units plus a
//! run-length-encoded width table mapping code units to columns. On top of
//! that it provides damage-aware glyph overwrites (partial overwrites of
//! wide glyphs are repaired with blank fill), lifecycle operations
//! (reset/resize/clear), and DBCS / word-delimiter classification.
//!
//! The per-column attribute store ([`AttrRow`]) is modeled as an external
//! collaborator: the surrounding buffer owns it and passes it into the
//! operations that must keep the two structures aligned.
//!
//! Scrollback, cursors, escape parsing, rendering, and wrap *policy* live
//! in the surrounding buffer; only the flags recording that a wrap or pad
//! occurred are stored here.

pub mod attrs;
pub mod cell;
pub mod error;
pub mod rendition;
pub mod rle;
pub mod row;

pub use attrs::{AttrRow, Color, SgrFlags, TextAttribute};
pub use cell::{BLANK, RowCell, measure_columns};
pub use error::{Result, RowError};
pub use rendition::LineRendition;
pub use rle::{Rle, Run};
pub use row::{ColumnLookup, DbcsAttr, DelimiterClass, Row};
