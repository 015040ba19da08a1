//! Streaming parser for Liberty (`.lib`) timing-library text.
//!
//! Liberty files describe per-pin timing arcs of a cell library for one
//! process/voltage/temperature corner as deeply nested, brace-delimited
//! groups. This crate consumes a line stream (plain or gzip-compressed,
//! see [`reader`]) and produces normalized [`TimingArcRecord`]s without
//! materializing the file in memory. It recognizes only the subset of
//! constructs needed to fill the fixed arc schema: pin declarations and
//! directions, `timing () { ... }` groups with their `timing_type`,
//! `related_pin`, `mode` and `min_delay_flag` attributes, and the delay,
//! constraint, and on-chip-variation sigma lookup tables, each reduced to
//! a single representative scalar by [`lut::table_corner_value`].
//!
//! The main entry point is [`LibertyStreamParser`], a lazy iterator over
//! completed records.

#![warn(missing_docs)]

pub mod lut;
pub mod parser;
pub mod reader;
pub mod record;
mod scan;

pub use parser::{LibertyStreamParser, ParseStats};
pub use record::{ArcValue, ClockArc, TimingArcRecord, ATTRIBUTE_NAMES};

use thiserror::Error;

/// Errors produced while streaming library text.
#[derive(Debug, Error)]
pub enum LibertyError {
    /// An I/O error occurred while reading the line stream.
    #[error("I/O error while reading library text: {0}")]
    Io(#[from] std::io::Error),
}
