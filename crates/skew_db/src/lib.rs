//! Per-corner timing-arc databases and their serialized forms.
//!
//! A [`PinArcDatabase`] maps pin names to their timing arcs in discovery
//! order for one process/voltage/temperature corner. Databases are built
//! once, from a parser record stream or from a previously written JSON
//! file, and then only read. [`corner::load_corners`] assembles the
//! ordered corner set a comparison run operates on, and [`csv`] writes
//! the flat per-record export.

#![warn(missing_docs)]

pub mod corner;
pub mod csv;
pub mod database;

pub use corner::{load_corners, Corner, CornerLoad, CornerLoadError, SkippedCorner};
pub use database::PinArcDatabase;
