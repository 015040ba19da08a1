//! Cross-corner verification and analysis of timing-arc databases.
//!
//! Operates purely on already-built [`skew_db`] corner sets. The
//! [`consistency`] module walks the pin/related-pin graph depth-first and
//! checks that every visited pin, its arc count, and every arc's
//! related-pin chain agree across all corners, reporting divergences as
//! structured [`TraceEvent`]s. The [`spread`] module extracts one named
//! attribute across corners and computes its pooled numeric spread.

#![warn(missing_docs)]

pub mod consistency;
pub mod spread;
pub mod trace;

pub use consistency::verify_chain;
pub use spread::{attribute_spread, attribute_values, CornerValues, SpreadReport};
pub use trace::TraceEvent;
