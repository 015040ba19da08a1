//! Reduction of a lookup-table value blob to one representative scalar.

use crate::record::ArcValue;

/// Token index of the corner cell in a flattened 8x8 table (row 4, col 4).
const CORNER_INDEX_GRID: usize = 27;

/// Token index of the corner cell in a single-row table of at least 4 entries.
const CORNER_INDEX_ROW: usize = 3;

/// Extracts the corner value of a raw `values ( ... )` blob.
///
/// The blob is the flattened body of a Liberty lookup table: numeric
/// tokens separated by whitespace and/or commas, possibly spread over
/// several lines with backslash continuations and quoted rows. The body
/// is normalized (backslashes, quotes, and newlines become spaces) and
/// tokenized, then one token is selected by a fixed rule:
///
/// - more than 27 tokens: token 27, the (4,4) cell of the canonical 8x8
///   receiver-capacitance/transition grid in row-major order;
/// - more than 3 tokens: token 3, the single-row-table equivalent;
/// - anything smaller (or an empty/`N/A` input): [`ArcValue::NotAvailable`].
///
/// The rule assumes the canonical grid shapes of the source libraries and
/// deliberately does not parse table dimensions; tables of other shapes
/// yield a cell from the wrong position or no value at all. Downstream
/// output depends on these exact indices, so they must not change.
pub fn table_corner_value(raw: &str) -> ArcValue {
    if raw.is_empty() || raw == "N/A" {
        return ArcValue::NotAvailable;
    }

    let normalized: String = raw
        .chars()
        .map(|c| match c {
            '\\' | '"' | '\n' => ' ',
            other => other,
        })
        .collect();

    let tokens: Vec<&str> = normalized
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let picked = if tokens.len() > CORNER_INDEX_GRID {
        tokens[CORNER_INDEX_GRID]
    } else if tokens.len() > CORNER_INDEX_ROW {
        tokens[CORNER_INDEX_ROW]
    } else {
        return ArcValue::NotAvailable;
    };

    ArcValue::Scalar(picked.to_string())
}
