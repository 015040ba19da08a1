//! Normalized timing-arc records and their wire representation.
//!
//! A [`TimingArcRecord`] is one completed timing arc for one pin. Absent
//! values are explicit in the type system (`Option`/[`ArcValue`]) but
//! serialize as the literal string `"N/A"`, so the JSON and CSV output of
//! a database round-trips byte-for-byte with the string-typed form used
//! by downstream consumers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel string for an absent value at the serialization boundary.
pub const NA: &str = "N/A";

/// Every attribute name a [`TimingArcRecord`] exposes through
/// [`TimingArcRecord::attribute`], in CSV column order.
pub const ATTRIBUTE_NAMES: [&str; 17] = [
    "pin",
    "direction",
    "related_pin",
    "mode",
    "setup_rise",
    "setup_fall",
    "hold_rise",
    "hold_fall",
    "comb_setup_rise",
    "comb_setup_fall",
    "comb_hold_rise",
    "comb_hold_fall",
    "seq_clk_arc",
    "seq_setup_rise",
    "seq_setup_fall",
    "seq_hold_rise",
    "seq_hold_fall",
];

/// One extracted lookup-table value: the raw numeric token, or absent.
///
/// The scalar keeps the token exactly as it appeared in the source text
/// (no float round-trip), so re-serialized databases match the original
/// extraction output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ArcValue {
    /// No value was extracted for this slot.
    #[default]
    NotAvailable,
    /// A single numeric token taken verbatim from a values table.
    Scalar(String),
}

impl ArcValue {
    /// Returns the wire form: the token itself, or `"N/A"`.
    pub fn as_str(&self) -> &str {
        match self {
            ArcValue::NotAvailable => NA,
            ArcValue::Scalar(s) => s,
        }
    }

    /// Attempts numeric coercion of the stored token.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArcValue::NotAvailable => None,
            ArcValue::Scalar(s) => s.trim().parse().ok(),
        }
    }

    /// Returns `true` if a value is present.
    pub fn is_available(&self) -> bool {
        matches!(self, ArcValue::Scalar(_))
    }
}

impl Serialize for ArcValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ArcValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == NA {
            Ok(ArcValue::NotAvailable)
        } else {
            Ok(ArcValue::Scalar(s))
        }
    }
}

/// Clock edge of a sequential (clock-to-output) arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockArc {
    /// The arc is triggered by the rising clock edge (`rising_edge`).
    Rise,
    /// The arc is triggered by the falling clock edge (`falling_edge`).
    Fall,
}

impl ClockArc {
    /// Returns the wire form, `"R"` or `"F"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ClockArc::Rise => "R",
            ClockArc::Fall => "F",
        }
    }
}

/// Serde adapter: `Option<String>` as the value itself or `"N/A"`.
mod na_string {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(NA))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(if s == NA { None } else { Some(s) })
    }
}

/// Serde adapter: `Option<ClockArc>` as `"R"`, `"F"`, or `"N/A"`.
mod clock_arc {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(
        value: &Option<ClockArc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map_or(NA, ClockArc::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ClockArc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "R" => Ok(Some(ClockArc::Rise)),
            "F" => Ok(Some(ClockArc::Fall)),
            NA => Ok(None),
            other => Err(D::Error::custom(format!(
                "invalid clock arc '{other}' (expected R, F, or N/A)"
            ))),
        }
    }
}

/// One completed timing arc for one pin.
///
/// Uniquely identified within one corner database by
/// `(pin, related_pin, mode)`. Successive timing groups for the same key
/// merge into one record: a `setup_rising` group fills `setup_rise` and
/// `setup_fall`, a later `hold_rising` group for the same key fills the
/// hold slots of the *same* record. The JSON form is the arc object
/// (everything except `pin`, which is the database key).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingArcRecord {
    /// Pin the arc belongs to (database key, not part of the arc object).
    #[serde(skip)]
    pub pin: String,
    /// Pin the arc is measured against; `None` for a standalone arc.
    #[serde(with = "na_string")]
    pub related_pin: Option<String>,
    /// Declared direction of `pin` (`input`, `output`, ...).
    #[serde(with = "na_string")]
    pub direction: Option<String>,
    /// Operating mode the arc applies under.
    #[serde(with = "na_string")]
    pub mode: Option<String>,
    /// Setup constraint, rising data edge.
    pub setup_rise: ArcValue,
    /// Setup constraint, falling data edge.
    pub setup_fall: ArcValue,
    /// Hold constraint, rising data edge.
    pub hold_rise: ArcValue,
    /// Hold constraint, falling data edge.
    pub hold_fall: ArcValue,
    /// Combinational max delay, rising output.
    pub comb_setup_rise: ArcValue,
    /// Combinational max delay, falling output.
    pub comb_setup_fall: ArcValue,
    /// Combinational min delay, rising output.
    pub comb_hold_rise: ArcValue,
    /// Combinational min delay, falling output.
    pub comb_hold_fall: ArcValue,
    /// Triggering clock edge of a sequential arc.
    #[serde(with = "clock_arc")]
    pub seq_clk_arc: Option<ClockArc>,
    /// Sequential max clock-to-output delay, rising output.
    pub seq_setup_rise: ArcValue,
    /// Sequential max clock-to-output delay, falling output.
    pub seq_setup_fall: ArcValue,
    /// Sequential min clock-to-output delay, rising output.
    pub seq_hold_rise: ArcValue,
    /// Sequential min clock-to-output delay, falling output.
    pub seq_hold_fall: ArcValue,
}

impl TimingArcRecord {
    /// Returns `true` if this record carries the given identity key.
    pub fn matches_key(&self, pin: &str, related_pin: Option<&str>, mode: Option<&str>) -> bool {
        self.pin == pin && self.related_pin.as_deref() == related_pin && self.mode.as_deref() == mode
    }

    /// Looks up an attribute by its wire name (see [`ATTRIBUTE_NAMES`]).
    ///
    /// Returns the string form used at the serialization boundary (absent
    /// values read as `"N/A"`), or `None` for an unknown attribute name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let value = match name {
            "pin" => self.pin.as_str(),
            "direction" => self.direction.as_deref().unwrap_or(NA),
            "related_pin" => self.related_pin.as_deref().unwrap_or(NA),
            "mode" => self.mode.as_deref().unwrap_or(NA),
            "setup_rise" => self.setup_rise.as_str(),
            "setup_fall" => self.setup_fall.as_str(),
            "hold_rise" => self.hold_rise.as_str(),
            "hold_fall" => self.hold_fall.as_str(),
            "comb_setup_rise" => self.comb_setup_rise.as_str(),
            "comb_setup_fall" => self.comb_setup_fall.as_str(),
            "comb_hold_rise" => self.comb_hold_rise.as_str(),
            "comb_hold_fall" => self.comb_hold_fall.as_str(),
            "seq_clk_arc" => self.seq_clk_arc.map_or(NA, ClockArc::as_str),
            "seq_setup_rise" => self.seq_setup_rise.as_str(),
            "seq_setup_fall" => self.seq_setup_fall.as_str(),
            "seq_hold_rise" => self.seq_hold_rise.as_str(),
            "seq_hold_fall" => self.seq_hold_fall.as_str(),
            _ => return None,
        };
        Some(value)
    }
}
