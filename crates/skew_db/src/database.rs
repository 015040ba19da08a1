//! The per-corner pin → arcs database.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use skew_liberty::TimingArcRecord;

/// All timing arcs of one corner, grouped by pin.
///
/// Pins and the arcs under them keep their discovery order from the
/// source text. The order carries no meaning of its own, but cross-corner
/// comparison is index-aligned, so it must survive serialization.
///
/// Within one database no two arcs of a pin share a
/// `(related_pin, mode)` key; the parser's merge-then-flush emission
/// guarantees this for freshly built databases, and loaded JSON is
/// trusted to satisfy it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinArcDatabase {
    pins: IndexMap<String, Vec<TimingArcRecord>>,
}

impl PinArcDatabase {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a database by folding a record stream.
    ///
    /// Each record is appended to its pin's arc list in arrival order;
    /// merging of same-key records has already happened upstream.
    pub fn from_records(records: impl IntoIterator<Item = TimingArcRecord>) -> Self {
        let mut db = Self::new();
        for record in records {
            db.push(record);
        }
        db
    }

    /// Appends one record to its pin's arc list.
    pub fn push(&mut self, record: TimingArcRecord) {
        self.pins
            .entry(record.pin.clone())
            .or_default()
            .push(record);
    }

    /// Returns `true` if the database has an entry for `pin`.
    pub fn contains_pin(&self, pin: &str) -> bool {
        self.pins.contains_key(pin)
    }

    /// Returns the arcs of `pin` in discovery order.
    pub fn arcs(&self, pin: &str) -> Option<&[TimingArcRecord]> {
        self.pins.get(pin).map(Vec::as_slice)
    }

    /// Iterates pin names in discovery order.
    pub fn pin_names(&self) -> impl Iterator<Item = &str> {
        self.pins.keys().map(String::as_str)
    }

    /// Iterates `(pin, arcs)` entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TimingArcRecord])> {
        self.pins.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of pins.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if the database holds no pins.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Parses a database from its JSON form.
    ///
    /// The arc objects do not carry the pin name (it is the map key), so
    /// each record's `pin` field is filled back in after deserialization.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut db: Self = serde_json::from_str(json)?;
        for (pin, arcs) in db.pins.iter_mut() {
            for arc in arcs {
                arc.pin = pin.clone();
            }
        }
        Ok(db)
    }

    /// Serializes the database as 4-space-indented JSON, pins and arcs in
    /// insertion order.
    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
    }
}
