//! Flat CSV export of timing-arc records.

use std::io::{self, Write};

use skew_liberty::record::NA;
use skew_liberty::{ClockArc, TimingArcRecord};

/// Column order of the export, one row per record.
pub const CSV_HEADER: &str = "pin,direction,related_pin,mode,\
setup_rise,setup_fall,hold_rise,hold_fall,\
comb_setup_rise,comb_setup_fall,comb_hold_rise,comb_hold_fall,\
seq_clk_arc,seq_setup_rise,seq_setup_fall,seq_hold_rise,seq_hold_fall";

/// Streaming CSV writer; emits the header on construction.
pub struct CsvWriter<W: Write> {
    inner: W,
}

impl<W: Write> CsvWriter<W> {
    /// Wraps a sink and writes the header row.
    pub fn new(mut inner: W) -> io::Result<Self> {
        writeln!(inner, "{CSV_HEADER}")?;
        Ok(Self { inner })
    }

    /// Writes one record as a row.
    pub fn write_record(&mut self, record: &TimingArcRecord) -> io::Result<()> {
        let fields = [
            record.pin.as_str(),
            record.direction.as_deref().unwrap_or(NA),
            record.related_pin.as_deref().unwrap_or(NA),
            record.mode.as_deref().unwrap_or(NA),
            record.setup_rise.as_str(),
            record.setup_fall.as_str(),
            record.hold_rise.as_str(),
            record.hold_fall.as_str(),
            record.comb_setup_rise.as_str(),
            record.comb_setup_fall.as_str(),
            record.comb_hold_rise.as_str(),
            record.comb_hold_fall.as_str(),
            record.seq_clk_arc.map_or(NA, ClockArc::as_str),
            record.seq_setup_rise.as_str(),
            record.seq_setup_fall.as_str(),
            record.seq_hold_rise.as_str(),
            record.seq_hold_fall.as_str(),
        ];
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.inner.write_all(b",")?;
            }
            write_field(&mut self.inner, field)?;
        }
        self.inner.write_all(b"\n")
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Writes one field with minimal quoting: fields containing a comma,
/// quote, or line break are quoted, with embedded quotes doubled.
fn write_field<W: Write>(w: &mut W, field: &str) -> io::Result<()> {
    if field.contains([',', '"', '\n', '\r']) {
        w.write_all(b"\"")?;
        w.write_all(field.replace('"', "\"\"").as_bytes())?;
        w.write_all(b"\"")
    } else {
        w.write_all(field.as_bytes())
    }
}
