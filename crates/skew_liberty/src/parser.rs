//! Streaming state machine turning Liberty text into timing-arc records.
//!
//! The parser consumes one line at a time and never looks ahead. Its
//! state is explicit:
//!
//! | State            | Meaning                              | Leaves on                    |
//! |------------------|--------------------------------------|------------------------------|
//! | `OutsideBlock`   | between timing groups; tracks the    | `timing () {` → `InBlock`    |
//! |                  | current pin and direction            |                              |
//! | `InBlock`        | inside a timing group; collects      | `values (` with an active    |
//! |                  | attributes and table names, counts   | table → `CapturingTable`;    |
//! |                  | braces                               | depth 0 → `OutsideBlock`     |
//! | `CapturingTable` | buffering a multi-line table body    | `);` → `InBlock`; depth 0 →  |
//! |                  |                                      | `OutsideBlock` (discarded)   |
//!
//! When a group closes, its accumulated attributes are classified against
//! the recognized `timing_type` whitelist and folded into the record for
//! the `(pin, related_pin, mode)` key. Consecutive groups with the same
//! key merge into one record; the record is emitted only when the key
//! changes or the stream ends (merge-then-flush).
//!
//! Malformed nesting that never returns the brace depth to zero makes the
//! parser consume the rest of the stream inside the group without
//! emitting; this permissive behavior is deliberate, and [`ParseStats`]
//! exposes counters for callers that want to surface it.

use std::collections::HashMap;
use std::io::BufRead;

use crate::lut::table_corner_value;
use crate::record::{ArcValue, ClockArc, TimingArcRecord};
use crate::scan;
use crate::LibertyError;

/// Delay tables captured directly under their own name.
const BASE_TABLES: [&str; 4] = ["cell_rise", "cell_fall", "rise_constraint", "fall_constraint"];

/// On-chip-variation sigma tables; their accumulator key is completed by
/// a `sigma_type : early|late ;` qualifier.
const OCV_TABLES: [&str; 4] = [
    "ocv_sigma_cell_rise",
    "ocv_sigma_cell_fall",
    "ocv_sigma_rise_constraint",
    "ocv_sigma_fall_constraint",
];

/// `timing_type` values (by substring) that produce records.
const RECOGNIZED_TYPES: [&str; 7] = [
    "setup_rising",
    "setup_falling",
    "hold_rising",
    "hold_falling",
    "combinational",
    "rising_edge",
    "falling_edge",
];

/// Boundary token beginning a table body.
const VALUES_OPEN: &str = "values (";

/// Boundary token ending a table body.
const VALUES_CLOSE: &str = ");";

/// Counters describing one parse run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Timing groups opened.
    pub timing_blocks: usize,
    /// Timing groups discarded for an unrecognized `timing_type`.
    pub discarded_blocks: usize,
    /// Records handed out so far.
    pub records_emitted: usize,
    /// Table captures aborted by a group close or end of stream.
    pub truncated_captures: usize,
    /// The stream ended inside a timing group.
    pub truncated_block: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParserState {
    OutsideBlock,
    InBlock,
    CapturingTable,
}

/// Attributes and table values accumulated for one timing group.
#[derive(Default)]
struct Accumulator {
    timing_type: Option<String>,
    related_pin: Option<String>,
    mode: Option<String>,
    min_delay_flag: Option<String>,
    tables: HashMap<String, ArcValue>,
}

impl Accumulator {
    fn reset(&mut self) {
        self.timing_type = None;
        self.related_pin = None;
        self.mode = None;
        self.min_delay_flag = None;
        self.tables.clear();
    }

    fn table(&self, key: &str) -> ArcValue {
        self.tables.get(key).cloned().unwrap_or_default()
    }

    fn min_delay(&self) -> bool {
        self.min_delay_flag
            .as_deref()
            .is_some_and(|f| f.to_ascii_lowercase().contains("true"))
    }
}

/// Multi-line table capture sub-state.
#[derive(Default)]
struct Capture {
    buffer: String,
    active_key: Option<String>,
    pending_sigma_base: Option<&'static str>,
}

impl Capture {
    fn reset(&mut self) {
        self.buffer.clear();
        self.active_key = None;
        self.pending_sigma_base = None;
    }
}

/// Lazy, non-restartable stream of completed [`TimingArcRecord`]s.
///
/// Wraps any [`BufRead`] line source and yields each record as soon as
/// its key is superseded in the input (or the stream ends). I/O errors
/// terminate the stream after being yielded once.
pub struct LibertyStreamParser<R> {
    reader: R,
    line: String,
    state: ParserState,
    brace_depth: i64,
    current_pin: String,
    current_direction: Option<String>,
    acc: Accumulator,
    capture: Capture,
    pending: Option<TimingArcRecord>,
    out: Option<TimingArcRecord>,
    stats: ParseStats,
    done: bool,
}

impl<R: BufRead> LibertyStreamParser<R> {
    /// Creates a parser over the given line stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            state: ParserState::OutsideBlock,
            brace_depth: 0,
            current_pin: "N/A".to_string(),
            current_direction: None,
            acc: Accumulator::default(),
            capture: Capture::default(),
            pending: None,
            out: None,
            stats: ParseStats::default(),
            done: false,
        }
    }

    /// Returns the counters accumulated so far.
    ///
    /// Final values are available once the iterator is exhausted.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    fn process_line(&mut self, line: &str) {
        match self.state {
            ParserState::OutsideBlock => self.process_outside(line),
            ParserState::InBlock | ParserState::CapturingTable => self.process_block_line(line),
        }
    }

    fn process_outside(&mut self, line: &str) {
        if let Some(name) = scan::pin_decl(line) {
            self.current_pin = name.to_string();
        }
        if let Some(direction) = scan::attr_value(line, "direction") {
            self.current_direction = Some(direction.to_string());
        }
        if scan::timing_open(line) {
            self.state = ParserState::InBlock;
            self.brace_depth = 1;
            self.acc.reset();
            self.capture.reset();
            self.stats.timing_blocks += 1;
        }
    }

    fn process_block_line(&mut self, line: &str) {
        let opens = line.bytes().filter(|&b| b == b'{').count() as i64;
        let closes = line.bytes().filter(|&b| b == b'}').count() as i64;
        self.brace_depth += opens - closes;

        match self.state {
            ParserState::InBlock => {
                self.scan_attributes(line);
                self.scan_tables(line);
                if self.capture.active_key.is_some() {
                    if let Some(pos) = line.find(VALUES_OPEN) {
                        self.state = ParserState::CapturingTable;
                        self.capture.buffer.clear();
                        self.capture
                            .buffer
                            .push_str(&line[pos + VALUES_OPEN.len()..]);
                    }
                }
                if self.state == ParserState::CapturingTable && line.contains(VALUES_CLOSE) {
                    self.finish_capture();
                }
            }
            ParserState::CapturingTable => {
                self.capture.buffer.push(' ');
                self.capture.buffer.push_str(line);
                if line.contains(VALUES_CLOSE) {
                    self.finish_capture();
                }
            }
            ParserState::OutsideBlock => unreachable!("block line outside a timing group"),
        }

        if self.brace_depth == 0 {
            self.close_block();
        }
    }

    fn scan_attributes(&mut self, line: &str) {
        if let Some(t) = scan::attr_value(line, "timing_type") {
            self.acc.timing_type = Some(t.to_string());
        }
        if let Some(r) = scan::attr_value(line, "related_pin") {
            self.acc.related_pin = Some(r.to_string());
        }
        if let Some(m) = scan::mode_value(line) {
            self.acc.mode = Some(m.to_string());
        }
        if let Some(f) = scan::attr_value(line, "min_delay_flag") {
            self.acc.min_delay_flag = Some(f.to_string());
        }
        if let Some(base) = self.capture.pending_sigma_base {
            if let Some(sigma) = scan::attr_value(line, "sigma_type") {
                self.capture.active_key = Some(format!("{base}_{sigma}"));
            }
        }
    }

    fn scan_tables(&mut self, line: &str) {
        for name in OCV_TABLES {
            if scan::table_start(line, name) {
                self.capture.pending_sigma_base = Some(name);
                return;
            }
        }
        for name in BASE_TABLES {
            if scan::table_start(line, name) {
                self.capture.active_key = Some(name.to_string());
                return;
            }
        }
    }

    fn finish_capture(&mut self) {
        let body = match self.capture.buffer.find(VALUES_CLOSE) {
            Some(pos) => &self.capture.buffer[..pos],
            None => self.capture.buffer.as_str(),
        };
        let value = table_corner_value(body);
        if let Some(key) = self.capture.active_key.take() {
            self.acc.tables.insert(key, value);
        }
        self.capture.reset();
        self.state = ParserState::InBlock;
    }

    fn close_block(&mut self) {
        if self.state == ParserState::CapturingTable {
            self.stats.truncated_captures += 1;
        }
        self.state = ParserState::OutsideBlock;
        self.capture.reset();

        let timing_type = self.acc.timing_type.take().unwrap_or_default();
        if !RECOGNIZED_TYPES.iter().any(|t| timing_type.contains(t)) {
            self.stats.discarded_blocks += 1;
            return;
        }

        let related_pin = self.acc.related_pin.take();
        let mode = self.acc.mode.take();
        let min_delay = self.acc.min_delay();

        // Merge-then-flush: a key change emits the previous record.
        if let Some(prev) = &self.pending {
            if !prev.matches_key(&self.current_pin, related_pin.as_deref(), mode.as_deref()) {
                self.out = self.pending.take();
            }
        }

        let record = self.pending.get_or_insert_with(|| TimingArcRecord {
            pin: self.current_pin.clone(),
            related_pin,
            direction: self.current_direction.clone(),
            mode,
            ..Default::default()
        });

        if timing_type.contains("combinational") {
            if min_delay {
                record.comb_hold_rise = self.acc.table("cell_rise");
                record.comb_hold_fall = self.acc.table("cell_fall");
            } else {
                record.comb_setup_rise = self.acc.table("cell_rise");
                record.comb_setup_fall = self.acc.table("cell_fall");
            }
        } else if timing_type.contains("setup") {
            record.setup_rise = self.acc.table("rise_constraint");
            record.setup_fall = self.acc.table("fall_constraint");
        } else if timing_type.contains("hold") {
            record.hold_rise = self.acc.table("rise_constraint");
            record.hold_fall = self.acc.table("fall_constraint");
        } else if timing_type.contains("edge") {
            record.seq_clk_arc = Some(if timing_type.contains("rising") {
                ClockArc::Rise
            } else {
                ClockArc::Fall
            });
            if min_delay {
                record.seq_hold_rise = self.acc.table("cell_rise");
                record.seq_hold_fall = self.acc.table("cell_fall");
            } else {
                record.seq_setup_rise = self.acc.table("cell_rise");
                record.seq_setup_fall = self.acc.table("cell_fall");
            }
        }
    }
}

impl<R: BufRead> Iterator for LibertyStreamParser<R> {
    type Item = Result<TimingArcRecord, LibertyError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.out.take() {
                self.stats.records_emitted += 1;
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.done = true;
                    if self.state == ParserState::CapturingTable {
                        self.stats.truncated_captures += 1;
                    }
                    if self.state != ParserState::OutsideBlock {
                        self.stats.truncated_block = true;
                    }
                    if let Some(record) = self.pending.take() {
                        self.stats.records_emitted += 1;
                        return Some(Ok(record));
                    }
                    return None;
                }
                Ok(_) => {
                    let line = std::mem::take(&mut self.line);
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        self.process_line(trimmed);
                    }
                    self.line = line;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
