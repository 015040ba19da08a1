//! Line-matching helpers for the streaming parser.
//!
//! Liberty keyword matching is ASCII case-insensitive and positional
//! within a line (attributes, group openers, and table names can share a
//! line with other tokens). Each helper scans every candidate position of
//! its keyword and accepts the first one whose surrounding punctuation
//! matches, so a failed candidate (e.g. `pin` inside `pg_pin` without a
//! following paren) does not mask a later valid one.

/// Finds the next ASCII case-insensitive occurrence of `needle` at or
/// after byte offset `from`.
fn find_ci_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || from + n.len() > h.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Matches a pin-group opener `pin (NAME) {` anywhere in the line and
/// returns the pin name.
///
/// The name may be quoted; surrounding whitespace is tolerated between
/// every token. Substring matching means `pg_pin (VDD) {` also yields a
/// name, which mirrors the behavior the extraction output is aligned to.
pub(crate) fn pin_decl(line: &str) -> Option<&str> {
    let mut start = 0;
    while let Some(pos) = find_ci_from(line, "pin", start) {
        if let Some(name) = pin_decl_at(line, pos + 3) {
            return Some(name);
        }
        start = pos + 1;
    }
    None
}

fn pin_decl_at(line: &str, start: usize) -> Option<&str> {
    let b = line.as_bytes();
    let mut i = skip_ws(b, start);
    if b.get(i) != Some(&b'(') {
        return None;
    }
    i = skip_ws(b, i + 1);
    if b.get(i) == Some(&b'"') {
        i += 1;
    }
    let name_start = i;
    while i < b.len() && b[i] != b'"' && b[i] != b')' && !b[i].is_ascii_whitespace() {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name_end = i;
    if b.get(i) == Some(&b'"') {
        i += 1;
    }
    i = skip_ws(b, i);
    if b.get(i) != Some(&b')') {
        return None;
    }
    i = skip_ws(b, i + 1);
    if b.get(i) != Some(&b'{') {
        return None;
    }
    Some(&line[name_start..name_end])
}

/// Matches a simple attribute assignment `KEY : VALUE ;` anywhere in the
/// line and returns the value with optional surrounding quotes stripped.
pub(crate) fn attr_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let mut start = 0;
    while let Some(pos) = find_ci_from(line, key, start) {
        if let Some(value) = attr_value_at(line, pos + key.len()) {
            return Some(value);
        }
        start = pos + 1;
    }
    None
}

fn attr_value_at(line: &str, start: usize) -> Option<&str> {
    let b = line.as_bytes();
    let mut i = skip_ws(b, start);
    if b.get(i) != Some(&b':') {
        return None;
    }
    i = skip_ws(b, i + 1);
    if b.get(i) == Some(&b'"') {
        i += 1;
    }
    let value_start = i;
    while i < b.len() && b[i] != b'"' && b[i] != b';' && !b[i].is_ascii_whitespace() {
        i += 1;
    }
    if i == value_start {
        return None;
    }
    let value_end = i;
    if b.get(i) == Some(&b'"') {
        i += 1;
    }
    i = skip_ws(b, i);
    if b.get(i) != Some(&b';') {
        return None;
    }
    Some(&line[value_start..value_end])
}

/// Matches a timing-group opener `timing () {` anywhere in the line.
pub(crate) fn timing_open(line: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = find_ci_from(line, "timing", start) {
        let b = line.as_bytes();
        let mut i = skip_ws(b, pos + 6);
        if b.get(i) == Some(&b'(') {
            i = skip_ws(b, i + 1);
            if b.get(i) == Some(&b')') {
                i = skip_ws(b, i + 1);
                if b.get(i) == Some(&b'{') {
                    return true;
                }
            }
        }
        start = pos + 1;
    }
    false
}

/// Matches a mode reference `mode (GROUP, "VALUE")` and returns the
/// quoted value, trimmed.
///
/// The quoted value is the second argument; everything between the open
/// paren and the comma preceding the quote is ignored, and the close
/// paren must immediately follow the closing quote.
pub(crate) fn mode_value(line: &str) -> Option<&str> {
    let mut start = 0;
    while let Some(pos) = find_ci_from(line, "mode", start) {
        if let Some(value) = mode_value_at(line, pos + 4) {
            return Some(value);
        }
        start = pos + 1;
    }
    None
}

fn mode_value_at(line: &str, start: usize) -> Option<&str> {
    let b = line.as_bytes();
    let i = skip_ws(b, start);
    if b.get(i) != Some(&b'(') {
        return None;
    }
    // Try each comma in turn: the quoted value follows the first comma
    // that is directly succeeded by `"VALUE")`.
    let mut comma = i + 1;
    while comma < b.len() {
        if b[comma] != b',' {
            comma += 1;
            continue;
        }
        let mut j = skip_ws(b, comma + 1);
        if b.get(j) == Some(&b'"') {
            j += 1;
            let value_start = j;
            while j < b.len() && b[j] != b'"' {
                j += 1;
            }
            if j > value_start && j < b.len() && b.get(j + 1) == Some(&b')') {
                return Some(line[value_start..j].trim());
            }
        }
        comma += 1;
    }
    None
}

/// Matches the start of a named lookup table `NAME (` with a word
/// boundary before the name.
pub(crate) fn table_start(line: &str, name: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = find_ci_from(line, name, start) {
        let boundary = pos == 0 || !is_word_byte(line.as_bytes()[pos - 1]);
        if boundary {
            let b = line.as_bytes();
            let i = skip_ws(b, pos + name.len());
            if b.get(i) == Some(&b'(') {
                return true;
            }
        }
        start = pos + 1;
    }
    false
}
