//! Line-stream acquisition for plain and gzip-compressed library files.
//!
//! The parser is decoupled from how bytes are produced: it consumes any
//! [`BufRead`]. This module supplies one from a filesystem path,
//! decompressing in-process when the file carries a `.gz` extension, so
//! there is no external decompression process to manage and the stream
//! is released on every exit path when the reader drops.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

/// Opens a library file as a buffered line stream.
///
/// Files whose extension is `gz` (any case) are decompressed on the fly;
/// everything else is read as-is.
pub fn open_lib_reader(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
