//! `skew extract` — parallel library-to-database extraction.
//!
//! Reads a manifest of directories, walks each recursively for `.lib.gz`
//! libraries, and parses every library into one CSV or JSON database.
//! Files are independent, so they are processed with one rayon worker
//! per file; each parser instance stays strictly sequential internally.

use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use thiserror::Error;

use skew_db::csv::CsvWriter;
use skew_db::PinArcDatabase;
use skew_liberty::reader::open_lib_reader;
use skew_liberty::{LibertyError, LibertyStreamParser};

use crate::config::{resolve_config, DEFAULT_OUTPUT_DIR};
use crate::{ExtractArgs, GlobalArgs, OutputFormat};

/// File suffix identifying a compressed library.
const LIB_SUFFIX: &str = ".lib.gz";

/// Per-file extraction failure.
#[derive(Debug, Error)]
enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Liberty(#[from] LibertyError),
    #[error("failed to serialize database: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runs the `skew extract` command.
///
/// Returns exit code 0 on success (including "nothing to do"), 1 when
/// every library failed to extract.
pub fn run(args: &ExtractArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(args.config.as_deref())?;
    let out_dir = args
        .out
        .clone()
        .or(config.extract.output_dir)
        .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());
    let out_dir = PathBuf::from(out_dir);

    let dirs = read_manifest(Path::new(&args.manifest))
        .map_err(|e| format!("failed to read manifest {}: {e}", args.manifest))?;

    let mut files = Vec::new();
    for dir in &dirs {
        if !dir.is_dir() {
            eprintln!("warning: skipping {} (not a directory)", dir.display());
            continue;
        }
        collect_lib_files(dir, &mut files)?;
    }
    files.sort();

    if files.is_empty() {
        if !global.quiet {
            eprintln!("no {LIB_SUFFIX} files found");
        }
        return Ok(0);
    }

    fs::create_dir_all(&out_dir)?;
    if !global.quiet {
        eprintln!(
            "found {} librar{}, extracting to {}",
            files.len(),
            if files.len() == 1 { "y" } else { "ies" },
            out_dir.display()
        );
    }

    let done = AtomicUsize::new(0);
    let total = files.len();
    let results: Vec<(PathBuf, Result<(), ExtractError>)> = files
        .par_iter()
        .map(|path| {
            let result = extract_one(path, &out_dir, args.format);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if global.verbose {
                eprintln!(
                    "   [{finished}/{total}] {}",
                    path.file_name().and_then(|n| n.to_str()).unwrap_or("?")
                );
            }
            (path.clone(), result)
        })
        .collect();

    let mut failures = 0;
    for (path, result) in &results {
        if let Err(e) = result {
            failures += 1;
            eprintln!("warning: skipping {}: {e}", path.display());
        }
    }

    if !global.quiet {
        eprintln!(
            "extracted {} database(s), {} failure(s)",
            results.len() - failures,
            failures
        );
    }

    Ok(if failures == results.len() { 1 } else { 0 })
}

/// Reads the manifest: one directory path per line, blank lines ignored.
fn read_manifest(path: &Path) -> io::Result<Vec<PathBuf>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Recursively collects `.lib.gz` files under `dir`.
fn collect_lib_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_lib_files(&path, files)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(LIB_SUFFIX))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Output path for one library: the input stem with a new extension.
fn output_path(input: &Path, out_dir: &Path, format: OutputFormat) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("library.lib.gz");
    let stem = name.strip_suffix(LIB_SUFFIX).unwrap_or(name);
    let extension = match format {
        OutputFormat::Csv => "csv",
        OutputFormat::Json => "json",
    };
    out_dir.join(format!("{stem}.{extension}"))
}

/// Parses one library and writes its database.
fn extract_one(input: &Path, out_dir: &Path, format: OutputFormat) -> Result<(), ExtractError> {
    let reader = open_lib_reader(input)?;
    let out_path = output_path(input, out_dir, format);
    match format {
        OutputFormat::Csv => write_csv(reader, &out_path),
        OutputFormat::Json => write_json(reader, &out_path),
    }
}

/// Streams records straight into a CSV file.
fn write_csv(reader: Box<dyn BufRead + Send>, out_path: &Path) -> Result<(), ExtractError> {
    let file = BufWriter::new(File::create(out_path)?);
    let mut writer = CsvWriter::new(file)?;
    for record in LibertyStreamParser::new(reader) {
        writer.write_record(&record?)?;
    }
    writer.into_inner()?;
    Ok(())
}

/// Folds records into a database and writes it as JSON.
fn write_json(reader: Box<dyn BufRead + Send>, out_path: &Path) -> Result<(), ExtractError> {
    let mut db = PinArcDatabase::new();
    for record in LibertyStreamParser::new(reader) {
        db.push(record?);
    }
    fs::write(out_path, db.to_json_string_pretty()?)?;
    Ok(())
}
