//! Skew CLI — cross-corner Liberty timing-arc tooling.
//!
//! Provides `skew extract` for turning `.lib.gz` libraries into
//! per-corner CSV or JSON arc databases, `skew compare` for verifying
//! that arc-chain topology is identical across corner databases,
//! `skew get` for reading one attribute of a pin across corners, and
//! `skew spread` for pooled min/max/range analysis with a terminal
//! histogram.

#![warn(missing_docs)]

mod compare;
mod config;
mod extract;
mod hist;
mod spread;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Skew — Liberty timing-arc extraction and corner comparison.
#[derive(Parser, Debug)]
#[command(name = "skew", version, about = "Cross-corner Liberty timing-arc toolchain")]
pub struct Cli {
    /// Suppress all output except errors and results.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose progress output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract timing arcs from Liberty libraries into corner databases.
    Extract(ExtractArgs),
    /// Verify arc-chain topology consistency across corner databases.
    Compare(CompareArgs),
    /// Print one attribute of a pin's arcs across all corners.
    Get(AttributeArgs),
    /// Analyze the numeric spread of one attribute across corners.
    Spread(SpreadArgs),
}

/// Arguments for the `skew extract` subcommand.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Manifest file listing directories to scan for `.lib.gz` libraries.
    pub manifest: String,

    /// Output format for the extracted databases.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Output directory (overrides the configuration file).
    #[arg(short, long)]
    pub out: Option<String>,

    /// Path to a `skew.toml` configuration file.
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for the `skew compare` subcommand.
#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("seeds").required(true).args(["arcs", "all"])))]
pub struct CompareArgs {
    /// Directory of per-corner JSON databases.
    pub db_dir: String,

    /// Starting pin(s) for the traversal.
    #[arg(long = "arc", value_name = "PIN", num_args = 1..)]
    pub arcs: Vec<String>,

    /// Trace every pin of the reference (first) corner.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `skew get` subcommand.
#[derive(Parser, Debug)]
pub struct AttributeArgs {
    /// Directory of per-corner JSON databases.
    pub db_dir: String,

    /// Pin to read.
    #[arg(long)]
    pub pin: String,

    /// Attribute name (e.g. `setup_rise`).
    #[arg(long = "attr", value_name = "NAME")]
    pub attribute: String,
}

/// Arguments for the `skew spread` subcommand.
#[derive(Parser, Debug)]
pub struct SpreadArgs {
    /// Directory of per-corner JSON databases.
    pub db_dir: String,

    /// Pin to analyze.
    #[arg(long)]
    pub pin: String,

    /// Attribute name (e.g. `setup_rise`).
    #[arg(long = "attr", value_name = "NAME")]
    pub attribute: String,

    /// Number of histogram bins.
    #[arg(long, default_value_t = 8)]
    pub bins: usize,
}

/// Database output format for extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One flat CSV per library.
    Csv,
    /// One JSON pin → arcs database per library.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-result output.
    pub quiet: bool,
    /// Whether to print verbose progress information.
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Command::Extract(ref args) => extract::run(args, &global),
        Command::Compare(ref args) => compare::run(args, &global),
        Command::Get(ref args) => spread::run_get(args, &global),
        Command::Spread(ref args) => spread::run_spread(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_extract_default() {
        let cli = Cli::parse_from(["skew", "extract", "dirs.txt"]);
        match cli.command {
            Command::Extract(ref args) => {
                assert_eq!(args.manifest, "dirs.txt");
                assert_eq!(args.format, OutputFormat::Csv);
                assert!(args.out.is_none());
                assert!(args.config.is_none());
            }
            _ => panic!("expected Extract command"),
        }
    }

    #[test]
    fn parse_extract_json_with_out() {
        let cli = Cli::parse_from([
            "skew", "extract", "dirs.txt", "--format", "json", "--out", "corners",
        ]);
        match cli.command {
            Command::Extract(ref args) => {
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.out.as_deref(), Some("corners"));
            }
            _ => panic!("expected Extract command"),
        }
    }

    #[test]
    fn parse_extract_with_config() {
        let cli = Cli::parse_from(["skew", "extract", "dirs.txt", "--config", "skew.toml"]);
        match cli.command {
            Command::Extract(ref args) => {
                assert_eq!(args.config.as_deref(), Some("skew.toml"));
            }
            _ => panic!("expected Extract command"),
        }
    }

    #[test]
    fn parse_compare_with_arcs() {
        let cli = Cli::parse_from(["skew", "compare", "corners/", "--arc", "D", "Q"]);
        match cli.command {
            Command::Compare(ref args) => {
                assert_eq!(args.db_dir, "corners/");
                assert_eq!(args.arcs, vec!["D", "Q"]);
                assert!(!args.all);
            }
            _ => panic!("expected Compare command"),
        }
    }

    #[test]
    fn parse_compare_all() {
        let cli = Cli::parse_from(["skew", "compare", "corners/", "--all"]);
        match cli.command {
            Command::Compare(ref args) => {
                assert!(args.all);
                assert!(args.arcs.is_empty());
            }
            _ => panic!("expected Compare command"),
        }
    }

    #[test]
    fn compare_requires_seeds() {
        assert!(Cli::try_parse_from(["skew", "compare", "corners/"]).is_err());
    }

    #[test]
    fn compare_rejects_arcs_and_all_together() {
        assert!(
            Cli::try_parse_from(["skew", "compare", "corners/", "--arc", "D", "--all"]).is_err()
        );
    }

    #[test]
    fn parse_get() {
        let cli = Cli::parse_from([
            "skew", "get", "corners/", "--pin", "D", "--attr", "setup_rise",
        ]);
        match cli.command {
            Command::Get(ref args) => {
                assert_eq!(args.pin, "D");
                assert_eq!(args.attribute, "setup_rise");
            }
            _ => panic!("expected Get command"),
        }
    }

    #[test]
    fn get_requires_pin_and_attr() {
        assert!(Cli::try_parse_from(["skew", "get", "corners/"]).is_err());
        assert!(Cli::try_parse_from(["skew", "get", "corners/", "--pin", "D"]).is_err());
    }

    #[test]
    fn parse_spread_default_bins() {
        let cli = Cli::parse_from([
            "skew", "spread", "corners/", "--pin", "D", "--attr", "hold_fall",
        ]);
        match cli.command {
            Command::Spread(ref args) => {
                assert_eq!(args.attribute, "hold_fall");
                assert_eq!(args.bins, 8);
            }
            _ => panic!("expected Spread command"),
        }
    }

    #[test]
    fn parse_spread_custom_bins() {
        let cli = Cli::parse_from([
            "skew", "spread", "corners/", "--pin", "D", "--attr", "hold_fall", "--bins", "16",
        ]);
        match cli.command {
            Command::Spread(ref args) => assert_eq!(args.bins, 16),
            _ => panic!("expected Spread command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["skew", "--quiet", "compare", "corners/", "--all"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);

        let cli = Cli::parse_from(["skew", "--verbose", "extract", "dirs.txt"]);
        assert!(cli.verbose);
    }
}
