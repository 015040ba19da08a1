//! `skew compare` — cross-corner arc-chain consistency check.
//!
//! Loads every `*.json` corner in the database directory (sorted by
//! filename), then traces each requested seed pin and prints the
//! traversal. Every seed gets its own verdict; the aggregate verdict
//! decides the exit code.

use std::collections::HashSet;
use std::path::Path;

use skew_db::{load_corners, CornerLoad};
use skew_verify::verify_chain;

use crate::{CompareArgs, GlobalArgs};

/// Runs the `skew compare` command.
///
/// Returns exit code 0 when every traced chain is consistent, 1 when any
/// chain diverges or no databases load.
pub fn run(args: &CompareArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let Some(load) = load_database_dir(&args.db_dir, global)? else {
        return Ok(1);
    };
    let corners = &load.corners;

    let seeds: Vec<String> = if args.all {
        corners[0].db.pin_names().map(str::to_string).collect()
    } else {
        args.arcs.clone()
    };

    // With --all every seed exists in the reference corner, so a shared
    // visited set only skips re-tracing shared sub-chains. Explicit seeds
    // keep a private set each: the unknown-seed check relies on the set
    // being empty at the start of a traversal.
    let mut shared_visited = HashSet::new();

    let mut overall = true;
    for seed in &seeds {
        println!("--- tracing arc chain for: {seed} ---");

        let mut private_visited = HashSet::new();
        let visited = if args.all {
            &mut shared_visited
        } else {
            &mut private_visited
        };

        let mut trace = Vec::new();
        let consistent = verify_chain(corners, seed, visited, &mut trace);
        for event in &trace {
            println!("{event}");
        }

        if consistent {
            println!("result: [PASSED] chain consistent across all corners for {seed}");
        } else {
            println!("result: [FAILED] chain discrepancy starting at {seed}");
            overall = false;
        }
        println!();
    }

    if overall {
        println!("all chains consistent across {} corner(s)", corners.len());
        Ok(0)
    } else {
        println!("structural mismatch detected");
        Ok(1)
    }
}

/// Loads the corner directory, reporting skipped files.
///
/// Returns `None` (after printing the error) when no databases load at
/// all; the caller turns that into a nonzero exit.
pub fn load_database_dir(
    dir: &str,
    global: &GlobalArgs,
) -> Result<Option<CornerLoad>, Box<dyn std::error::Error>> {
    let load = load_corners(Path::new(dir))?;
    for skipped in &load.skipped {
        eprintln!(
            "warning: skipping {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }
    if load.corners.is_empty() {
        eprintln!("error: no valid corner databases found in {dir}");
        return Ok(None);
    }
    if !global.quiet {
        eprintln!("loaded {} corner database(s)", load.corners.len());
    }
    Ok(Some(load))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn db_json(b_related: &str) -> String {
        let arc = |related: &str| {
            format!(
                r#"{{
                "related_pin": "{related}", "direction": "input", "mode": "N/A",
                "setup_rise": "0.1", "setup_fall": "N/A",
                "hold_rise": "N/A", "hold_fall": "N/A",
                "comb_setup_rise": "N/A", "comb_setup_fall": "N/A",
                "comb_hold_rise": "N/A", "comb_hold_fall": "N/A",
                "seq_clk_arc": "N/A",
                "seq_setup_rise": "N/A", "seq_setup_fall": "N/A",
                "seq_hold_rise": "N/A", "seq_hold_fall": "N/A"
            }}"#
            )
        };
        format!(
            r#"{{ "A": [{}], "B": [{}] }}"#,
            arc("B"),
            arc(b_related)
        )
    }

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
        }
    }

    fn compare_args(dir: &Path, arcs: &[&str], all: bool) -> CompareArgs {
        CompareArgs {
            db_dir: dir.to_str().unwrap().to_string(),
            arcs: arcs.iter().map(|s| s.to_string()).collect(),
            all,
        }
    }

    #[test]
    fn consistent_corners_pass() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("c0.json"), db_json("N/A")).unwrap();
        fs::write(tmp.path().join("c1.json"), db_json("N/A")).unwrap();

        let code = run(&compare_args(tmp.path(), &["A"], false), &global()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn diverging_corners_fail() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("c0.json"), db_json("C")).unwrap();
        fs::write(tmp.path().join("c1.json"), db_json("D")).unwrap();

        let code = run(&compare_args(tmp.path(), &["A"], false), &global()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn all_mode_traces_reference_pins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("c0.json"), db_json("N/A")).unwrap();
        fs::write(tmp.path().join("c1.json"), db_json("N/A")).unwrap();

        let code = run(&compare_args(tmp.path(), &[], true), &global()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn unknown_seed_fails_but_batch_continues() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("c0.json"), db_json("N/A")).unwrap();

        let code = run(&compare_args(tmp.path(), &["GHOST", "A"], false), &global()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn empty_directory_is_exit_one() {
        let tmp = TempDir::new().unwrap();
        let code = run(&compare_args(tmp.path(), &["A"], false), &global()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let args = compare_args(&tmp.path().join("absent"), &["A"], false);
        assert!(run(&args, &global()).is_err());
    }

    #[test]
    fn corrupt_corner_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a_good.json"), db_json("N/A")).unwrap();
        fs::write(tmp.path().join("b_bad.json"), "{ nope").unwrap();

        let code = run(&compare_args(tmp.path(), &["A"], false), &global()).unwrap();
        assert_eq!(code, 0);
    }
}
