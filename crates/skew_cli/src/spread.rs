//! `skew get` and `skew spread` — attribute retrieval and analysis.

use skew_liberty::ATTRIBUTE_NAMES;
use skew_verify::{attribute_spread, attribute_values};

use crate::compare::load_database_dir;
use crate::hist;
use crate::{AttributeArgs, GlobalArgs, SpreadArgs};

/// Runs the `skew get` command: prints one attribute of a pin's arcs,
/// corner by corner.
///
/// Exit code 1 when the pin is absent from every corner or the attribute
/// name is unknown.
pub fn run_get(args: &AttributeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !valid_attribute(&args.attribute) {
        return Ok(1);
    }
    let Some(load) = load_database_dir(&args.db_dir, global)? else {
        return Ok(1);
    };

    let per_corner = attribute_values(&load.corners, &args.pin, &args.attribute);
    if per_corner.iter().all(|c| c.values.is_empty()) {
        eprintln!("error: pin '{}' not found in any database", args.pin);
        return Ok(1);
    }

    println!("{} of pin {}:", args.attribute, args.pin);
    for corner in &per_corner {
        if corner.values.is_empty() {
            println!("  {}: (pin absent)", corner.corner);
            continue;
        }
        for (index, value) in corner.values.iter().enumerate() {
            println!("  {}: [arc {index}] {value}", corner.corner);
        }
    }
    Ok(0)
}

/// Runs the `skew spread` command: pooled min/max/range of one numeric
/// attribute plus a terminal histogram.
///
/// An attribute with no numeric values reports "no data" and exits 0.
pub fn run_spread(args: &SpreadArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !valid_attribute(&args.attribute) {
        return Ok(1);
    }
    let Some(load) = load_database_dir(&args.db_dir, global)? else {
        return Ok(1);
    };

    match attribute_spread(&load.corners, &args.pin, &args.attribute) {
        None => {
            println!(
                "no numeric data for attribute '{}' of pin '{}'",
                args.attribute, args.pin
            );
            Ok(0)
        }
        Some(report) => {
            println!(
                "{} of pin {} across {} corner(s):",
                args.attribute,
                args.pin,
                load.corners.len()
            );
            println!(
                "  samples = {}, min = {}, max = {}, range = {}",
                report.values.len(),
                report.min,
                report.max,
                report.range
            );
            let chart = hist::render(&report.values, report.min, report.max, args.bins);
            if !chart.is_empty() {
                println!("{chart}");
            }
            Ok(0)
        }
    }
}

/// Checks the attribute name against the record schema, listing the
/// valid names on failure.
fn valid_attribute(name: &str) -> bool {
    if ATTRIBUTE_NAMES.contains(&name) {
        return true;
    }
    eprintln!(
        "error: unknown attribute '{name}' (expected one of: {})",
        ATTRIBUTE_NAMES.join(", ")
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn db_json(setup_rise: &str) -> String {
        format!(
            r#"{{ "D": [{{
            "related_pin": "CK", "direction": "input", "mode": "N/A",
            "setup_rise": "{setup_rise}", "setup_fall": "N/A",
            "hold_rise": "N/A", "hold_fall": "N/A",
            "comb_setup_rise": "N/A", "comb_setup_fall": "N/A",
            "comb_hold_rise": "N/A", "comb_hold_fall": "N/A",
            "seq_clk_arc": "N/A",
            "seq_setup_rise": "N/A", "seq_setup_fall": "N/A",
            "seq_hold_rise": "N/A", "seq_hold_fall": "N/A"
        }}] }}"#
        )
    }

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
        }
    }

    fn write_corners(dir: &Path, values: &[&str]) {
        for (i, v) in values.iter().enumerate() {
            fs::write(dir.join(format!("c{i}.json")), db_json(v)).unwrap();
        }
    }

    #[test]
    fn spread_over_corners_exits_zero() {
        let tmp = TempDir::new().unwrap();
        write_corners(tmp.path(), &["1.0", "3.5", "2.2"]);
        let args = SpreadArgs {
            db_dir: tmp.path().to_str().unwrap().to_string(),
            pin: "D".into(),
            attribute: "setup_rise".into(),
            bins: 4,
        };
        assert_eq!(run_spread(&args, &global()).unwrap(), 0);
    }

    #[test]
    fn spread_with_no_data_exits_zero() {
        let tmp = TempDir::new().unwrap();
        write_corners(tmp.path(), &["N/A"]);
        let args = SpreadArgs {
            db_dir: tmp.path().to_str().unwrap().to_string(),
            pin: "D".into(),
            attribute: "hold_rise".into(),
            bins: 4,
        };
        assert_eq!(run_spread(&args, &global()).unwrap(), 0);
    }

    #[test]
    fn unknown_attribute_exits_one() {
        let tmp = TempDir::new().unwrap();
        write_corners(tmp.path(), &["1.0"]);
        let args = SpreadArgs {
            db_dir: tmp.path().to_str().unwrap().to_string(),
            pin: "D".into(),
            attribute: "not_a_slot".into(),
            bins: 4,
        };
        assert_eq!(run_spread(&args, &global()).unwrap(), 1);
    }

    #[test]
    fn get_known_pin_exits_zero() {
        let tmp = TempDir::new().unwrap();
        write_corners(tmp.path(), &["1.0", "2.0"]);
        let args = AttributeArgs {
            db_dir: tmp.path().to_str().unwrap().to_string(),
            pin: "D".into(),
            attribute: "setup_rise".into(),
        };
        assert_eq!(run_get(&args, &global()).unwrap(), 0);
    }

    #[test]
    fn get_unknown_pin_exits_one() {
        let tmp = TempDir::new().unwrap();
        write_corners(tmp.path(), &["1.0"]);
        let args = AttributeArgs {
            db_dir: tmp.path().to_str().unwrap().to_string(),
            pin: "GHOST".into(),
            attribute: "setup_rise".into(),
        };
        assert_eq!(run_get(&args, &global()).unwrap(), 1);
    }

    #[test]
    fn empty_database_dir_exits_one() {
        let tmp = TempDir::new().unwrap();
        let args = AttributeArgs {
            db_dir: tmp.path().to_str().unwrap().to_string(),
            pin: "D".into(),
            attribute: "setup_rise".into(),
        };
        assert_eq!(run_get(&args, &global()).unwrap(), 1);
    }
}
