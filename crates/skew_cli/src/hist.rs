//! Terminal histogram rendering for spread analysis.
//!
//! Receives the computed value sequence and its min/max markers and
//! renders a fixed-width binned bar chart. Pure string output so it can
//! be asserted on directly.

/// Maximum bar width in characters.
const BAR_WIDTH: usize = 40;

/// Renders a histogram of `values` between the `min`/`max` markers.
///
/// Returns an empty string when there is nothing to draw. When all
/// values coincide the chart collapses to a single full-width bar.
pub fn render(values: &[f64], min: f64, max: f64, bins: usize) -> String {
    if values.is_empty() || bins == 0 {
        return String::new();
    }

    if max <= min {
        return format!(
            "  [{min:>10.4}] |{} {}\n",
            "#".repeat(BAR_WIDTH),
            values.len()
        );
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut bin = ((v - min) / width) as usize;
        if bin >= bins {
            bin = bins - 1; // v == max lands in the last bin
        }
        counts[bin] += 1;
    }

    let tallest = counts.iter().copied().max().unwrap_or(1).max(1);
    let mut out = String::new();
    for (i, &count) in counts.iter().enumerate() {
        let lo = min + width * i as f64;
        let hi = lo + width;
        let bar = BAR_WIDTH * count / tallest;
        out.push_str(&format!(
            "  [{lo:>10.4}, {hi:>10.4}) |{} {count}\n",
            "#".repeat(bar)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render(&[], 0.0, 1.0, 8), "");
        assert_eq!(render(&[1.0], 0.0, 1.0, 0), "");
    }

    #[test]
    fn bins_partition_the_range() {
        let values = [0.0, 0.1, 0.9, 1.0];
        let out = render(&values, 0.0, 1.0, 2);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" 2"));
        assert!(lines[1].ends_with(" 2"));
    }

    #[test]
    fn max_value_lands_in_last_bin() {
        let out = render(&[1.0, 3.5, 2.2], 1.0, 3.5, 5);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[4].ends_with(" 1"));
    }

    #[test]
    fn tallest_bin_gets_full_width() {
        let values = [0.1, 0.1, 0.1, 0.9];
        let out = render(&values, 0.0, 1.0, 2);
        let first = out.lines().next().unwrap();
        assert!(first.contains(&"#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn degenerate_range_collapses_to_one_bar() {
        let out = render(&[0.7, 0.7], 0.7, 0.7, 8);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains(&"#".repeat(BAR_WIDTH)));
        assert!(out.trim_end().ends_with(" 2"));
    }

    #[test]
    fn bin_edges_are_printed() {
        let out = render(&[0.0, 4.0], 0.0, 4.0, 4);
        assert!(out.contains("0.0000"));
        assert!(out.contains("4.0000"));
    }
}
