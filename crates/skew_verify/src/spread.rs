//! Single-attribute retrieval and cross-corner numeric spread.

use skew_db::Corner;

/// Pooled numeric statistics of one attribute of one pin.
#[derive(Clone, Debug, PartialEq)]
pub struct SpreadReport {
    /// Smallest value seen in any corner.
    pub min: f64,
    /// Largest value seen in any corner.
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    /// Every numeric value, corner-major in discovery order, for
    /// external plotting.
    pub values: Vec<f64>,
}

/// The raw attribute values of one corner, arc by arc.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CornerValues {
    /// Corner name.
    pub corner: String,
    /// Attribute value per arc index; empty when the pin is absent from
    /// this corner.
    pub values: Vec<String>,
}

/// Retrieves `attribute` for every arc of `pin` in every corner.
///
/// Values are the wire strings (absent slots read `"N/A"`); an unknown
/// attribute name yields `"N/A"` for every arc. A corner without the pin
/// contributes an empty list.
pub fn attribute_values(corners: &[Corner], pin: &str, attribute: &str) -> Vec<CornerValues> {
    corners
        .iter()
        .map(|corner| CornerValues {
            corner: corner.name.clone(),
            values: corner
                .db
                .arcs(pin)
                .map(|arcs| {
                    arcs.iter()
                        .map(|arc| arc.attribute(attribute).unwrap_or("N/A").to_string())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// Computes the pooled numeric spread of `attribute` over every arc of
/// `pin` across all corners.
///
/// Values that are absent or do not coerce to a number are excluded, not
/// treated as zero. Returns `None` when no numeric values exist at all
/// ("no data", not an error).
pub fn attribute_spread(corners: &[Corner], pin: &str, attribute: &str) -> Option<SpreadReport> {
    let mut values = Vec::new();
    for corner in corners {
        let Some(arcs) = corner.db.arcs(pin) else {
            continue;
        };
        for arc in arcs {
            let Some(raw) = arc.attribute(attribute) else {
                continue;
            };
            if let Ok(value) = raw.trim().parse::<f64>() {
                values.push(value);
            }
        }
    }

    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(SpreadReport {
        min,
        max,
        range: max - min,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skew_db::PinArcDatabase;
    use skew_liberty::{ArcValue, TimingArcRecord};

    fn arc_with_setup(pin: &str, setup_rise: &str) -> TimingArcRecord {
        TimingArcRecord {
            pin: pin.into(),
            related_pin: Some("CK".into()),
            setup_rise: if setup_rise == "N/A" {
                ArcValue::NotAvailable
            } else {
                ArcValue::Scalar(setup_rise.into())
            },
            ..Default::default()
        }
    }

    fn corner(name: &str, arcs: Vec<TimingArcRecord>) -> Corner {
        Corner {
            name: name.into(),
            db: PinArcDatabase::from_records(arcs),
        }
    }

    #[test]
    fn pooled_spread_across_two_corners() {
        let corners = vec![
            corner(
                "c0",
                vec![arc_with_setup("D", "1.0"), arc_with_setup("D", "3.5")],
            ),
            corner("c1", vec![arc_with_setup("D", "2.2")]),
        ];
        let report = attribute_spread(&corners, "D", "setup_rise").unwrap();
        assert_eq!(report.min, 1.0);
        assert_eq!(report.max, 3.5);
        assert_eq!(report.range, 2.5);
        assert_eq!(report.values, vec![1.0, 3.5, 2.2]);
    }

    #[test]
    fn non_numeric_values_are_excluded() {
        let corners = vec![corner(
            "c0",
            vec![
                arc_with_setup("D", "0.25"),
                arc_with_setup("D", "N/A"),
                arc_with_setup("D", "bogus"),
            ],
        )];
        let report = attribute_spread(&corners, "D", "setup_rise").unwrap();
        assert_eq!(report.values, vec![0.25]);
        assert_eq!(report.range, 0.0);
    }

    #[test]
    fn wholly_absent_attribute_is_no_data() {
        let corners = vec![corner("c0", vec![arc_with_setup("D", "N/A")])];
        assert_eq!(attribute_spread(&corners, "D", "setup_rise"), None);
        assert_eq!(attribute_spread(&corners, "D", "hold_rise"), None);
        assert_eq!(attribute_spread(&corners, "GHOST", "setup_rise"), None);
        assert_eq!(attribute_spread(&corners, "D", "nonsense"), None);
    }

    #[test]
    fn single_value_has_zero_range() {
        let corners = vec![corner("c0", vec![arc_with_setup("D", "0.7")])];
        let report = attribute_spread(&corners, "D", "setup_rise").unwrap();
        assert_eq!(report.min, 0.7);
        assert_eq!(report.max, 0.7);
        assert_eq!(report.range, 0.0);
    }

    #[test]
    fn retrieval_reports_per_corner_values() {
        let corners = vec![
            corner(
                "ff",
                vec![arc_with_setup("D", "0.1"), arc_with_setup("D", "N/A")],
            ),
            corner("ss", vec![arc_with_setup("D", "0.3")]),
            corner("tt", vec![arc_with_setup("Q", "0.9")]),
        ];
        let values = attribute_values(&corners, "D", "setup_rise");
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].corner, "ff");
        assert_eq!(values[0].values, vec!["0.1", "N/A"]);
        assert_eq!(values[1].values, vec!["0.3"]);
        assert!(values[2].values.is_empty());
    }

    #[test]
    fn retrieval_of_string_attributes() {
        let corners = vec![corner("c0", vec![arc_with_setup("D", "0.1")])];
        let values = attribute_values(&corners, "D", "related_pin");
        assert_eq!(values[0].values, vec!["CK"]);
    }
}
