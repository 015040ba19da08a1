//! Structured events emitted during a consistency traversal.
//!
//! The verifier pushes one event at each point of detection; rendering is
//! the caller's concern. [`TraceEvent`]'s `Display` form reproduces the
//! indented text trace of a traversal, two spaces per depth level.

use std::fmt;

/// One observation made during a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A pin present in all corners is being descended into.
    EnterPin {
        /// The pin.
        pin: String,
        /// Traversal depth (0 = seed).
        depth: usize,
    },
    /// One arc of a pin, agreeing across corners.
    ArcLink {
        /// Owning pin.
        pin: String,
        /// The shared related pin (`"N/A"` for a terminal arc).
        related: String,
        /// Arc index within the pin's list.
        index: usize,
        /// Traversal depth of the owning pin.
        depth: usize,
    },
    /// A pin reached again through another chain; not re-descended.
    AlreadyVisited {
        /// The pin.
        pin: String,
        /// Traversal depth.
        depth: usize,
    },
    /// A related pin with no arcs of its own in any corner (chain leaf).
    BoundaryPin {
        /// The pin.
        pin: String,
        /// Traversal depth.
        depth: usize,
    },
    /// The starting pin exists in no corner at all.
    UnknownSeed {
        /// The requested seed pin.
        pin: String,
    },
    /// A pin exists in a strict subset of the corners.
    MissingInSome {
        /// The pin.
        pin: String,
        /// Traversal depth.
        depth: usize,
        /// Names of the corners the pin is missing from.
        missing_from: Vec<String>,
    },
    /// A pin's arc lists differ in length across corners.
    ArcCountMismatch {
        /// The pin.
        pin: String,
        /// Traversal depth.
        depth: usize,
        /// Per-corner `(name, arc count)` observations.
        counts: Vec<(String, usize)>,
    },
    /// The related pin at one arc index differs across corners.
    RelatedPinMismatch {
        /// Owning pin.
        pin: String,
        /// Arc index where the chains diverge.
        index: usize,
        /// Traversal depth of the owning pin.
        depth: usize,
        /// Per-corner `(name, related pin)` observations.
        observed: Vec<(String, String)>,
    },
}

impl TraceEvent {
    /// Returns `true` for events that fail the traversal.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TraceEvent::UnknownSeed { .. }
                | TraceEvent::MissingInSome { .. }
                | TraceEvent::ArcCountMismatch { .. }
                | TraceEvent::RelatedPinMismatch { .. }
        )
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn pair_list(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(corner, value)| format!("{corner} -> {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::EnterPin { pin, depth } => {
                write!(f, "{}PIN: {pin}", indent(*depth))
            }
            TraceEvent::ArcLink {
                pin,
                related,
                index,
                depth,
            } => write!(f, "{}  [Arc {index}] {pin} ---> {related}", indent(*depth)),
            TraceEvent::AlreadyVisited { pin, depth } => {
                write!(f, "{}--> {pin} (already visited, skipping)", indent(*depth))
            }
            TraceEvent::BoundaryPin { pin, depth } => {
                write!(f, "{}[RELATED_PIN] {pin}", indent(*depth))
            }
            TraceEvent::UnknownSeed { pin } => {
                write!(f, "[!] ERROR: starting pin '{pin}' not found in any database")
            }
            TraceEvent::MissingInSome {
                pin,
                depth,
                missing_from,
            } => write!(
                f,
                "{}  [!] ERROR: pin '{pin}' missing in some databases: {}",
                indent(*depth),
                missing_from.join(", ")
            ),
            TraceEvent::ArcCountMismatch { pin, depth, counts } => {
                let list = counts
                    .iter()
                    .map(|(corner, n)| format!("{corner} has {n}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "{}  [!] ERROR: arc count mismatch at {pin}: {list}",
                    indent(*depth)
                )
            }
            TraceEvent::RelatedPinMismatch {
                pin,
                index,
                depth,
                observed,
            } => write!(
                f,
                "{}  [!] ARC MISMATCH at {pin} index {index}: {}",
                indent(*depth),
                pair_list(observed)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_classification() {
        assert!(TraceEvent::UnknownSeed { pin: "X".into() }.is_failure());
        assert!(TraceEvent::RelatedPinMismatch {
            pin: "B".into(),
            index: 0,
            depth: 1,
            observed: vec![],
        }
        .is_failure());
        assert!(!TraceEvent::EnterPin {
            pin: "A".into(),
            depth: 0
        }
        .is_failure());
        assert!(!TraceEvent::BoundaryPin {
            pin: "A".into(),
            depth: 2
        }
        .is_failure());
    }

    #[test]
    fn display_indents_by_depth() {
        let event = TraceEvent::EnterPin {
            pin: "D".into(),
            depth: 2,
        };
        assert_eq!(event.to_string(), "    PIN: D");
    }

    #[test]
    fn display_arc_link() {
        let event = TraceEvent::ArcLink {
            pin: "D".into(),
            related: "CK".into(),
            index: 1,
            depth: 0,
        };
        assert_eq!(event.to_string(), "  [Arc 1] D ---> CK");
    }

    #[test]
    fn display_mismatch_lists_corners() {
        let event = TraceEvent::RelatedPinMismatch {
            pin: "B".into(),
            index: 0,
            depth: 1,
            observed: vec![
                ("ff".into(), "C".into()),
                ("ss".into(), "D".into()),
            ],
        };
        let text = event.to_string();
        assert!(text.contains("ARC MISMATCH at B index 0"));
        assert!(text.contains("ff -> C, ss -> D"));
    }
}
