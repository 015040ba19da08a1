//! Cross-corner consistency check of timing-arc chains.
//!
//! The pin/related-pin relation forms a directed graph, possibly cyclic.
//! Starting from a seed pin, the verifier walks it depth-first and checks
//! at every step that all corners agree on the topology: the pin exists
//! everywhere (or nowhere, a chain leaf), its arc count matches, and the
//! related pin at every arc index is the same. The walk is iterative with
//! an explicit work stack, so arbitrarily deep chains cannot exhaust the
//! call stack, and a visited set closes cycles.

use std::collections::HashSet;

use skew_db::Corner;

use crate::trace::TraceEvent;

/// Work items of the traversal.
///
/// An `Arc` task carries the per-corner related pins observed at its
/// index so the agreement check happens when the task is popped, after
/// the full sub-chain of every earlier arc index has resolved, matching
/// the recursive formulation's event order.
enum Task {
    Visit {
        pin: String,
        depth: usize,
    },
    Arc {
        pin: String,
        index: usize,
        depth: usize,
        related: Vec<Option<String>>,
    },
}

/// Verifies that the arc chain reachable from `seed` is identical across
/// all corners.
///
/// Returns `false` on the first divergence; every observation is pushed
/// into `trace` at the point it is made. Rules, in order, for each pin:
///
/// 1. a seed of `"N/A"` is a no-op success;
/// 2. a pin absent from *every* corner fails if it is the initial seed
///    (nothing has been visited yet) and is otherwise a legitimate chain
///    leaf;
/// 3. an already-visited pin closes a cycle and is not re-descended;
/// 4. a pin present in only *some* corners is a schema divergence;
/// 5. otherwise the pin's arc lists are compared in lock-step: equal
///    length, then per-index agreement of the related pin, each agreeing
///    related pin being traversed depth-first (arc `i`'s whole sub-chain
///    before arc `i + 1`).
///
/// `visited` may be shared across seeds of a batch: a pin proven
/// consistent once is safely skipped later, which changes traversal cost
/// but never the verdict.
pub fn verify_chain(
    corners: &[Corner],
    seed: &str,
    visited: &mut HashSet<String>,
    trace: &mut Vec<TraceEvent>,
) -> bool {
    if seed == "N/A" {
        return true;
    }

    let mut stack = vec![Task::Visit {
        pin: seed.to_string(),
        depth: 0,
    }];

    while let Some(task) = stack.pop() {
        match task {
            Task::Visit { pin, depth } => {
                if !visit_pin(corners, pin, depth, visited, trace, &mut stack) {
                    return false;
                }
            }
            Task::Arc {
                pin,
                index,
                depth,
                related,
            } => {
                if !check_arc(corners, pin, index, depth, related, trace, &mut stack) {
                    return false;
                }
            }
        }
    }
    true
}

fn visit_pin(
    corners: &[Corner],
    pin: String,
    depth: usize,
    visited: &mut HashSet<String>,
    trace: &mut Vec<TraceEvent>,
    stack: &mut Vec<Task>,
) -> bool {
    if visited.contains(&pin) {
        trace.push(TraceEvent::AlreadyVisited { pin, depth });
        return true;
    }

    let present = corners.iter().filter(|c| c.db.contains_pin(&pin)).count();
    if present == 0 {
        if visited.is_empty() {
            trace.push(TraceEvent::UnknownSeed { pin });
            return false;
        }
        trace.push(TraceEvent::BoundaryPin { pin, depth });
        return true;
    }
    if present < corners.len() {
        let missing_from = corners
            .iter()
            .filter(|c| !c.db.contains_pin(&pin))
            .map(|c| c.name.clone())
            .collect();
        trace.push(TraceEvent::MissingInSome {
            pin,
            depth,
            missing_from,
        });
        return false;
    }

    trace.push(TraceEvent::EnterPin {
        pin: pin.clone(),
        depth,
    });
    visited.insert(pin.clone());

    let arc_lists: Vec<_> = corners
        .iter()
        .filter_map(|c| c.db.arcs(&pin))
        .collect();

    let first_len = arc_lists[0].len();
    if arc_lists.iter().any(|arcs| arcs.len() != first_len) {
        let counts = corners
            .iter()
            .zip(&arc_lists)
            .map(|(c, arcs)| (c.name.clone(), arcs.len()))
            .collect();
        trace.push(TraceEvent::ArcCountMismatch { pin, depth, counts });
        return false;
    }

    // Push in reverse so arc 0 pops (and fully resolves) first.
    for index in (0..first_len).rev() {
        let related = arc_lists
            .iter()
            .map(|arcs| arcs[index].related_pin.clone())
            .collect();
        stack.push(Task::Arc {
            pin: pin.clone(),
            index,
            depth,
            related,
        });
    }
    true
}

fn check_arc(
    corners: &[Corner],
    pin: String,
    index: usize,
    depth: usize,
    related: Vec<Option<String>>,
    trace: &mut Vec<TraceEvent>,
    stack: &mut Vec<Task>,
) -> bool {
    let first = related[0].clone();
    if related.iter().any(|r| *r != first) {
        let observed = corners
            .iter()
            .zip(&related)
            .map(|(c, r)| (c.name.clone(), r.clone().unwrap_or_else(|| "N/A".into())))
            .collect();
        trace.push(TraceEvent::RelatedPinMismatch {
            pin,
            index,
            depth,
            observed,
        });
        return false;
    }

    let next = first.unwrap_or_else(|| "N/A".into());
    trace.push(TraceEvent::ArcLink {
        pin,
        related: next.clone(),
        index,
        depth,
    });

    if next != "N/A" && !next.is_empty() {
        stack.push(Task::Visit {
            pin: next,
            depth: depth + 1,
        });
    }
    true
}
