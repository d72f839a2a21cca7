//! Pointer hit-testing against document anchors and handles.

use crate::document::PathDocument;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default hit radius in canvas units.
pub const HIT_TOLERANCE: f64 = 10.0;

/// What a pointer position resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    /// A path anchor.
    Anchor { path: usize, anchor: usize },
    /// An anchor's outgoing tangent handle. Incoming handles are never
    /// independently hit-tested; dragging the outgoing side drives both
    /// through the symmetry update.
    HandleOut { path: usize, anchor: usize },
}

fn within(a: Point, b: Point, tolerance: f64) -> bool {
    // Strict comparison: a point exactly on the radius is a miss
    let d = a - b;
    d.hypot2() < tolerance * tolerance
}

/// Resolve `position` to the first anchor or outgoing handle within
/// `tolerance`, or `None` for a miss.
///
/// Scan order: for each path in insertion order, all anchors first, then
/// all outgoing handles. An ordered linear scan is O(anchors + handles)
/// per call, fine at interactive point counts.
pub fn hit_test(document: &PathDocument, position: Point, tolerance: f64) -> Option<HitTarget> {
    for (path_index, path) in document.paths.iter().enumerate() {
        for (anchor_index, &anchor) in path.anchors.iter().enumerate() {
            if within(anchor, position, tolerance) {
                return Some(HitTarget::Anchor {
                    path: path_index,
                    anchor: anchor_index,
                });
            }
        }
        for (anchor_index, handle) in path.handles_out.iter().enumerate() {
            if let Some(handle) = handle {
                if within(*handle, position, tolerance) {
                    return Some(HitTarget::HandleOut {
                        path: path_index,
                        anchor: anchor_index,
                    });
                }
            }
        }
    }
    None
}
