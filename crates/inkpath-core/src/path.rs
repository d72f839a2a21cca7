//! Piecewise cubic-Bézier path model.
//!
//! A path is an ordered sequence of anchor points. Every anchor owns two
//! handle *slots* (incoming and outgoing), each independently absent. An
//! absent handle degenerates its end of the segment toward a straight join
//! at the anchor.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Horizontal offset of the default tangent handles seeded by [`BezierPath::add_anchor`].
pub const DEFAULT_HANDLE_OFFSET: f64 = 30.0;

/// Index-bound violations on path/anchor references.
///
/// These are programming-logic errors in single-threaded interactive use;
/// callers at the interaction boundary absorb them as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("path index {0} out of range")]
    PathOutOfRange(usize),
    #[error("anchor index {0} out of range")]
    AnchorOutOfRange(usize),
}

/// Result type for model edit operations.
pub type EditResult<T> = Result<T, EditError>;

/// Which tangent handle of an anchor an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleEnd {
    /// Influences the curve arriving from the previous anchor.
    Incoming,
    /// Influences the curve leaving toward the next anchor.
    Outgoing,
}

impl HandleEnd {
    /// The handle on the other side of the anchor.
    pub fn opposite(self) -> Self {
        match self {
            HandleEnd::Incoming => HandleEnd::Outgoing,
            HandleEnd::Outgoing => HandleEnd::Incoming,
        }
    }
}

/// An open piecewise cubic-Bézier curve.
///
/// Invariant: `anchors`, `handles_in` and `handles_out` always have equal
/// length — every anchor has both handle slots even when both are `None`.
/// A path with zero anchors is valid and is skipped during serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BezierPath {
    /// Backbone points, in traversal order.
    pub anchors: Vec<Point>,
    /// Incoming tangent handle slot per anchor.
    pub handles_in: Vec<Option<Point>>,
    /// Outgoing tangent handle slot per anchor.
    pub handles_out: Vec<Option<Point>>,
}

/// Reflect `handle` through `anchor` (point symmetry).
fn reflect(anchor: Point, handle: Point) -> Point {
    anchor - (handle - anchor)
}

impl BezierPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Check if the path has no anchors.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Get an anchor position.
    pub fn anchor(&self, anchor: usize) -> Option<Point> {
        self.anchors.get(anchor).copied()
    }

    /// Get a handle slot's current value.
    pub fn handle(&self, anchor: usize, end: HandleEnd) -> Option<Point> {
        let slots = match end {
            HandleEnd::Incoming => &self.handles_in,
            HandleEnd::Outgoing => &self.handles_out,
        };
        slots.get(anchor).copied().flatten()
    }

    /// Append an anchor with default symmetric horizontal tangents.
    ///
    /// The incoming handle is seeded at `point - (30, 0)` and the outgoing
    /// at `point + (30, 0)`.
    pub fn add_anchor(&mut self, point: Point) {
        let offset = Vec2::new(DEFAULT_HANDLE_OFFSET, 0.0);
        self.anchors.push(point);
        self.handles_in.push(Some(point - offset));
        self.handles_out.push(Some(point + offset));
        debug_assert!(self.slots_consistent());
    }

    /// Translate an anchor and any present handles rigidly by `delta`.
    pub fn move_anchor(&mut self, anchor: usize, delta: Vec2) -> EditResult<()> {
        let point = self
            .anchors
            .get_mut(anchor)
            .ok_or(EditError::AnchorOutOfRange(anchor))?;
        *point += delta;
        if let Some(h) = self.handles_in[anchor].as_mut() {
            *h += delta;
        }
        if let Some(h) = self.handles_out[anchor].as_mut() {
            *h += delta;
        }
        Ok(())
    }

    /// Translate the named handle by `delta`, keeping the opposite handle
    /// point-symmetric about the anchor.
    ///
    /// The symmetry update only applies when the opposite handle already
    /// exists; an absent opposite is never created. An absent named handle
    /// is a no-op.
    pub fn move_handle(&mut self, anchor: usize, end: HandleEnd, delta: Vec2) -> EditResult<()> {
        let anchor_point = self
            .anchor(anchor)
            .ok_or(EditError::AnchorOutOfRange(anchor))?;
        let Some(current) = self.handle(anchor, end) else {
            return Ok(());
        };
        let moved = current + delta;
        self.set_slot(anchor, end, Some(moved));
        if self.handle(anchor, end.opposite()).is_some() {
            self.set_slot(anchor, end.opposite(), Some(reflect(anchor_point, moved)));
        }
        Ok(())
    }

    /// Set a handle slot to an absolute position without any symmetric
    /// update. Used when sculpting a freshly added anchor's tangent.
    pub fn set_handle(&mut self, anchor: usize, end: HandleEnd, point: Point) -> EditResult<()> {
        if anchor >= self.anchors.len() {
            return Err(EditError::AnchorOutOfRange(anchor));
        }
        self.set_slot(anchor, end, Some(point));
        Ok(())
    }

    fn set_slot(&mut self, anchor: usize, end: HandleEnd, value: Option<Point>) {
        let slots = match end {
            HandleEnd::Incoming => &mut self.handles_in,
            HandleEnd::Outgoing => &mut self.handles_out,
        };
        slots[anchor] = value;
    }

    /// Check the parallel-slots invariant.
    pub fn slots_consistent(&self) -> bool {
        self.handles_in.len() == self.anchors.len() && self.handles_out.len() == self.anchors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_anchor_seeds_default_handles() {
        let mut path = BezierPath::new();
        path.add_anchor(Point::new(10.0, 20.0));

        assert_eq!(path.len(), 1);
        assert_eq!(path.handle(0, HandleEnd::Incoming), Some(Point::new(-20.0, 20.0)));
        assert_eq!(path.handle(0, HandleEnd::Outgoing), Some(Point::new(40.0, 20.0)));
    }

    #[test]
    fn test_slots_invariant_after_operations() {
        let mut path = BezierPath::new();
        for i in 0..5 {
            path.add_anchor(Point::new(i as f64 * 10.0, 0.0));
            assert!(path.slots_consistent());
        }
        path.move_anchor(2, Vec2::new(5.0, 5.0)).unwrap();
        path.move_handle(3, HandleEnd::Outgoing, Vec2::new(1.0, 1.0)).unwrap();
        assert!(path.slots_consistent());
    }

    #[test]
    fn test_move_anchor_translates_handles_rigidly() {
        let mut path = BezierPath::new();
        path.add_anchor(Point::new(0.0, 0.0));
        path.move_anchor(0, Vec2::new(10.0, -5.0)).unwrap();

        assert_eq!(path.anchor(0), Some(Point::new(10.0, -5.0)));
        assert_eq!(path.handle(0, HandleEnd::Incoming), Some(Point::new(-20.0, -5.0)));
        assert_eq!(path.handle(0, HandleEnd::Outgoing), Some(Point::new(40.0, -5.0)));
    }

    #[test]
    fn test_move_anchor_skips_absent_handles() {
        let mut path = BezierPath::new();
        path.add_anchor(Point::new(0.0, 0.0));
        path.handles_in[0] = None;
        path.move_anchor(0, Vec2::new(3.0, 4.0)).unwrap();

        assert_eq!(path.anchor(0), Some(Point::new(3.0, 4.0)));
        assert_eq!(path.handle(0, HandleEnd::Incoming), None);
        assert_eq!(path.handle(0, HandleEnd::Outgoing), Some(Point::new(33.0, 4.0)));
    }

    #[test]
    fn test_move_handle_symmetry_law() {
        let mut path = BezierPath::new();
        let anchor = Point::new(50.0, 50.0);
        path.add_anchor(anchor);

        let delta = Vec2::new(7.0, -3.0);
        let old_out = path.handle(0, HandleEnd::Outgoing).unwrap();
        path.move_handle(0, HandleEnd::Outgoing, delta).unwrap();

        let new_out = old_out + delta;
        assert_eq!(path.handle(0, HandleEnd::Outgoing), Some(new_out));
        let expected_in = anchor - (new_out - anchor);
        assert_eq!(path.handle(0, HandleEnd::Incoming), Some(expected_in));
    }

    #[test]
    fn test_move_handle_absent_opposite_not_created() {
        let mut path = BezierPath::new();
        path.add_anchor(Point::new(0.0, 0.0));
        path.handles_in[0] = None;

        path.move_handle(0, HandleEnd::Outgoing, Vec2::new(5.0, 5.0)).unwrap();
        assert_eq!(path.handle(0, HandleEnd::Outgoing), Some(Point::new(35.0, 5.0)));
        assert_eq!(path.handle(0, HandleEnd::Incoming), None);
    }

    #[test]
    fn test_move_handle_absent_named_is_noop() {
        let mut path = BezierPath::new();
        path.add_anchor(Point::new(0.0, 0.0));
        path.handles_out[0] = None;
        let before_in = path.handle(0, HandleEnd::Incoming);

        path.move_handle(0, HandleEnd::Outgoing, Vec2::new(5.0, 5.0)).unwrap();
        assert_eq!(path.handle(0, HandleEnd::Outgoing), None);
        assert_eq!(path.handle(0, HandleEnd::Incoming), before_in);
    }

    #[test]
    fn test_out_of_range_errors() {
        let mut path = BezierPath::new();
        assert!(matches!(
            path.move_anchor(0, Vec2::ZERO),
            Err(EditError::AnchorOutOfRange(_))
        ));
        assert!(matches!(
            path.move_handle(3, HandleEnd::Incoming, Vec2::ZERO),
            Err(EditError::AnchorOutOfRange(_))
        ));
        assert!(matches!(
            path.set_handle(1, HandleEnd::Outgoing, Point::ZERO),
            Err(EditError::AnchorOutOfRange(_))
        ));
    }

    #[test]
    fn test_handle_end_opposite() {
        assert_eq!(HandleEnd::Incoming.opposite(), HandleEnd::Outgoing);
        assert_eq!(HandleEnd::Outgoing.opposite(), HandleEnd::Incoming);
    }
}
