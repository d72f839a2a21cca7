//! Pointer event tracking and gesture dispatch.
//!
//! Translates raw pointer events from the host UI into editor session
//! calls: taps become anchor placement or selection, held drags become
//! incremental move deltas, and a press held in place becomes the
//! long-press gesture that sculpts the newest anchor's tangent.

use crate::session::{EditState, EditorSession};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Long-press detection constants.
const LONG_PRESS_TIME_MS: u128 = 500;
const LONG_PRESS_DISTANCE: f64 = 5.0;

/// Tracks pointer state across events and feeds the session.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in canvas coordinates.
    pub pointer_position: Point,
    /// Previous pointer position for delta calculations.
    pub previous_pointer_position: Point,
    /// Whether the left button is down.
    pub is_dragging: bool,
    /// Position where the current press started.
    pub drag_start: Option<Point>,
    /// When the current press started.
    press_time: Option<Instant>,
    /// Whether the current press has escalated to a long-press gesture.
    long_press_active: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            previous_pointer_position: Point::ZERO,
            is_dragging: false,
            drag_start: None,
            press_time: None,
            long_press_active: false,
        }
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event against the session, stamped with the
    /// current time.
    pub fn dispatch(&mut self, session: &mut EditorSession, event: PointerEvent) {
        self.handle(session, event, Instant::now());
    }

    /// Process a pointer event with an explicit timestamp.
    pub fn handle(&mut self, session: &mut EditorSession, event: PointerEvent, now: Instant) {
        match event {
            PointerEvent::Down { position, button } => {
                self.previous_pointer_position = self.pointer_position;
                self.pointer_position = position;
                if button == MouseButton::Left && !self.is_dragging {
                    self.is_dragging = true;
                    self.drag_start = Some(position);
                    self.press_time = Some(now);
                    self.long_press_active = false;
                    session.pointer_down(position);
                }
            }
            PointerEvent::Up { position, button } => {
                self.previous_pointer_position = self.pointer_position;
                self.pointer_position = position;
                if button == MouseButton::Left {
                    if self.long_press_active {
                        session.long_press_end();
                    } else {
                        session.pointer_up();
                    }
                    self.is_dragging = false;
                    self.drag_start = None;
                    self.press_time = None;
                    self.long_press_active = false;
                }
            }
            PointerEvent::Move { position } => {
                self.previous_pointer_position = self.pointer_position;
                self.pointer_position = position;
                if self.long_press_active {
                    session.long_press_move(position);
                } else if self.is_dragging {
                    // Escalate only when the session actually starts
                    // shaping: a hold over an existing anchor or handle is
                    // mid-drag, not a long press, and must stay a drag so
                    // the release path still calls pointer_up.
                    if self.press_qualifies_as_long(now) {
                        session.long_press_start(position);
                    }
                    if matches!(session.state(), EditState::ShapingNewHandle { .. }) {
                        self.long_press_active = true;
                    } else {
                        session.drag_update(self.pointer_delta());
                    }
                } else {
                    session.pointer_move(position);
                }
            }
        }
    }

    /// A press becomes a long-press once held past the time threshold
    /// without wandering from its origin.
    fn press_qualifies_as_long(&self, now: Instant) -> bool {
        let (Some(start), Some(pressed_at)) = (self.drag_start, self.press_time) else {
            return false;
        };
        let held = now.duration_since(pressed_at).as_millis();
        let travelled = (self.pointer_position - start).hypot();
        held >= LONG_PRESS_TIME_MS && travelled < LONG_PRESS_DISTANCE
    }

    /// Get the pointer movement delta since the previous event.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }

    /// Get the drag delta from the press origin, if pressed.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.drag_start.map(|start| self.pointer_position - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EditState;
    use std::time::Duration;

    fn press(input: &mut InputState, session: &mut EditorSession, pos: Point, at: Instant) {
        input.handle(
            session,
            PointerEvent::Down { position: pos, button: MouseButton::Left },
            at,
        );
    }

    #[test]
    fn test_press_places_anchor_and_tracks_drag() {
        let mut input = InputState::new();
        let mut session = EditorSession::new();
        let t0 = Instant::now();

        press(&mut input, &mut session, Point::new(100.0, 100.0), t0);
        assert!(input.is_dragging);
        assert_eq!(input.drag_start, Some(Point::new(100.0, 100.0)));
        assert_eq!(session.document().anchor_count(), 1);
    }

    #[test]
    fn test_quick_drag_moves_selection() {
        let mut input = InputState::new();
        let mut session = EditorSession::new();
        let t0 = Instant::now();

        press(&mut input, &mut session, Point::new(0.0, 0.0), t0);
        // Fast movement: stays a plain drag, the fresh anchor follows
        input.handle(
            &mut session,
            PointerEvent::Move { position: Point::new(20.0, 0.0) },
            t0 + Duration::from_millis(50),
        );
        assert_eq!(
            session.document().paths[0].anchor(0),
            Some(Point::new(20.0, 0.0))
        );

        let delta = input.drag_delta().unwrap();
        assert!((delta.x - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_held_press_becomes_long_press() {
        let mut input = InputState::new();
        let mut session = EditorSession::new();
        let t0 = Instant::now();

        press(&mut input, &mut session, Point::new(0.0, 0.0), t0);
        // Barely moved, held past the threshold: long press
        input.handle(
            &mut session,
            PointerEvent::Move { position: Point::new(1.0, 1.0) },
            t0 + Duration::from_millis(600),
        );
        assert!(matches!(session.state(), EditState::ShapingNewHandle { .. }));

        // Further movement sculpts the handle
        input.handle(
            &mut session,
            PointerEvent::Move { position: Point::new(40.0, 40.0) },
            t0 + Duration::from_millis(700),
        );
        assert_eq!(
            session.document().paths[0].handle(0, crate::path::HandleEnd::Outgoing),
            Some(Point::new(40.0, 40.0))
        );

        input.handle(
            &mut session,
            PointerEvent::Up { position: Point::new(40.0, 40.0), button: MouseButton::Left },
            t0 + Duration::from_millis(800),
        );
        assert_eq!(session.state(), EditState::Drawing);
        assert!(!input.is_dragging);
    }

    #[test]
    fn test_held_press_on_existing_anchor_stays_a_drag() {
        let mut input = InputState::new();
        let mut session = EditorSession::new();
        let t0 = Instant::now();

        press(&mut input, &mut session, Point::new(0.0, 0.0), t0);
        input.handle(
            &mut session,
            PointerEvent::Up { position: Point::new(0.0, 0.0), button: MouseButton::Left },
            t0 + Duration::from_millis(100),
        );

        // Press and hold on the anchor itself: the session is dragging it,
        // so the hold must not escalate to handle sculpting
        press(&mut input, &mut session, Point::new(1.0, 0.0), t0 + Duration::from_millis(200));
        assert_eq!(session.state(), EditState::EditingAnchor);
        input.handle(
            &mut session,
            PointerEvent::Move { position: Point::new(2.0, 0.0) },
            t0 + Duration::from_millis(900),
        );
        assert!(!matches!(session.state(), EditState::ShapingNewHandle { .. }));

        // Release lands back in Drawing, not wedged in EditingAnchor
        input.handle(
            &mut session,
            PointerEvent::Up { position: Point::new(2.0, 0.0), button: MouseButton::Left },
            t0 + Duration::from_millis(1000),
        );
        assert_eq!(session.state(), EditState::Drawing);

        // A later press far away creates a fresh anchor instead of
        // dragging the old selection remotely
        press(&mut input, &mut session, Point::new(500.0, 500.0), t0 + Duration::from_millis(1100));
        assert_eq!(session.document().anchor_count(), 2);
        let first = session.document().paths[0].anchor(0).unwrap();
        assert!(first.x < 10.0);
    }

    #[test]
    fn test_movement_cancels_long_press() {
        let mut input = InputState::new();
        let mut session = EditorSession::new();
        let t0 = Instant::now();

        press(&mut input, &mut session, Point::new(0.0, 0.0), t0);
        // Wandered too far from the origin before the hold elapsed
        input.handle(
            &mut session,
            PointerEvent::Move { position: Point::new(30.0, 0.0) },
            t0 + Duration::from_millis(100),
        );
        input.handle(
            &mut session,
            PointerEvent::Move { position: Point::new(31.0, 0.0) },
            t0 + Duration::from_millis(700),
        );
        assert!(!matches!(session.state(), EditState::ShapingNewHandle { .. }));
    }

    #[test]
    fn test_move_without_press_updates_preview() {
        let mut input = InputState::new();
        let mut session = EditorSession::new();

        input.handle(
            &mut session,
            PointerEvent::Move { position: Point::new(12.0, 34.0) },
            Instant::now(),
        );
        assert_eq!(session.preview_point(), Some(Point::new(12.0, 34.0)));
    }

    #[test]
    fn test_non_left_buttons_ignored() {
        let mut input = InputState::new();
        let mut session = EditorSession::new();

        input.handle(
            &mut session,
            PointerEvent::Down { position: Point::new(0.0, 0.0), button: MouseButton::Right },
            Instant::now(),
        );
        assert!(!input.is_dragging);
        assert_eq!(session.document().anchor_count(), 0);
    }
}
