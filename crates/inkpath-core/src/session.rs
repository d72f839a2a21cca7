//! Editor session: the interaction state machine over the document.
//!
//! One session owns exactly one document plus its ephemeral editing state
//! (current mode, selection, live preview point). The host application
//! constructs it explicitly and feeds it pointer/gesture events; there are
//! no process-wide singletons. Events are processed synchronously, one at
//! a time, so every mutation completes before the next event is accepted.

use crate::document::PathDocument;
use crate::hittest::{hit_test, HitTarget, HIT_TOLERANCE};
use crate::path::HandleEnd;
use crate::svg;
use kurbo::{Point, Vec2};
use log::{debug, warn};

/// State of the interaction machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditState {
    /// View mode: anchor creation disabled, no live preview.
    Idle,
    /// Actively appending anchors to the last path.
    Drawing,
    /// An anchor is selected and the pointer is dragging it.
    EditingAnchor,
    /// An outgoing handle is selected and the pointer is dragging it.
    EditingHandle,
    /// A long-press drag is sculpting the newest anchor's outgoing handle.
    ShapingNewHandle {
        /// Path and anchor being shaped.
        path: usize,
        anchor: usize,
        /// The anchor's position when the press started.
        anchor_point: Point,
        /// Current press position, shown as the provisional handle.
        provisional: Point,
    },
}

/// The active selection, at most one across the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A path anchor.
    Anchor { path: usize, anchor: usize },
    /// An anchor's outgoing handle.
    Handle { path: usize, anchor: usize },
}

/// Interactive editing session over a single document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: PathDocument,
    state: EditState,
    selection: Option<Selection>,
    preview_point: Option<Point>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Create a session with a fresh document, ready to draw.
    pub fn new() -> Self {
        Self::with_document(PathDocument::new())
    }

    /// Create a session over an existing document.
    pub fn with_document(document: PathDocument) -> Self {
        Self {
            document,
            state: EditState::Drawing,
            selection: None,
            preview_point: None,
        }
    }

    /// Read-only view of the document, for rendering and export.
    pub fn document(&self) -> &PathDocument {
        &self.document
    }

    /// Current machine state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Current selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Live preview point shown while drawing.
    pub fn preview_point(&self) -> Option<Point> {
        self.preview_point
    }

    /// Pointer pressed. While drawing, a miss creates an anchor; a hit
    /// selects the anchor or handle and arms a drag. The drag itself
    /// checkpoints, so selection alone pushes no history.
    pub fn pointer_down(&mut self, position: Point) {
        if !matches!(self.state, EditState::Drawing) {
            return;
        }
        match hit_test(&self.document, position, HIT_TOLERANCE) {
            None => {
                self.document.push_undo();
                let path = self.document.last_path_index();
                match self.document.add_anchor(path, position) {
                    Ok(anchor) => {
                        debug!("added anchor {anchor} to path {path} at {position:?}");
                        self.selection = Some(Selection::Anchor { path, anchor });
                    }
                    Err(e) => warn!("add_anchor rejected: {e}"),
                }
            }
            Some(HitTarget::Anchor { path, anchor }) => {
                self.selection = Some(Selection::Anchor { path, anchor });
                self.state = EditState::EditingAnchor;
            }
            Some(HitTarget::HandleOut { path, anchor }) => {
                self.selection = Some(Selection::Handle { path, anchor });
                self.state = EditState::EditingHandle;
            }
        }
    }

    /// Incremental drag movement. Every delta is its own undoable step —
    /// fine-grained on purpose, so undo walks back through the drag.
    pub fn drag_update(&mut self, delta: Vec2) {
        if matches!(
            self.state,
            EditState::Idle | EditState::ShapingNewHandle { .. }
        ) {
            return;
        }
        match self.selection {
            Some(Selection::Anchor { path, anchor }) => {
                self.document.push_undo();
                if let Err(e) = self.document.move_anchor(path, anchor, delta) {
                    warn!("move_anchor rejected: {e}");
                }
            }
            Some(Selection::Handle { path, anchor }) => {
                self.document.push_undo();
                if let Err(e) =
                    self.document
                        .move_handle(path, anchor, HandleEnd::Outgoing, delta)
                {
                    warn!("move_handle rejected: {e}");
                }
            }
            None => {}
        }
    }

    /// Pointer released: a drag in progress ends, back to drawing.
    pub fn pointer_up(&mut self) {
        if matches!(self.state, EditState::EditingAnchor | EditState::EditingHandle) {
            self.state = EditState::Drawing;
        }
    }

    /// Pointer moved without a drag: update the live preview while drawing.
    pub fn pointer_move(&mut self, position: Point) {
        if matches!(self.state, EditState::Drawing) {
            self.preview_point = Some(position);
        }
    }

    /// Long-press began: start sculpting the newest anchor's outgoing
    /// handle. Requires at least one anchor on the last path.
    pub fn long_press_start(&mut self, position: Point) {
        if !matches!(self.state, EditState::Drawing) {
            return;
        }
        let path = self.document.last_path_index();
        let Some(last) = self.document.paths[path].len().checked_sub(1) else {
            return;
        };
        let anchor_point = match self.document.paths[path].anchor(last) {
            Some(p) => p,
            None => return,
        };
        self.document.push_undo();
        self.state = EditState::ShapingNewHandle {
            path,
            anchor: last,
            anchor_point,
            provisional: position,
        };
        debug!("shaping handle for anchor {last} on path {path}");
    }

    /// Long-press drag: the outgoing handle follows the press position.
    /// No symmetric update — sculpting a fresh handle never rewrites the
    /// incoming side.
    pub fn long_press_move(&mut self, position: Point) {
        let EditState::ShapingNewHandle { path, anchor, anchor_point, .. } = self.state else {
            return;
        };
        self.document.push_undo();
        if let Err(e) = self
            .document
            .set_handle(path, anchor, HandleEnd::Outgoing, position)
        {
            warn!("set_handle rejected: {e}");
        }
        self.state = EditState::ShapingNewHandle {
            path,
            anchor,
            anchor_point,
            provisional: position,
        };
    }

    /// Long-press ended: drop the provisional state, back to drawing.
    pub fn long_press_end(&mut self) {
        if matches!(self.state, EditState::ShapingNewHandle { .. }) {
            self.state = EditState::Drawing;
        }
    }

    /// Leave drawing for view mode: anchor creation disabled, preview
    /// cleared.
    pub fn exit_drawing(&mut self) {
        self.state = EditState::Idle;
        self.preview_point = None;
    }

    /// Start a new path and re-enter drawing mode.
    pub fn start_new_path(&mut self) {
        self.document.push_undo();
        let path = self.document.add_path();
        debug!("started path {path}");
        self.state = EditState::Drawing;
    }

    /// Discard all paths, reseed a single empty one, re-enter drawing.
    pub fn clear_canvas(&mut self) {
        self.document.push_undo();
        self.document.clear();
        self.selection = None;
        self.preview_point = None;
        self.state = EditState::Drawing;
    }

    /// Undo the last mutation. Clears selection and preview so stale
    /// indices never outlive the geometry they pointed into.
    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.selection = None;
            self.preview_point = None;
        }
        undone
    }

    /// Redo the last undone mutation, clearing selection and preview.
    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        if redone {
            self.selection = None;
            self.preview_point = None;
        }
        redone
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    /// Export the document as a standalone SVG string.
    pub fn export_svg(&self) -> String {
        svg::document_svg(&self.document)
    }

    /// Normalize an imported SVG string for display as an overlay.
    /// Leaves the document and history untouched.
    pub fn import_overlay(&self, svg_text: &str) -> String {
        svg::normalize_overlay(svg_text)
    }
}
