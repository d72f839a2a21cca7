//! Path document and snapshot-based undo/redo history.

use crate::path::{BezierPath, EditError, EditResult, HandleEnd};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// A deep snapshot of document geometry for undo/redo.
///
/// Snapshots are independent copies: mutating the live document after a
/// snapshot was pushed never alters the stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentSnapshot {
    paths: Vec<BezierPath>,
}

/// An ordered collection of Bézier paths plus its edit history.
///
/// Path order is insertion order; later paths render on top. A document
/// always holds at least one path once editing has begun — construction
/// seeds a single empty path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All paths, back to front.
    pub paths: Vec<BezierPath>,
    /// Undo history stack.
    #[serde(skip)]
    undo_stack: Vec<DocumentSnapshot>,
    /// Redo history stack.
    #[serde(skip)]
    redo_stack: Vec<DocumentSnapshot>,
}

impl Default for PathDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PathDocument {
    /// Create a new document seeded with one empty path.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            paths: vec![BezierPath::new()],
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Take a deep snapshot of the current geometry.
    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            paths: self.paths.clone(),
        }
    }

    /// Push current state to the undo stack (call before making changes).
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);

        // Any new mutation invalidates the redo branch
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            let current = self.snapshot();
            self.redo_stack.push(current);
            self.paths = snapshot.paths;
            true
        } else {
            false
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            let current = self.snapshot();
            self.undo_stack.push(current);
            self.paths = snapshot.paths;
            true
        } else {
            false
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Depth of the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Append a new empty path and return its index.
    pub fn add_path(&mut self) -> usize {
        self.paths.push(BezierPath::new());
        self.paths.len() - 1
    }

    /// Index of the last path (the one actively being drawn).
    pub fn last_path_index(&self) -> usize {
        // paths is never empty by construction
        self.paths.len() - 1
    }

    /// Discard all paths and reseed a single empty one.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.paths.push(BezierPath::new());
    }

    /// Borrow a path, bounds-checked.
    pub fn path(&self, path: usize) -> Option<&BezierPath> {
        self.paths.get(path)
    }

    fn path_mut(&mut self, path: usize) -> EditResult<&mut BezierPath> {
        self.paths
            .get_mut(path)
            .ok_or(EditError::PathOutOfRange(path))
    }

    /// Append an anchor to the path at `path` with default tangents.
    pub fn add_anchor(&mut self, path: usize, point: Point) -> EditResult<usize> {
        let p = self.path_mut(path)?;
        p.add_anchor(point);
        Ok(p.len() - 1)
    }

    /// Translate an anchor and its handles rigidly.
    pub fn move_anchor(&mut self, path: usize, anchor: usize, delta: Vec2) -> EditResult<()> {
        self.path_mut(path)?.move_anchor(anchor, delta)
    }

    /// Translate a handle, keeping its opposite point-symmetric.
    pub fn move_handle(
        &mut self,
        path: usize,
        anchor: usize,
        end: HandleEnd,
        delta: Vec2,
    ) -> EditResult<()> {
        self.path_mut(path)?.move_handle(anchor, end, delta)
    }

    /// Set a handle to an absolute position, no symmetric update.
    pub fn set_handle(
        &mut self,
        path: usize,
        anchor: usize,
        end: HandleEnd,
        point: Point,
    ) -> EditResult<()> {
        self.path_mut(path)?.set_handle(anchor, end, point)
    }

    /// Check if the document holds no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.paths.iter().all(|p| p.is_empty())
    }

    /// Total number of anchors across all paths.
    pub fn anchor_count(&self) -> usize {
        self.paths.iter().map(|p| p.len()).sum()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    ///
    /// A document persisted before any editing began may carry zero paths;
    /// reseed so the always-one-path invariant holds.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Self = serde_json::from_str(json)?;
        if doc.paths.is_empty() {
            doc.paths.push(BezierPath::new());
        }
        Ok(doc)
    }
}
