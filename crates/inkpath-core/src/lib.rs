//! Inkpath Core Library
//!
//! Curve data model and interactive editing state machine for the inkpath
//! vector-path editor: anchors and tangent handles, hit-testing and
//! selection, snapshot-based undo/redo, and deterministic SVG export.
//! Window chrome, dialogs and rendering live with the host application.

pub mod document;
pub mod hittest;
pub mod input;
pub mod path;
pub mod session;
pub mod storage;
pub mod svg;

pub use document::PathDocument;
pub use hittest::{hit_test, HitTarget, HIT_TOLERANCE};
pub use input::{InputState, MouseButton, PointerEvent};
pub use path::{BezierPath, EditError, HandleEnd, DEFAULT_HANDLE_OFFSET};
pub use session::{EditState, EditorSession, Selection};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
