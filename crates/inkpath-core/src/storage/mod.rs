//! Persistence collaborators: document storage backends and SVG file I/O.
//!
//! The editor core never does I/O on its own; the host hands a backend to
//! whatever owns the session. A failed read or write surfaces as a
//! [`StorageError`] and leaves the in-memory document and history stacks
//! untouched.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::document::PathDocument;
use crate::svg::normalize_overlay;
use std::fs;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for document storage backends.
///
/// Implementations can keep documents in memory or on the filesystem; the
/// host serializes calls onto the same event queue as pointer input, so
/// backends never race an in-flight gesture.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, id: &str, document: &PathDocument) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a document.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<PathDocument>>;

    /// Delete a document.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all document IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Write exported SVG text to a file picked by the host.
pub fn write_svg_file(path: &Path, svg_text: &str) -> StorageResult<()> {
    fs::write(path, svg_text)
        .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", path.display())))
}

/// Read an SVG file for overlay display, normalizing its `viewBox`.
pub fn read_overlay_file(path: &Path) -> StorageResult<String> {
    let text = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("failed to read {}: {e}", path.display())))?;
    Ok(normalize_overlay(&text))
}

/// Busy-poll a storage future to completion. Test-only: the backends here
/// resolve without ever returning `Pending`.
#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
