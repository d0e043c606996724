//! Spill-file resolution for overflow-mode buffers.
//!
//! When a value is too large to pass inline, the writing side puts it
//! in a temporary file and encodes the file path in the buffer with a
//! negative length field. This module turns that path back into the
//! value: read the whole file, delete it, return the bytes.
//!
//! The file is consumed exactly once. A second read of the same buffer
//! finds the file already deleted and fails with
//! [`WirebufError::OverflowRead`] — that is a caller bug, not a
//! transient condition, so there is no retry.

use std::fs;
use std::path::Path;

use crate::error::{Result, WirebufError};

/// Read a spill file's entire contents, then delete it.
///
/// Deletion failure does not fail the read: the value has already been
/// obtained, so the failure is only logged and the file is left for
/// whatever cleans the temp directory.
///
/// # Errors
///
/// Returns [`WirebufError::OverflowRead`] if the file is missing or
/// unreadable. This indicates a protocol violation by the writing side
/// (or a double read of a single-use buffer).
pub fn read_spill(path: &Path) -> Result<Vec<u8>> {
    let payload = fs::read(path).map_err(|source| WirebufError::OverflowRead {
        path: path.display().to_string(),
        source,
    })?;

    if let Err(err) = fs::remove_file(path) {
        tracing::warn!("failed to delete spill file {}: {}", path.display(), err);
    }

    Ok(payload)
}
