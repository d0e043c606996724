//! Dynamic loading of the resolved native library.
//!
//! Thin wrapper over `libloading` that ties platform resolution to the
//! actual load and keeps the resolved path around for error messages.
//! The exported symbols are functions accepting and returning wire
//! buffers or raw scalar encodings; their concrete signatures are a
//! per-library contract declared by the caller at lookup time.

use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use super::platform::{resolve_library_path, Arch, Os};
use crate::error::Result;

/// A loaded native library exporting wire-buffer functions.
pub struct NativeLibrary {
    path: PathBuf,
    library: Library,
}

impl NativeLibrary {
    /// Resolve the platform-specific file for `name` under `dir` and
    /// load it.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::UnsupportedPlatform`] if the current OS
    /// or CPU has no naming convention, or
    /// [`WirebufError::LibraryLoad`] if the file cannot be loaded.
    ///
    /// [`WirebufError::UnsupportedPlatform`]: crate::WirebufError::UnsupportedPlatform
    /// [`WirebufError::LibraryLoad`]: crate::WirebufError::LibraryLoad
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = resolve_library_path(dir, name, Os::current()?, Arch::current()?)?;
        Self::load_direct(&path)
    }

    /// Load a specific library file, bypassing platform resolution.
    ///
    /// Generally you want [`load`](Self::load), which picks the right
    /// file for the current platform.
    pub fn load_direct(path: &Path) -> Result<Self> {
        // Safety: loading a shared library runs its initializers; we
        // trust the caller-supplied path the same way the process
        // trusts any library it links.
        let library = unsafe { Library::new(path)? };
        Ok(Self {
            path: path.to_path_buf(),
            library,
        })
    }

    /// Path of the loaded library file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an exported symbol by name.
    ///
    /// # Safety
    ///
    /// The caller must supply the correct function signature as `T`;
    /// the boundary is untyped raw memory and a mismatch is undefined
    /// behavior. The capacity contract on any wire-buffer parameters is
    /// a precondition of the named function, not checked here.
    pub unsafe fn get<T>(&self, symbol: &[u8]) -> Result<Symbol<'_, T>> {
        Ok(self.library.get(symbol)?)
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
