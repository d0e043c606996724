//! Native library discovery and loading.
//!
//! [`resolve_library_path`] maps (OS, architecture) pairs to
//! file-naming conventions; [`NativeLibrary`] loads the resolved file
//! and exposes its exported symbols.

mod library;
mod platform;

pub use library::NativeLibrary;
pub use platform::{library_file_name, resolve_library_path, Arch, Os};
