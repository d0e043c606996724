//! Platform resolution for native library files.
//!
//! Shared libraries ship one file per (OS, architecture) pair, named
//! `{name}{arch_part}{os_ext}`, e.g. `libfoo-x64.so` or
//! `libfoo-arm64.dylib`. The branch over platform identifiers is a
//! pure lookup here, so resolution is testable for every pair without
//! loading anything.

use std::path::{Path, PathBuf};

use crate::error::{Result, WirebufError};

/// Operating systems with a known library naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux with glibc.
    Linux,
    /// Linux with musl libc (separate binaries, `-musl.so` suffix).
    LinuxMusl,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl Os {
    /// Detect the operating system this binary was built for.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::UnsupportedPlatform`] for any OS without
    /// a naming convention in the table.
    pub fn current() -> Result<Self> {
        if cfg!(all(target_os = "linux", target_env = "musl")) {
            Ok(Self::LinuxMusl)
        } else if cfg!(target_os = "linux") {
            Ok(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Ok(Self::MacOs)
        } else if cfg!(target_os = "windows") {
            Ok(Self::Windows)
        } else {
            Err(WirebufError::UnsupportedPlatform(format!(
                "operating system '{}'",
                std::env::consts::OS
            )))
        }
    }

    /// Library file-name suffix for this OS.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Linux => ".so",
            Self::LinuxMusl => "-musl.so",
            Self::MacOs => ".dylib",
            Self::Windows => ".dll",
        }
    }
}

/// CPU architectures with a known library naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// x86-64 / AMD64.
    X64,
    /// 64-bit ARM.
    Arm64,
}

impl Arch {
    /// Detect the architecture this binary was built for.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::UnsupportedPlatform`] for any CPU
    /// without a naming convention in the table.
    pub fn current() -> Result<Self> {
        if cfg!(target_arch = "x86_64") {
            Ok(Self::X64)
        } else if cfg!(target_arch = "aarch64") {
            Ok(Self::Arm64)
        } else {
            Err(WirebufError::UnsupportedPlatform(format!(
                "CPU architecture '{}'",
                std::env::consts::ARCH
            )))
        }
    }

    /// File-name infix for this architecture.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::X64 => "-x64",
            Self::Arm64 => "-arm64",
        }
    }
}

/// Compose the platform-specific file name for a logical library name.
pub fn library_file_name(name: &str, os: Os, arch: Arch) -> String {
    format!("{name}{}{}", arch.suffix(), os.extension())
}

/// Resolve a logical library name to a concrete file path.
///
/// The directory is made absolute but is not required to exist;
/// existence is checked by the actual load.
///
/// # Errors
///
/// Returns an I/O error if the directory path cannot be made absolute
/// (e.g. empty path).
pub fn resolve_library_path(dir: &Path, name: &str, os: Os, arch: Arch) -> Result<PathBuf> {
    let dir = std::path::absolute(dir)?;
    Ok(dir.join(library_file_name(name, os, arch)))
}
