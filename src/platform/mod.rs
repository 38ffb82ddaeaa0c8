//! Runtime directory layout
//!
//! Bundled (default) packages do not have an install root of their own; their
//! files live in the runtime's binary, library and architecture-specific
//! library directories. This module describes where those are.

use std::env::consts;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Prefix the runtime is installed under when `PKGLS_RUNTIME_PREFIX` is unset.
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_RUNTIME_PREFIX: &str = "/usr/local";
#[cfg(target_os = "windows")]
pub const DEFAULT_RUNTIME_PREFIX: &str = r"C:\Program Files\pkgls";

/// Directories the runtime installs bundled package files into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeLayout {
    /// Executable scripts
    pub bin_dir: PathBuf,
    /// Standard library files
    pub lib_dir: PathBuf,
    /// Architecture-specific library files (native extensions)
    pub arch_dir: PathBuf,
    /// File name suffix marking a native shared library, e.g. `.so`
    pub shared_lib_suffix: String,
}

impl RuntimeLayout {
    /// Layout of a runtime installed under `prefix`.
    ///
    /// `<prefix>/bin`, `<prefix>/lib/pkgls` and `<prefix>/lib/pkgls/<arch>-<os>`.
    pub fn with_prefix(prefix: &Path) -> Self {
        let lib_dir = prefix.join("lib").join("pkgls");
        let arch_dir = lib_dir.join(arch_name());
        Self {
            bin_dir: prefix.join("bin"),
            lib_dir,
            arch_dir,
            shared_lib_suffix: consts::DLL_SUFFIX.to_string(),
        }
    }

    /// Layout taken from the environment.
    ///
    /// `PKGLS_RUNTIME_PREFIX` picks the prefix; `PKGLS_BINDIR`, `PKGLS_LIBDIR`,
    /// `PKGLS_ARCHDIR` and `PKGLS_SHARED_LIB_SUFFIX` override single entries.
    #[tracing::instrument(skip(runtime))]
    pub fn from_runtime<R: Runtime>(runtime: &R) -> Self {
        let prefix = runtime
            .env_var("PKGLS_RUNTIME_PREFIX")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_RUNTIME_PREFIX));
        let mut layout = Self::with_prefix(&prefix);

        if let Ok(dir) = runtime.env_var("PKGLS_BINDIR") {
            layout.bin_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = runtime.env_var("PKGLS_LIBDIR") {
            layout.lib_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = runtime.env_var("PKGLS_ARCHDIR") {
            layout.arch_dir = PathBuf::from(dir);
        }
        if let Ok(suffix) = runtime.env_var("PKGLS_SHARED_LIB_SUFFIX") {
            layout.shared_lib_suffix = suffix;
        }

        layout
    }
}

fn arch_name() -> String {
    format!("{}-{}", consts::ARCH, consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use std::env::VarError;

    #[test]
    fn test_with_prefix() {
        let layout = RuntimeLayout::with_prefix(Path::new("/opt/rt"));
        assert_eq!(layout.bin_dir, PathBuf::from("/opt/rt/bin"));
        assert_eq!(layout.lib_dir, PathBuf::from("/opt/rt/lib/pkgls"));
        assert_eq!(
            layout.arch_dir,
            PathBuf::from("/opt/rt/lib/pkgls").join(arch_name())
        );
        assert_eq!(layout.shared_lib_suffix, consts::DLL_SUFFIX);
    }

    #[test]
    fn test_from_runtime_defaults() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(VarError::NotPresent));

        let layout = RuntimeLayout::from_runtime(&runtime);
        assert_eq!(
            layout,
            RuntimeLayout::with_prefix(Path::new(DEFAULT_RUNTIME_PREFIX))
        );
    }

    #[test]
    fn test_from_runtime_overrides() {
        let mut runtime = MockRuntime::new();
        runtime.expect_env_var().returning(|key| match key {
            "PKGLS_RUNTIME_PREFIX" => Ok("/opt/rt".to_string()),
            "PKGLS_ARCHDIR" => Ok("/opt/native".to_string()),
            "PKGLS_SHARED_LIB_SUFFIX" => Ok(".bundle".to_string()),
            _ => Err(VarError::NotPresent),
        });

        let layout = RuntimeLayout::from_runtime(&runtime);
        assert_eq!(layout.bin_dir, PathBuf::from("/opt/rt/bin"));
        assert_eq!(layout.lib_dir, PathBuf::from("/opt/rt/lib/pkgls"));
        assert_eq!(layout.arch_dir, PathBuf::from("/opt/native"));
        assert_eq!(layout.shared_lib_suffix, ".bundle");
    }
}
