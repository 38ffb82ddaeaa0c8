//! Default locations of package metadata.

use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Subdirectory of a package root holding package metadata.
pub const SPECIFICATIONS_DIR: &str = "specifications";

/// Specification directories searched when none are given.
///
/// `PKGLS_SPEC_PATH` (a platform path list) replaces the defaults; otherwise
/// every package root contributes its `specifications` directory.
#[tracing::instrument(skip(runtime))]
pub fn default_spec_dirs<R: Runtime>(runtime: &R) -> Vec<PathBuf> {
    if let Ok(spec_path) = runtime.env_var("PKGLS_SPEC_PATH") {
        debug!("Using PKGLS_SPEC_PATH: {}", spec_path);
        return std::env::split_paths(&spec_path)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
    }

    default_package_roots(runtime)
        .into_iter()
        .map(|root| root.join(SPECIFICATIONS_DIR))
        .collect()
}

/// Package roots, system-wide first. The per-user root is left out when
/// there is no home directory.
#[tracing::instrument(skip(runtime))]
pub fn default_package_roots<R: Runtime>(runtime: &R) -> Vec<PathBuf> {
    if let Ok(home) = runtime.env_var("PKGLS_HOME") {
        return vec![PathBuf::from(home)];
    }

    let mut roots = vec![system_package_root()];
    match runtime.home_dir() {
        Some(home_dir) => roots.push(home_dir.join(".pkgls")),
        None => debug!("No home directory, skipping the per-user package root"),
    }
    roots
}

/// Each user supplied directory is searched itself and through its
/// `specifications` subdirectory.
pub fn expand_spec_dirs(dirs: &[PathBuf]) -> Vec<PathBuf> {
    dirs.iter()
        .flat_map(|dir| [dir.clone(), dir.join(SPECIFICATIONS_DIR)])
        .collect()
}

#[cfg(target_os = "macos")]
pub(crate) fn system_package_root() -> PathBuf {
    PathBuf::from("/opt/pkgls")
}

#[cfg(target_os = "windows")]
pub(crate) fn system_package_root() -> PathBuf {
    PathBuf::from(r"C:\ProgramData\pkgls")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub(crate) fn system_package_root() -> PathBuf {
    PathBuf::from("/usr/local/pkgls")
}
