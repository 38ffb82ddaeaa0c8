//! Resolve action - maps a descriptor to the files it installed.

use anyhow::Result;
use log::debug;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use crate::package::{PackageDescriptor, PackageKind};
use crate::platform::RuntimeLayout;
use crate::runtime::Runtime;

/// One file of a package: the directory it lives under and its path below
/// that directory.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub base_dir: PathBuf,
    pub relative_path: String,
}

impl ResolvedFile {
    pub fn new(base_dir: impl Into<PathBuf>, relative_path: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            relative_path: relative_path.into(),
        }
    }

    pub fn absolute_path(&self) -> PathBuf {
        self.base_dir.join(&self.relative_path)
    }
}

// Compared by the path strings, not by path components.
impl PartialEq for ResolvedFile {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ResolvedFile {}

impl Ord for ResolvedFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base_dir
            .as_os_str()
            .cmp(other.base_dir.as_os_str())
            .then_with(|| self.relative_path.cmp(&other.relative_path))
    }
}

impl PartialOrd for ResolvedFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Expands descriptors into their files.
pub struct FileResolver<'a, R: Runtime> {
    runtime: &'a R,
    layout: &'a RuntimeLayout,
}

impl<'a, R: Runtime> FileResolver<'a, R> {
    pub fn new(runtime: &'a R, layout: &'a RuntimeLayout) -> Self {
        Self { runtime, layout }
    }

    /// Files owned by `descriptor`; with `lib_only`, installed packages are
    /// limited to their require paths.
    ///
    /// Output order is not significant, callers sort it.
    #[tracing::instrument(skip(self, descriptor), fields(package = %descriptor.full_name()))]
    pub fn resolve(
        &self,
        descriptor: &PackageDescriptor,
        lib_only: bool,
    ) -> Result<Vec<ResolvedFile>> {
        match &descriptor.kind {
            PackageKind::Default => Ok(default_files(descriptor, self.layout)),
            PackageKind::Installed { install_root } => {
                installed_files(self.runtime, install_root, &descriptor.require_paths, lib_only)
            }
        }
    }
}

/// Map the recorded file list of a bundled package onto the runtime layout.
///
/// Executables lose their bindir prefix because the runtime bin dir already
/// is that directory; library files keep their full recorded path.
fn default_files(descriptor: &PackageDescriptor, layout: &RuntimeLayout) -> Vec<ResolvedFile> {
    let mut files: Vec<&String> = descriptor.files.iter().collect();
    files.sort();

    files
        .into_iter()
        .map(|file| {
            if let Some(rest) = strip_dir_prefix(file, &descriptor.bindir) {
                ResolvedFile::new(&layout.bin_dir, rest)
            } else if is_shared_lib(file, &layout.shared_lib_suffix) {
                ResolvedFile::new(&layout.arch_dir, file.as_str())
            } else {
                ResolvedFile::new(&layout.lib_dir, file.as_str())
            }
        })
        .collect()
}

fn is_shared_lib(file: &str, suffix: &str) -> bool {
    !suffix.is_empty() && file.ends_with(suffix)
}

/// `file` below `dir` (`<dir>/<rest>`), without the leading `<dir>/`.
fn strip_dir_prefix<'f>(file: &'f str, dir: &str) -> Option<&'f str> {
    if dir.is_empty() {
        return None;
    }
    file.strip_prefix(dir)?.strip_prefix('/')
}

/// Walk the install root of an installed package. The recorded file list is
/// not trusted here since files may have changed after installation.
fn installed_files<R: Runtime>(
    runtime: &R,
    install_root: &Path,
    require_paths: &[String],
    lib_only: bool,
) -> Result<Vec<ResolvedFile>> {
    let root = glob::Pattern::escape(&install_root.to_string_lossy());
    let patterns: Vec<String> = if lib_only {
        require_paths
            .iter()
            .map(|dir| format!("{}/{}/**/*", root, glob::Pattern::escape(dir)))
            .collect()
    } else {
        vec![format!("{}/**/*", root)]
    };

    let mut files = Vec::new();
    for pattern in &patterns {
        for path in runtime.glob_files(pattern)? {
            match relative_to(&path, install_root) {
                Some(relative_path) => files.push(ResolvedFile::new(install_root, relative_path)),
                None => debug!("Skipping {:?}, not under {:?}", path, install_root),
            }
        }
    }

    // Overlapping require paths must not list a file twice
    files.sort();
    files.dedup();
    Ok(files)
}

fn relative_to(path: &Path, root: &Path) -> Option<String> {
    let rest = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rest
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
