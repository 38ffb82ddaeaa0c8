//! Discovery of package metadata files in search directories.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Subdirectory of a search directory holding bundled package metadata.
pub const BUNDLED_SUBDIR: &str = "default";

const METADATA_EXTENSION: &str = "json";

/// A package metadata file found under a search directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFile {
    pub path: PathBuf,
    /// Found in the bundled (`default/`) subdirectory
    pub bundled: bool,
}

/// Find all package metadata files under a search directory.
///
/// Directory structure: `<dir>/<name>-<version>.json` for installed packages and
/// `<dir>/default/<name>-<version>.json` for bundled ones. Results are sorted by
/// path within each group, installed packages first. A search path that is not
/// a directory holds no packages.
#[tracing::instrument(skip(runtime))]
pub fn find_spec_files<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<SpecFile>> {
    let mut spec_files = Vec::new();

    if !runtime.is_dir(dir) {
        return Ok(spec_files);
    }

    for path in metadata_files_in(runtime, dir)? {
        spec_files.push(SpecFile {
            path,
            bundled: false,
        });
    }

    let bundled_dir = dir.join(BUNDLED_SUBDIR);
    if runtime.is_dir(&bundled_dir) {
        for path in metadata_files_in(runtime, &bundled_dir)? {
            spec_files.push(SpecFile {
                path,
                bundled: true,
            });
        }
    }

    Ok(spec_files)
}

fn metadata_files_in<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = runtime
        .read_dir(dir)?
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == METADATA_EXTENSION))
        .filter(|p| !runtime.is_dir(p))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_find_spec_files() {
        let mut runtime = MockRuntime::new();

        // --- Setup Paths ---
        let dir = PathBuf::from("/pkgs/specifications");
        let bundled = dir.join("default");

        // Read dir /pkgs/specifications -> two metadata files, one stray file, the default dir
        runtime
            .expect_read_dir()
            .with(eq(dir.clone()))
            .returning(|p| {
                Ok(vec![
                    p.join("zeta-1.0.0.json"),
                    p.join("README"),
                    p.join("alpha-2.0.0.json"),
                    p.join("default"),
                ])
            });
        runtime
            .expect_read_dir()
            .with(eq(bundled.clone()))
            .returning(|p| Ok(vec![p.join("bundled-1.0.0.json")]));

        // Only the search dir and its default subdirectory are directories
        runtime
            .expect_is_dir()
            .returning(|p| p.ends_with("specifications") || p.ends_with("default"));

        // --- Execute & Verify ---
        let files = find_spec_files(&runtime, &dir).unwrap();
        assert_eq!(
            files,
            vec![
                SpecFile {
                    path: dir.join("alpha-2.0.0.json"),
                    bundled: false
                },
                SpecFile {
                    path: dir.join("zeta-1.0.0.json"),
                    bundled: false
                },
                SpecFile {
                    path: bundled.join("bundled-1.0.0.json"),
                    bundled: true
                },
            ]
        );
    }

    #[test]
    fn test_find_spec_files_missing_dir() {
        let mut runtime = MockRuntime::new();
        let dir = PathBuf::from("/non-existent");

        runtime
            .expect_is_dir()
            .with(eq(dir.clone()))
            .returning(|_| false);

        let files = find_spec_files(&runtime, &dir).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_spec_files_search_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("foo.json");
        std::fs::write(&file, r#"{"name": "foo", "version": "1.0.0"}"#).unwrap();

        // A regular file is not listed, so read_dir is never reached
        let files = find_spec_files(&crate::runtime::RealRuntime, &file).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_spec_files_without_bundled_dir() {
        let mut runtime = MockRuntime::new();
        let dir = PathBuf::from("/empty");

        runtime
            .expect_read_dir()
            .with(eq(dir.clone()))
            .returning(|_| Ok(vec![]));
        runtime
            .expect_is_dir()
            .returning(|p| p == std::path::Path::new("/empty"));

        let files = find_spec_files(&runtime, &dir).unwrap();
        assert!(files.is_empty());
    }
}
