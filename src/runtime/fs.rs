//! File system operations (read, directory, glob).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

/// Shell-like matching: `*` never crosses a separator and hidden entries
/// need an explicit leading dot.
const GLOB_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context("Failed to read file to string")
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_dir_impl(&self, path: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .with_context(|| format!("Failed to read directory {:?}", path))?
            .map(|entry| Ok(entry?.path()))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn glob_files_impl(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let entries = glob::glob_with(pattern, GLOB_OPTIONS)
            .with_context(|| format!("Invalid glob pattern {:?}", pattern))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read entry while expanding glob")?;
            if !path.is_dir() {
                files.push(path);
            }
        }
        Ok(files)
    }
}
