//! Package metadata files and the descriptors read from them.

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Where a package's files live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageKind {
    /// Bundled with the runtime; files live under the runtime's own directories
    Default,
    /// Installed on its own under a per-package root
    Installed { install_root: PathBuf },
}

/// One installed package as described by its metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: Version,
    pub kind: PackageKind,
    /// Directories, relative to the install root, holding library files
    pub require_paths: Vec<String>,
    /// Directory, relative to the install root, holding executables
    pub bindir: String,
    /// Files the package claims to own, `/`-separated and relative
    pub files: Vec<String>,
}

impl PackageDescriptor {
    /// `<name>-<version>`, the directory name of an installed package.
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    pub fn is_default(&self) -> bool {
        matches!(self.kind, PackageKind::Default)
    }

    /// Load a descriptor from a metadata file found in `spec_dir`.
    ///
    /// Files kept in the `default/` subdirectory describe bundled packages.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(
        runtime: &R,
        path: &Path,
        spec_dir: &Path,
        bundled: bool,
    ) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let record: DescriptorRecord = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse package metadata {:?}", path))?;
        Ok(record.into_descriptor(spec_dir, bundled))
    }
}

/// On-disk form of a package descriptor.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DescriptorRecord {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub install_root: Option<PathBuf>,
    #[serde(default = "default_require_paths")]
    pub require_paths: Vec<String>,
    #[serde(default = "default_bindir")]
    pub bindir: String,
    #[serde(default)]
    pub files: Vec<String>,
}

fn default_require_paths() -> Vec<String> {
    vec!["lib".to_string()]
}

fn default_bindir() -> String {
    "bin".to_string()
}

impl DescriptorRecord {
    /// Turn the record into a descriptor. Installed packages without an
    /// explicit root live in `<spec_dir>/../gems/<name>-<version>`; a relative
    /// root is taken relative to `spec_dir`.
    pub fn into_descriptor(self, spec_dir: &Path, bundled: bool) -> PackageDescriptor {
        let kind = if self.default || bundled {
            PackageKind::Default
        } else {
            let install_root = match self.install_root {
                Some(root) if root.is_absolute() => root,
                Some(root) => spec_dir.join(root),
                None => spec_dir
                    .parent()
                    .unwrap_or(spec_dir)
                    .join("gems")
                    .join(format!("{}-{}", self.name, self.version)),
            };
            PackageKind::Installed { install_root }
        };

        PackageDescriptor {
            name: self.name,
            version: self.version,
            kind,
            require_paths: self.require_paths,
            bindir: self.bindir,
            files: self.files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_record_defaults() {
        let record: DescriptorRecord =
            serde_json::from_str(r#"{"name": "foo", "version": "1.0.0"}"#).unwrap();
        assert!(!record.default);
        assert_eq!(record.install_root, None);
        assert_eq!(record.require_paths, vec!["lib"]);
        assert_eq!(record.bindir, "bin");
        assert!(record.files.is_empty());
    }

    #[test]
    fn test_installed_root_derived_from_spec_dir() {
        let record: DescriptorRecord =
            serde_json::from_str(r#"{"name": "foo", "version": "1.0.0"}"#).unwrap();
        let descriptor = record.into_descriptor(Path::new("/pkgs/specifications"), false);

        assert_eq!(descriptor.full_name(), "foo-1.0.0");
        assert_eq!(
            descriptor.kind,
            PackageKind::Installed {
                install_root: PathBuf::from("/pkgs/gems/foo-1.0.0")
            }
        );
        assert!(!descriptor.is_default());
    }

    #[test]
    fn test_explicit_install_root() {
        let record: DescriptorRecord = serde_json::from_str(
            r#"{"name": "foo", "version": "1.0.0", "install_root": "/gems/foo-1.0"}"#,
        )
        .unwrap();
        let descriptor = record.into_descriptor(Path::new("/pkgs/specifications"), false);
        assert_eq!(
            descriptor.kind,
            PackageKind::Installed {
                install_root: PathBuf::from("/gems/foo-1.0")
            }
        );
    }

    #[test]
    fn test_relative_install_root() {
        let record: DescriptorRecord = serde_json::from_str(
            r#"{"name": "foo", "version": "1.0.0", "install_root": "vendor/foo"}"#,
        )
        .unwrap();
        let descriptor = record.into_descriptor(Path::new("/pkgs/specifications"), false);
        assert_eq!(
            descriptor.kind,
            PackageKind::Installed {
                install_root: PathBuf::from("/pkgs/specifications/vendor/foo")
            }
        );
    }

    #[test]
    fn test_default_flag_and_bundled_dir() {
        let flagged: DescriptorRecord = serde_json::from_str(
            r#"{"name": "bar", "version": "2.0.0", "default": true, "files": ["bin/bar"]}"#,
        )
        .unwrap();
        let descriptor = flagged.into_descriptor(Path::new("/spec"), false);
        assert!(descriptor.is_default());
        assert_eq!(descriptor.files, vec!["bin/bar"]);

        let plain: DescriptorRecord =
            serde_json::from_str(r#"{"name": "bar", "version": "2.0.0"}"#).unwrap();
        assert!(plain.into_descriptor(Path::new("/spec"), true).is_default());
    }

    #[test]
    fn test_load_from_runtime() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/spec/foo-1.0.0.json");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| {
                Ok(r#"{"name": "foo", "version": "1.0.0", "require_paths": ["lib", "ext"]}"#
                    .to_string())
            });

        let descriptor =
            PackageDescriptor::load(&runtime, &path, Path::new("/spec"), false).unwrap();
        assert_eq!(descriptor.name, "foo");
        assert_eq!(descriptor.version, Version::new(1, 0, 0));
        assert_eq!(descriptor.require_paths, vec!["lib", "ext"]);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("invalid json".to_string()));

        let result = PackageDescriptor::load(
            &runtime,
            Path::new("/spec/broken.json"),
            Path::new("/spec"),
            false,
        );
        assert!(result.is_err());
    }
}
