//! Read-only registry of installed package descriptors.

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

use super::{PackageDescriptor, VersionConstraint, find_spec_files};

/// Source of installed package descriptors.
pub trait Registry {
    /// Every known descriptor, in registry order.
    fn all_descriptors(&self) -> &[PackageDescriptor];

    /// Descriptors named `name` whose version satisfies `constraint`, in
    /// registry order.
    fn find_all_by_name(
        &self,
        name: &str,
        constraint: &VersionConstraint,
    ) -> Vec<&PackageDescriptor> {
        self.all_descriptors()
            .iter()
            .filter(|d| d.name == name && constraint.matches(&d.version))
            .collect()
    }
}

/// Registry backed by metadata files in a list of search directories.
#[derive(Debug, Default)]
pub struct SpecRegistry {
    descriptors: Vec<PackageDescriptor>,
}

impl SpecRegistry {
    pub fn new(descriptors: Vec<PackageDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Load every descriptor found in `dirs`, searched in order.
    ///
    /// Missing directories are skipped. Metadata that fails to load is logged
    /// and skipped.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, dirs: &[PathBuf]) -> Result<Self> {
        let mut descriptors = Vec::new();

        for dir in dirs {
            for spec_file in find_spec_files(runtime, dir)? {
                let parent = spec_file.path.parent();
                let spec_dir = if spec_file.bundled {
                    parent.and_then(|p| p.parent())
                } else {
                    parent
                };
                let spec_dir = spec_dir.unwrap_or(dir.as_path());

                match PackageDescriptor::load(runtime, &spec_file.path, spec_dir, spec_file.bundled)
                {
                    Ok(descriptor) => descriptors.push(descriptor),
                    Err(e) => {
                        debug!("Failed to load metadata from {:?}: {:#}", spec_file.path, e);
                    }
                }
            }
        }

        debug!("Loaded {} package descriptor(s)", descriptors.len());
        Ok(Self { descriptors })
    }

    /// Distinct package names, in registry order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for descriptor in &self.descriptors {
            if !names.contains(&descriptor.name) {
                names.push(descriptor.name.clone());
            }
        }
        names
    }
}

impl Registry for SpecRegistry {
    fn all_descriptors(&self) -> &[PackageDescriptor] {
        &self.descriptors
    }
}
