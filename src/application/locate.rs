//! Locate action - finds the installed descriptor that best matches a name.

use log::debug;
use std::fmt;
use std::path::PathBuf;

use crate::package::{PackageDescriptor, Registry, VersionConstraint};

/// How the search directories were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// No directories given, the default package roots are searched
    DefaultPaths,
    /// Directories given on the command line
    SpecifiedPath,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::DefaultPaths => write!(f, "default package paths"),
            SearchKind::SpecifiedPath => write!(f, "specified path"),
        }
    }
}

/// The directories a lookup runs against and how they were chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    pub kind: SearchKind,
    pub dirs: Vec<PathBuf>,
}

impl SearchContext {
    /// Use `specified` when non-empty, otherwise fall back to `defaults`.
    pub fn new(specified: Vec<PathBuf>, defaults: &[PathBuf]) -> Self {
        if specified.is_empty() {
            Self {
                kind: SearchKind::DefaultPaths,
                dirs: defaults.to_vec(),
            }
        } else {
            Self {
                kind: SearchKind::SpecifiedPath,
                dirs: specified,
            }
        }
    }

    /// Search directories ordered by their path string.
    pub fn sorted_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.dirs.clone();
        dirs.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        dirs
    }
}

/// Result of a descriptor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a PackageDescriptor),
    NotFound {
        /// Human readable description of where we looked
        context: SearchKind,
        /// Searched directories, only collected for verbose diagnostics
        searched: Option<Vec<PathBuf>>,
    },
}

/// Finds descriptors in a registry.
pub struct DescriptorLocator<'a, G: Registry> {
    registry: &'a G,
    search: &'a SearchContext,
    verbose: bool,
}

impl<'a, G: Registry> DescriptorLocator<'a, G> {
    pub fn new(registry: &'a G, search: &'a SearchContext, verbose: bool) -> Self {
        Self {
            registry,
            search,
            verbose,
        }
    }

    /// Find the highest version of `name` that satisfies `constraint`.
    ///
    /// Equal versions resolve to the one seen last in registry order.
    #[tracing::instrument(skip(self))]
    pub fn locate(&self, name: &str, constraint: &VersionConstraint) -> Lookup<'a> {
        let found = self
            .registry
            .find_all_by_name(name, constraint)
            .into_iter()
            .max_by(|a, b| a.version.cmp(&b.version));

        match found {
            Some(descriptor) => {
                debug!("Found {} in {}", descriptor.full_name(), self.search.kind);
                Lookup::Found(descriptor)
            }
            None => {
                debug!("No {} matching {} in {}", name, constraint, self.search.kind);
                Lookup::NotFound {
                    context: self.search.kind,
                    searched: self.verbose.then(|| self.search.sorted_dirs()),
                }
            }
        }
    }
}
