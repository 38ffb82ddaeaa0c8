//! `pkgls` contents listing: locate, resolve and print each requested package.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;

use crate::{
    application::{DescriptorLocator, FileResolver, Lookup, ResolvedFile, SearchContext},
    package::{SpecRegistry, VersionConstraint},
    runtime::Runtime,
};

use super::config::Config;
use super::paths::expand_spec_dirs;

/// What to list and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentsOptions {
    pub names: Vec<String>,
    /// List every registered package instead of `names`
    pub all: bool,
    pub requirement: VersionConstraint,
    pub spec_dirs: Vec<PathBuf>,
    /// Only files under the packages' require paths
    pub lib_only: bool,
    /// Print absolute paths instead of paths relative to the package
    pub prefix: bool,
}

impl Default for ContentsOptions {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            all: false,
            requirement: VersionConstraint::Any,
            spec_dirs: Vec::new(),
            lib_only: false,
            prefix: true,
        }
    }
}

/// List the contents of the requested packages to `out`.
///
/// Returns `Ok(false)` when the only requested package could not be found.
/// With several names a missing package is reported and skipped.
#[tracing::instrument(skip(runtime, config, out))]
pub fn contents<R: Runtime, W: Write>(
    runtime: &R,
    config: &Config,
    options: &ContentsOptions,
    out: &mut W,
) -> Result<bool> {
    let search = SearchContext::new(
        expand_spec_dirs(&options.spec_dirs),
        &config.default_spec_dirs,
    );
    debug!("Searching {} in {:?}", search.kind, search.dirs);

    let registry = SpecRegistry::load(runtime, &search.dirs)?;
    let names = if options.all {
        registry.names()
    } else {
        options.names.clone()
    };

    let locator = DescriptorLocator::new(&registry, &search, config.verbose);
    let resolver = FileResolver::new(runtime, &config.layout);

    for name in &names {
        let found = match locator.locate(name, &options.requirement) {
            Lookup::Found(descriptor) => {
                info!("Listing {}", descriptor.full_name());
                let files = resolver
                    .resolve(descriptor, options.lib_only)
                    .with_context(|| format!("Failed to list files of {}", descriptor.full_name()))?;
                write_listing(runtime, files, options.prefix, out)?;
                true
            }
            Lookup::NotFound { context, searched } => {
                writeln!(out, "Unable to find package '{}' in {}", name, context)?;
                if let Some(dirs) = searched {
                    writeln!(out, "\nDirectories searched:")?;
                    for dir in dirs {
                        writeln!(out, "{}", dir.display())?;
                    }
                }
                false
            }
        };

        if !found && names.len() <= 1 {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Print files in `(base_dir, relative_path)` order, skipping entries that
/// are directories on disk.
pub fn write_listing<R: Runtime, W: Write>(
    runtime: &R,
    mut files: Vec<ResolvedFile>,
    prefix: bool,
    out: &mut W,
) -> Result<()> {
    files.sort();

    for file in &files {
        let absolute_path = file.absolute_path();
        if runtime.is_dir(&absolute_path) {
            continue;
        }

        if prefix {
            writeln!(out, "{}", absolute_path.display())?;
        } else {
            writeln!(out, "{}", file.relative_path)?;
        }
    }

    Ok(())
}
