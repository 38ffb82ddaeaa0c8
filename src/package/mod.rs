//! Package metadata module
//!
//! This module provides the descriptor model for installed packages,
//! metadata discovery in search directories, the descriptor registry and
//! version constraints.

mod descriptor;
mod discovery;
mod registry;
mod version;

pub use descriptor::{DescriptorRecord, PackageDescriptor, PackageKind};
pub use discovery::{BUNDLED_SUBDIR, SpecFile, find_spec_files};
pub use registry::{Registry, SpecRegistry};
pub use version::VersionConstraint;
