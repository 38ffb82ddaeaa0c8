//! Command layer - wires configuration and options to the application layer.

pub mod config;
mod contents;
mod paths;

pub use config::Config;
pub use contents::{ContentsOptions, contents, write_listing};
pub use paths::{default_package_roots, default_spec_dirs, expand_spec_dirs};
