//! Per-invocation settings gathered from the environment.

use log::debug;
use std::path::PathBuf;

use crate::platform::RuntimeLayout;
use crate::runtime::Runtime;

use super::paths::default_spec_dirs;

/// Settings shared by every contents lookup in one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Searched when no `--spec-dir` is given
    pub default_spec_dirs: Vec<PathBuf>,
    pub layout: RuntimeLayout,
    /// List searched directories when a package is not found
    pub verbose: bool,
}

impl Config {
    /// Build the configuration from the environment; `verbose` is also
    /// switched on by a truthy `PKGLS_VERBOSE`.
    pub fn new<R: Runtime>(runtime: &R, verbose: bool) -> Self {
        let verbose = verbose || runtime.env_var("PKGLS_VERBOSE").is_ok_and(|v| is_truthy(&v));
        let default_spec_dirs = default_spec_dirs(runtime);
        let layout = RuntimeLayout::from_runtime(runtime);

        debug!("Default specification dirs: {:?}", default_spec_dirs);
        debug!("Runtime layout: {:?}", layout);

        Self {
            default_spec_dirs,
            layout,
            verbose,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
