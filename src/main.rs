use anyhow::Result;
use clap::Parser;
use pkgls::commands::{Config, ContentsOptions, contents};
use pkgls::package::VersionConstraint;
use std::io::Write;
use std::path::PathBuf;

/// pkgls - list the files of installed packages
///
/// Prints the files an installed package provides, one per line. Bundled
/// packages are mapped into the runtime's directories; independently installed
/// packages are listed from their install root on disk.
///
/// Examples:
///   pkgls foo                 # Every file of the newest installed foo
///   pkgls -l --no-prefix foo  # Library files of foo, relative to its root
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGLS_VERSION"), about)]
struct Cli {
    /// Names of the packages to list
    #[arg(value_name = "NAME", required_unless_present = "all")]
    pub names: Vec<String>,

    /// Version requirement to match, e.g. ">=1.2, <2" (defaults to the newest)
    #[arg(short = 'r', long = "requirement", value_name = "REQ")]
    pub requirement: Option<VersionConstraint>,

    /// Contents for all packages
    #[arg(long)]
    pub all: bool,

    /// Search for packages under specific paths
    #[arg(
        short = 's',
        long = "spec-dir",
        value_name = "DIR",
        value_delimiter = ','
    )]
    pub spec_dirs: Vec<PathBuf>,

    /// Only return files in the package's require paths
    #[arg(short = 'l', long = "lib-only", overrides_with = "no_lib_only")]
    pub lib_only: bool,

    /// Return every file of the package (default)
    #[arg(long = "no-lib-only", overrides_with = "lib_only")]
    pub no_lib_only: bool,

    /// Include the installed path prefix (default)
    #[arg(long = "prefix", overrides_with = "no_prefix")]
    pub prefix: bool,

    /// Don't include the installed path prefix
    #[arg(long = "no-prefix", overrides_with = "prefix")]
    pub no_prefix: bool,

    /// List the searched directories when a package is not found (also via PKGLS_VERBOSE)
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    fn contents_options(self) -> ContentsOptions {
        ContentsOptions {
            names: self.names,
            all: self.all,
            requirement: self.requirement.unwrap_or_default(),
            spec_dirs: self.spec_dirs,
            lib_only: self.lib_only && !self.no_lib_only,
            prefix: !self.no_prefix,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pkgls::runtime::RealRuntime;

    let config = Config::new(&runtime, cli.verbose);
    let options = cli.contents_options();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let ok = contents(&runtime, &config, &options, &mut out)?;
    out.flush()?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
