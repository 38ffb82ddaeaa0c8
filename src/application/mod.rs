//! Application layer - the lookups behind the contents listing.
//!
//! Locating picks the installed descriptor for a package name; resolving
//! turns that descriptor into files on disk.

mod locate;
mod resolve;

pub use locate::{DescriptorLocator, Lookup, SearchContext, SearchKind};
pub use resolve::{FileResolver, ResolvedFile};
