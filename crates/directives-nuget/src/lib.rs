//! NuGet support for directives-lsp.
//!
//! This crate resolves `#:package` and `#:sdk` directives against the public
//! NuGet services:
//! - Search API (<https://azuresearch-usnc.nuget.org/query>) for package name
//!   completion and hover lookups
//! - Flat-container API (<https://api.nuget.org/v3-flatcontainer>) for
//!   version completion
//!
//! Search results are memoized per lowercased query for a short window.
//! Remote failures never propagate to the editor: they are logged and
//! surface as empty results.

pub mod client;
pub mod formatter;
pub mod types;

pub use client::{NugetClient, NugetEndpoints, NugetSettings, package_url};
pub use formatter::{format_downloads, package_completion, package_hover, version_completion};
pub use types::PackageRecord;
