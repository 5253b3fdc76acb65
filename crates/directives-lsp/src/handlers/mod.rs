//! LSP protocol handlers.
//!
//! - [`completion`]: directive keywords, package names and versions, SDKs,
//!   properties and property values
//! - [`hover`]: documentation for the keyword or name under the cursor
//!
//! Handlers never surface registry failures to the editor. A failed lookup
//! produces no items or no hover.

pub mod completion;
pub mod hover;
