//! Core building blocks for directives-lsp.
//!
//! This crate holds the pieces that do not depend on the editor protocol
//! or on a particular registry:
//!
//! - **Version ordering**: numeric dotted-version comparison and the
//!   stable/prefix filter used for version suggestions
//! - **Query cache**: time-expiring memoization keyed by lowercased query text
//! - **HTTP fetching**: a bounded-time JSON client shared by registry clients
//! - **Request sequencing**: discarding results of superseded requests
//! - **Error types**: one error enum for every fallible operation
//!
//! # Examples
//!
//! ```
//! use directives_core::{QueryCache, compare_versions, filter_versions};
//! use std::cmp::Ordering;
//! use std::time::Duration;
//!
//! assert_eq!(compare_versions("2.1", "2.1.0"), Ordering::Equal);
//!
//! let versions = vec!["1.0.0".to_string(), "1.1.0".to_string(), "2.0.0".to_string()];
//! assert_eq!(filter_versions(&versions, "1", 10), vec!["1.1.0", "1.0.0"]);
//!
//! let cache: QueryCache<Vec<String>> = QueryCache::new(Duration::from_secs(300));
//! cache.store("Json", vec!["Newtonsoft.Json".into()]);
//! assert!(cache.lookup("json").is_some());
//! ```

pub mod cache;
pub mod error;
pub mod http;
pub mod position;
pub mod sequence;
pub mod version;

// Re-export commonly used types
pub use cache::{CacheEntry, DEFAULT_CACHE_TTL, QueryCache};
pub use error::{DirectivesError, Result};
pub use http::{DEFAULT_REQUEST_TIMEOUT, HttpFetcher};
pub use position::{byte_to_utf16_offset, line_at, utf16_to_byte_offset};
pub use sequence::{RequestSequencer, RequestTicket};
pub use version::{DEFAULT_VERSION_LIMIT, compare_versions, filter_versions, is_prerelease};
