//! NuGet client.
//!
//! Provides access to NuGet via:
//! - Search API (<https://azuresearch-usnc.nuget.org/query>) for fuzzy package
//!   search and exact `packageid:` lookups
//! - Flat-container API (<https://api.nuget.org/v3-flatcontainer/{id}/index.json>)
//!   for the full version list of one package
//!
//! Every request is bounded by the configured timeout. The public operations
//! never fail: transport errors, timeouts, error statuses, and malformed
//! bodies are logged and reported as "no results". Failed searches are not
//! cached, so the next identical query goes back to the network.

use crate::types::PackageRecord;
use directives_core::{
    DEFAULT_CACHE_TTL, DEFAULT_REQUEST_TIMEOUT, DirectivesError, HttpFetcher, QueryCache, Result,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const SEARCH_BASE: &str = "https://azuresearch-usnc.nuget.org";
const FLAT_CONTAINER_BASE: &str = "https://api.nuget.org/v3-flatcontainer";

/// Base URL for package pages on nuget.org
pub const NUGET_GALLERY_URL: &str = "https://www.nuget.org/packages";

/// Default number of search results requested per query.
pub const DEFAULT_SEARCH_TAKE: usize = 20;

/// Returns the URL for a package's page on nuget.org.
///
/// Package ids are URL-encoded to prevent path traversal.
pub fn package_url(id: &str) -> String {
    format!("{}/{}", NUGET_GALLERY_URL, urlencoding::encode(id))
}

/// Base URLs of the two NuGet services the client talks to.
///
/// Defaults to the public nuget.org hosts. Tests point these at a local
/// mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NugetEndpoints {
    pub search: String,
    pub flat_container: String,
}

impl Default for NugetEndpoints {
    fn default() -> Self {
        Self {
            search: SEARCH_BASE.to_string(),
            flat_container: FLAT_CONTAINER_BASE.to_string(),
        }
    }
}

/// Tunables for [`NugetClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NugetSettings {
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub search_take: usize,
}

impl Default for NugetSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            search_take: DEFAULT_SEARCH_TAKE,
        }
    }
}

/// Client for the NuGet search and flat-container services.
///
/// Cloning is cheap; clones share the HTTP connection pool and both caches.
///
/// # Examples
///
/// ```no_run
/// # use directives_nuget::NugetClient;
/// # #[tokio::main]
/// # async fn main() {
/// let client = NugetClient::default();
///
/// let packages = client.search_packages("humanizer").await;
/// let versions = client.fetch_versions("Humanizer").await;
/// println!("{} packages, {} versions", packages.len(), versions.len());
/// # }
/// ```
#[derive(Clone)]
pub struct NugetClient {
    http: HttpFetcher,
    endpoints: NugetEndpoints,
    search_take: usize,
    searches: Arc<QueryCache<Vec<PackageRecord>>>,
    packages: Arc<QueryCache<PackageRecord>>,
}

impl NugetClient {
    /// Creates a client for the public NuGet services.
    pub fn new(settings: NugetSettings) -> Self {
        Self::with_endpoints(NugetEndpoints::default(), settings)
    }

    /// Creates a client for explicit service base URLs.
    pub fn with_endpoints(endpoints: NugetEndpoints, settings: NugetSettings) -> Self {
        Self {
            http: HttpFetcher::new(settings.timeout),
            endpoints,
            search_take: settings.search_take,
            searches: Arc::new(QueryCache::new(settings.cache_ttl)),
            packages: Arc::new(QueryCache::new(settings.cache_ttl)),
        }
    }

    pub fn endpoints(&self) -> &NugetEndpoints {
        &self.endpoints
    }

    /// Searches for packages matching `query`, consulting the query cache first.
    ///
    /// Returns up to `search_take` stable packages in the service's relevance
    /// order. Returns an empty list for a blank query or on any failure; a
    /// failure leaves the cache untouched.
    pub async fn search_packages(&self, query: &str) -> Vec<PackageRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        if let Some(cached) = self.searches.lookup(query) {
            return cached;
        }

        match self.try_search(query).await {
            Ok(packages) => {
                tracing::debug!(query, results = packages.len(), "nuget search completed");
                self.searches.store(query, packages.clone());
                packages
            }
            Err(e) => {
                tracing::warn!(query, "nuget search failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Performs an uncached search request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The query is blank
    /// - The HTTP request fails or times out
    /// - The service answers with a non-success status
    /// - JSON parsing fails
    pub async fn try_search(&self, query: &str) -> Result<Vec<PackageRecord>> {
        let query = non_blank(query)?;
        let url = format!(
            "{}/query?q={}&take={}&prerelease=false",
            self.endpoints.search,
            urlencoding::encode(query),
            self.search_take
        );

        let response: SearchResponse = self.http.get_json(&url).await?;
        Ok(response.into_records())
    }

    /// Fetches the full version list of `package_id`.
    ///
    /// The list is returned as published, unsorted and unfiltered. Returns an
    /// empty list for a blank id or on any failure.
    pub async fn fetch_versions(&self, package_id: &str) -> Vec<String> {
        match self.try_fetch_versions(package_id).await {
            Ok(versions) => versions,
            Err(e) => {
                tracing::warn!(package = package_id, "nuget version index failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Performs the version-index request.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`try_search`](Self::try_search); an unknown
    /// package surfaces as `DirectivesError::HttpStatus` with 404.
    pub async fn try_fetch_versions(&self, package_id: &str) -> Result<Vec<String>> {
        let package_id = non_blank(package_id)?;
        let url = format!(
            "{}/{}/index.json",
            self.endpoints.flat_container,
            urlencoding::encode(&package_id.to_lowercase())
        );

        let index: VersionIndex = self.http.get_json(&url).await?;
        Ok(index.versions)
    }

    /// Looks up a single package by exact id, for hover documentation.
    ///
    /// Found packages are cached under their lowercased id. Returns `None` if
    /// the package does not exist or the request fails.
    pub async fn lookup_package(&self, package_id: &str) -> Option<PackageRecord> {
        let package_id = package_id.trim();
        if package_id.is_empty() {
            return None;
        }

        if let Some(cached) = self.packages.lookup(package_id) {
            return Some(cached);
        }

        match self.try_lookup_package(package_id).await {
            Ok(Some(package)) => {
                self.packages.store(package_id, package.clone());
                Some(package)
            }
            Ok(None) => {
                tracing::debug!(package = package_id, "package not found on nuget");
                None
            }
            Err(e) => {
                tracing::warn!(package = package_id, "nuget package lookup failed: {}", e);
                None
            }
        }
    }

    /// Performs the uncached `packageid:` lookup.
    ///
    /// Only a result whose id equals `package_id` (ignoring case) counts as a
    /// match; fuzzy neighbours such as `System.Text.Json` for `System` are
    /// never returned.
    pub async fn try_lookup_package(&self, package_id: &str) -> Result<Option<PackageRecord>> {
        let package_id = non_blank(package_id)?;
        let url = format!(
            "{}/query?q=packageid:{}&take=1",
            self.endpoints.search,
            urlencoding::encode(package_id)
        );

        let response: SearchResponse = self.http.get_json(&url).await?;

        Ok(response
            .into_records()
            .into_iter()
            .find(|p| p.has_id(package_id)))
    }

    #[cfg(test)]
    fn is_search_cached(&self, query: &str) -> bool {
        self.searches.lookup(query.trim()).is_some()
    }
}

impl Default for NugetClient {
    fn default() -> Self {
        Self::new(NugetSettings::default())
    }
}

fn non_blank(value: &str) -> Result<&str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DirectivesError::InvalidQuery(
            "query must not be empty".into(),
        ));
    }
    Ok(value)
}

/// Search response from the NuGet search service.
#[derive(Deserialize)]
struct SearchResponse {
    data: Vec<SearchResult>,
}

/// One package in a search response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    id: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    total_downloads: Option<u64>,
}

impl SearchResponse {
    /// Converts the response into package records, preserving result order.
    fn into_records(self) -> Vec<PackageRecord> {
        self.data.into_iter().map(PackageRecord::from).collect()
    }
}

impl From<SearchResult> for PackageRecord {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.id,
            latest_version: result.version,
            description: result
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            total_downloads: result.total_downloads,
        }
    }
}

/// Version index response from the flat-container service.
#[derive(Deserialize)]
struct VersionIndex {
    versions: Vec<String>,
}
