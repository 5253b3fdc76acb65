use directives_core::DEFAULT_VERSION_LIMIT;
use directives_nuget::NugetSettings;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration for the directives-lsp server.
///
/// Provided by the LSP client through `initializationOptions`. Every field
/// has a default, so clients only send what they want to change.
///
/// # Examples
///
/// ```
/// use directives_lsp::config::DirectivesConfig;
///
/// let json = r#"{
///     "nuget": { "timeout_ms": 2000 },
///     "completion": { "max_versions": 5 }
/// }"#;
///
/// let config: DirectivesConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.nuget.timeout_ms, 2000);
/// assert_eq!(config.nuget.search_take, 20);
/// assert_eq!(config.completion.max_versions, 5);
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct DirectivesConfig {
    #[serde(default)]
    pub nuget: NugetConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

impl DirectivesConfig {
    /// Client settings derived from this configuration.
    pub fn nuget_settings(&self) -> NugetSettings {
        NugetSettings {
            timeout: Duration::from_millis(self.nuget.timeout_ms),
            cache_ttl: Duration::from_secs(self.cache.ttl_secs),
            search_take: self.nuget.search_take,
        }
    }
}

/// Configuration for NuGet requests.
///
/// # Defaults
///
/// - `timeout_ms`: `5000`
/// - `search_take`: `20`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NugetConfig {
    #[serde(
        default = "default_timeout_ms",
        deserialize_with = "deserialize_timeout_ms"
    )]
    pub timeout_ms: u64,
    #[serde(
        default = "default_search_take",
        deserialize_with = "deserialize_search_take"
    )]
    pub search_take: usize,
}

impl Default for NugetConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            search_take: default_search_take(),
        }
    }
}

/// Configuration for the search result cache.
///
/// # Defaults
///
/// - `ttl_secs`: `300` (5 minutes)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Configuration for completion lists.
///
/// # Defaults
///
/// - `max_versions`: `10`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CompletionConfig {
    #[serde(default = "default_max_versions")]
    pub max_versions: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_versions: default_max_versions(),
        }
    }
}

const fn default_timeout_ms() -> u64 {
    5000
}

const fn default_search_take() -> usize {
    20
}

const fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

const fn default_max_versions() -> usize {
    DEFAULT_VERSION_LIMIT
}

/// Shortest request timeout that still leaves room for a NuGet round trip.
const MIN_TIMEOUT_MS: u64 = 250;

fn deserialize_timeout_ms<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let timeout_ms = u64::deserialize(deserializer)?;
    if timeout_ms < MIN_TIMEOUT_MS {
        tracing::warn!(
            "timeout_ms of {} is too short for NuGet requests, clamping to {}",
            timeout_ms,
            MIN_TIMEOUT_MS
        );
        return Ok(MIN_TIMEOUT_MS);
    }
    Ok(timeout_ms)
}

/// Upper bound the search service accepts for `take`.
const MAX_SEARCH_TAKE: usize = 1000;

fn deserialize_search_take<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let take = usize::deserialize(deserializer)?;
    if take > MAX_SEARCH_TAKE {
        tracing::warn!(
            "search_take of {} exceeds the service limit, clamping to {}",
            take,
            MAX_SEARCH_TAKE
        );
        return Ok(MAX_SEARCH_TAKE);
    }
    Ok(take)
}
