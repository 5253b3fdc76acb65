use crate::error::{DirectivesError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Upper bound on any single registry request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Bounded-time HTTP client for registry JSON endpoints.
///
/// Every request made through this client is aborted once the configured
/// timeout elapses, which covers connecting, sending, and reading the body.
/// The fetcher holds no per-request state and is cheap to clone, so it can
/// be shared by concurrent handlers.
///
/// # Examples
///
/// ```no_run
/// use directives_core::http::HttpFetcher;
/// use serde::Deserialize;
/// use std::time::Duration;
///
/// #[derive(Deserialize)]
/// struct Index {
///     versions: Vec<String>,
/// }
///
/// # async fn example() -> directives_core::error::Result<()> {
/// let fetcher = HttpFetcher::new(Duration::from_secs(5));
/// let index: Index = fetcher
///     .get_json("https://api.nuget.org/v3-flatcontainer/humanizer/index.json")
///     .await?;
/// println!("{} versions", index.versions.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests time out after `timeout`.
    ///
    /// Identifies itself with a `directives-lsp/<version>` user agent.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("directives-lsp/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches `url` and returns the raw body.
    ///
    /// # Errors
    ///
    /// Returns `DirectivesError::RegistryError` on transport failure or
    /// timeout, and `DirectivesError::HttpStatus` for non-2xx responses.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DirectivesError::RegistryError {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectivesError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DirectivesError::RegistryError {
                url: url.to_string(),
                source: e,
            })?;

        Ok(body.to_vec())
    }

    /// Fetches `url` and deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Everything [`get_bytes`](Self::get_bytes) returns, plus
    /// `DirectivesError::Json` when the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_bytes(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}
