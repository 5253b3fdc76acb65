use thiserror::Error;

/// Core error types for directives-lsp.
///
/// Every fallible operation in the workspace reports one of these variants.
/// Registry clients surface them from their `try_*` methods and degrade them
/// to empty results at the public boundary, so none of these ever reach the
/// editor as a protocol error.
///
/// # Examples
///
/// ```
/// use directives_core::error::{DirectivesError, Result};
///
/// fn check_query(query: &str) -> Result<()> {
///     if query.trim().is_empty() {
///         return Err(DirectivesError::InvalidQuery("empty query".into()));
///     }
///     Ok(())
/// }
///
/// assert!(check_query("").is_err());
/// assert!(check_query("json").is_ok());
/// ```
#[derive(Error, Debug)]
pub enum DirectivesError {
    #[error("registry request failed for {url}: {source}")]
    RegistryError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("registry returned HTTP {status} for {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl DirectivesError {
    /// Returns `true` if the request was aborted by the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RegistryError { source, .. } if source.is_timeout())
    }
}

/// Convenience type alias for `Result<T, DirectivesError>`.
pub type Result<T> = std::result::Result<T, DirectivesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_display() {
        let error = DirectivesError::InvalidQuery("empty query".into());
        assert_eq!(error.to_string(), "invalid query: empty query");
    }

    #[test]
    fn test_http_status_display() {
        let error = DirectivesError::HttpStatus {
            url: "https://api.nuget.org/v3-flatcontainer/missing/index.json".into(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        let message = error.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("missing/index.json"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: DirectivesError = json_err.into();
        assert!(error.to_string().starts_with("JSON error"));
        assert!(!error.is_timeout());
    }
}
