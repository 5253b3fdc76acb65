use dashmap::DashMap;
use directives_core::RequestSequencer;
use directives_nuget::{NugetClient, NugetSettings};
use tokio::sync::RwLock;
use tower_lsp_server::ls_types::Uri;

/// Language id editors report for C# files.
pub const CSHARP_LANGUAGE_ID: &str = "csharp";

/// Shared state for all handlers.
///
/// Documents are stored as full text; directive lines are re-parsed on
/// demand, which is cheap compared to the network round trip behind
/// most requests.
pub struct ServerState {
    /// Open C# documents by URI
    pub documents: DashMap<Uri, String>,
    /// Tickets for in-flight completion requests, keyed by document URI
    pub sequencer: RequestSequencer,
    nuget: RwLock<NugetClient>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_nuget(NugetClient::default())
    }

    /// Creates state around an existing NuGet client.
    pub fn with_nuget(nuget: NugetClient) -> Self {
        Self {
            documents: DashMap::new(),
            sequencer: RequestSequencer::new(),
            nuget: RwLock::new(nuget),
        }
    }

    /// Returns a handle to the current NuGet client.
    ///
    /// The handle shares caches with the client held by the state, so it
    /// can be used across await points without holding the lock.
    pub async fn nuget(&self) -> NugetClient {
        self.nuget.read().await.clone()
    }

    /// Rebuilds the NuGet client with new settings, keeping its endpoints.
    ///
    /// Cached search results are dropped.
    pub async fn reconfigure_nuget(&self, settings: NugetSettings) {
        let mut nuget = self.nuget.write().await;
        *nuget = NugetClient::with_endpoints(nuget.endpoints().clone(), settings);
    }

    /// Returns `true` if the document belongs to this server.
    pub fn is_tracked(uri: &Uri, language_id: Option<&str>) -> bool {
        language_id == Some(CSHARP_LANGUAGE_ID) || uri.path().as_str().ends_with(".cs")
    }

    pub fn update_document(&self, uri: Uri, content: String) {
        self.documents.insert(uri, content);
    }

    /// Returns a copy of a document's text.
    pub fn document_text(&self, uri: &Uri) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.value().clone())
    }

    pub fn remove_document(&self, uri: &Uri) {
        self.documents.remove(uri);
        self.sequencer.forget(uri.as_str());
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::time::Duration;

    fn uri(s: &str) -> Uri {
        Uri::from_str(s).unwrap()
    }

    #[test]
    fn test_is_tracked_by_extension() {
        assert!(ServerState::is_tracked(&uri("file:///app/hello.cs"), None));
        assert!(!ServerState::is_tracked(&uri("file:///app/hello.csproj"), None));
        assert!(!ServerState::is_tracked(&uri("file:///app/Cargo.toml"), None));
    }

    #[test]
    fn test_is_tracked_by_language_id() {
        assert!(ServerState::is_tracked(
            &uri("untitled:Untitled-1"),
            Some("csharp")
        ));
        assert!(!ServerState::is_tracked(
            &uri("untitled:Untitled-1"),
            Some("plaintext")
        ));
    }

    #[test]
    fn test_document_lifecycle() {
        let state = ServerState::new();
        let doc = uri("file:///app/hello.cs");

        state.update_document(doc.clone(), "#:sdk Microsoft.NET.Sdk".into());
        assert_eq!(
            state.document_text(&doc).as_deref(),
            Some("#:sdk Microsoft.NET.Sdk")
        );

        state.update_document(doc.clone(), "#:package Humanizer".into());
        assert_eq!(state.documents.len(), 1);
        assert_eq!(
            state.document_text(&doc).as_deref(),
            Some("#:package Humanizer")
        );

        state.remove_document(&doc);
        assert!(state.document_text(&doc).is_none());
    }

    #[test]
    fn test_remove_document_invalidates_tickets() {
        let state = ServerState::new();
        let doc = uri("file:///app/hello.cs");

        let ticket = state.sequencer.begin(doc.as_str());
        state.remove_document(&doc);
        assert!(!state.sequencer.is_current(&ticket));
    }

    #[tokio::test]
    async fn test_reconfigure_keeps_endpoints() {
        let state = ServerState::new();
        let before = state.nuget().await.endpoints().clone();

        state
            .reconfigure_nuget(NugetSettings {
                timeout: Duration::from_millis(100),
                ..NugetSettings::default()
            })
            .await;

        assert_eq!(state.nuget().await.endpoints(), &before);
    }
}
