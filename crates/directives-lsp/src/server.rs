use crate::config::DirectivesConfig;
use crate::handlers::{completion, hover};
use crate::state::ServerState;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp_server::ls_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, Hover, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams, MessageType,
    ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tower_lsp_server::{Client, LanguageServer, jsonrpc::Result};

/// Characters that re-trigger completion while typing a directive.
const TRIGGER_CHARACTERS: [&str; 6] = ["#", ":", " ", "@", ".", "="];

pub struct Backend {
    client: Client,
    state: Arc<ServerState>,
    config: Arc<RwLock<DirectivesConfig>>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(ServerState::new()),
            config: Arc::new(RwLock::new(DirectivesConfig::default())),
        }
    }

    async fn apply_initialization_options(&self, options: serde_json::Value) {
        match serde_json::from_value::<DirectivesConfig>(options) {
            Ok(config) => {
                tracing::debug!("loaded configuration: {:?}", config);
                self.state.reconfigure_nuget(config.nuget_settings()).await;
                *self.config.write().await = config;
            }
            Err(e) => {
                tracing::warn!("ignoring invalid initialization options: {}", e);
            }
        }
    }

    fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            completion_provider: Some(CompletionOptions {
                trigger_characters: Some(TRIGGER_CHARACTERS.map(String::from).to_vec()),
                resolve_provider: Some(false),
                ..Default::default()
            }),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            ..Default::default()
        }
    }
}

impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("initializing directives-lsp server");

        if let Some(init_options) = params.initialization_options {
            self.apply_initialization_options(init_options).await;
        }

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: "directives-lsp".into(),
                version: Some(env!("CARGO_PKG_VERSION").into()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("directives-lsp server initialized");
        self.client
            .log_message(MessageType::INFO, "directives-lsp ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("shutting down directives-lsp server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;

        if !ServerState::is_tracked(&doc.uri, Some(doc.language_id.as_str())) {
            tracing::debug!("unsupported file type: {:?}", doc.uri);
            return;
        }

        tracing::info!("document opened: {:?}", doc.uri);
        self.state.update_document(doc.uri, doc.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        if !self.state.documents.contains_key(&uri) && !ServerState::is_tracked(&uri, None) {
            tracing::debug!("unsupported file type: {:?}", uri);
            return;
        }

        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.state.update_document(uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::info!("document closed: {:?}", uri);

        self.state.remove_document(&uri);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        Ok(hover::handle_hover(Arc::clone(&self.state), params).await)
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        Ok(completion::handle_completion(
            Arc::clone(&self.state),
            params,
            Arc::clone(&self.config),
        )
        .await)
    }
}
