//! LSP server wiring
//!
//! The host editor keeps the documents and selections and applies the edit
//! batch; this server only computes it. Documents are mirrored here via
//! FULL text sync, and the single operation is exposed as the
//! `tagsync.updateTag` workspace command.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    ExecuteCommandOptions, ExecuteCommandParams, InitializeParams, InitializeResult,
    InitializedParams, MessageType, Range, ServerCapabilities, ServerInfo,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions, WorkspaceEdit,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::update::UpdateTagAnalyzer;

/// The workspace command that triggers the tag-name update
pub const UPDATE_TAG_COMMAND: &str = "tagsync.updateTag";

/// Arguments of the `tagsync.updateTag` command
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagArgs {
    /// Document to edit; must be open
    pub uri: Url,
    /// Replacement tag name
    pub tag_name: String,
    /// Active selections (cursors are empty ranges)
    #[serde(default)]
    pub selections: Vec<Range>,
}

/// LSP Backend state
pub struct Backend {
    /// LSP client for sending notifications and edits
    client: Client,
    /// Document store for open documents
    documents: Arc<RwLock<HashMap<Url, String>>>,
    /// Active settings, loaded during initialize
    settings: Arc<RwLock<Settings>>,
}

impl Backend {
    /// Create a new backend instance
    fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            settings: Arc::new(RwLock::new(Settings::default())),
        }
    }

    /// Get document text by URI
    async fn get_document(&self, uri: &Url) -> Option<String> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }

    /// Store document text
    async fn store_document(&self, uri: Url, text: String) {
        let mut docs = self.documents.write().await;
        docs.insert(uri, text);
    }

    /// Remove document from store
    async fn remove_document(&self, uri: &Url) {
        let mut docs = self.documents.write().await;
        docs.remove(uri);
    }

    /// Resolve settings from initializationOptions or a workspace
    /// `tagsync.toml`, falling back to defaults
    fn load_settings(params: &InitializeParams) -> Settings {
        if let Some(options) = &params.initialization_options {
            match serde_json::from_value::<Settings>(options.clone()) {
                Ok(settings) => return settings,
                Err(e) => warn!("Ignoring malformed initializationOptions: {}", e),
            }
        }

        #[allow(deprecated)]
        let root = params.root_uri.as_ref().and_then(|u| u.to_file_path().ok());
        if let Some(root) = root {
            let config_path = root.join("tagsync.toml");
            if let Ok(contents) = std::fs::read_to_string(&config_path) {
                match Settings::from_toml_str(&contents) {
                    Ok(settings) => return settings,
                    Err(e) => warn!("Ignoring malformed {}: {}", config_path.display(), e),
                }
            }
        }

        Settings::default()
    }

    /// Run the update-tag operation for the given arguments.
    ///
    /// Returns `None` when there is nothing to update (document not open,
    /// empty name, no enclosing elements) and the host's applied outcome
    /// otherwise.
    async fn update_tag(&self, args: UpdateTagArgs) -> Result<Option<bool>> {
        if args.tag_name.is_empty() {
            debug!("Empty tag name, nothing to update");
            return Ok(None);
        }

        let text = match self.get_document(&args.uri).await {
            Some(doc) => doc,
            None => {
                debug!("Document not open, nothing to update: {}", args.uri);
                return Ok(None);
            }
        };

        let service = {
            let settings = self.settings.read().await;
            settings.markup_service()
        };

        let analyzer = UpdateTagAnalyzer::new(&text, &service);
        let edits = analyzer
            .edits(&args.selections, &args.tag_name)
            .map_err(|e| Error::invalid_params(format!("Cannot parse document: {}", e)))?;

        if edits.is_empty() {
            debug!("No enclosing tags at the given selections");
            return Ok(None);
        }

        debug!(
            "Renaming {} tag occurrence(s) to '{}' in {}",
            edits.len(),
            args.tag_name,
            args.uri
        );

        let mut changes = HashMap::new();
        changes.insert(args.uri, edits);
        let edit = WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        };

        // One transaction: the host applies every replacement or none.
        let response = self.client.apply_edit(edit).await?;
        Ok(Some(response.applied))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("tagsync LSP server initializing");

        let settings = Self::load_settings(&params);
        *self.settings.write().await = settings;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![UPDATE_TAG_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "tagsync-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("tagsync LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "tagsync language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("tagsync LSP server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("Document opened: {}", params.text_document.uri);
        self.store_document(params.text_document.uri, params.text_document.text)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);
        // Since we use FULL sync, the entire content is in the first change
        if let Some(change) = params.content_changes.into_iter().next() {
            self.store_document(params.text_document.uri, change.text)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.remove_document(&params.text_document.uri).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != UPDATE_TAG_COMMAND {
            warn!("Unknown command: {}", params.command);
            return Ok(None);
        }

        let arg = params
            .arguments
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_params("missing updateTag arguments"))?;
        let args: UpdateTagArgs = serde_json::from_value(arg)
            .map_err(|e| Error::invalid_params(format!("malformed updateTag arguments: {}", e)))?;

        match self.update_tag(args).await? {
            Some(applied) => Ok(Some(Value::Bool(applied))),
            None => Ok(None),
        }
    }
}

/// Serve LSP over stdio until the client disconnects
pub async fn run_server() {
    info!("Starting tagsync Language Server v{}", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
