//! tagsync LSP binary entry point
//!
//! # Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! tagsync-lsp
//!
//! # With debug logging
//! RUST_LOG=debug tagsync-lsp
//! ```

use tagsync_lsp::run_server;

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_server().await;
}
