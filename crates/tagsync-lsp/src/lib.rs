//! tagsync Language Server Protocol integration
//!
//! This library keeps the opening and closing tag names of HTML/XML
//! elements synchronized. Its one operation: given the active cursor
//! positions, rename both tag names of each cursor's enclosing element,
//! as a single atomic edit batch.
//!
//! The host editor (the LSP client) owns documents, selections, and edit
//! application; the markup parsing lives in `tagsync-markup`. What remains
//! here is the coordinate work in between:
//! - `LineIndex` converts between byte offsets and LSP positions
//! - `UpdateTagAnalyzer` turns selections into a merged edit batch
//! - the server wires the analyzer to `workspace/executeCommand` and
//!   `workspace/applyEdit`
//!
//! # Library Usage
//!
//! ```
//! use tagsync_lsp::{apply_edits, UpdateTagAnalyzer};
//! use tagsync_markup::HtmlService;
//! use tower_lsp::lsp_types::{Position, Range};
//!
//! let text = "<div>text</div>";
//! let service = HtmlService::new();
//! let analyzer = UpdateTagAnalyzer::new(text, &service);
//!
//! let cursor = Position::new(0, 7);
//! let edits = analyzer
//!     .edits(&[Range::new(cursor, cursor)], "span")
//!     .unwrap();
//! assert_eq!(apply_edits(text, &edits), "<span>text</span>");
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! tagsync-lsp
//!
//! # With debug logging
//! RUST_LOG=debug tagsync-lsp
//! ```

pub mod config;
pub mod position;
pub mod server;
pub mod update;

// Re-export main entry point
pub use server::run_server;

// Re-export commonly used types
pub use config::Settings;
pub use position::LineIndex;
pub use update::{apply_edits, UpdateTagAnalyzer};
