//! tagsync-cli - rename HTML/XML tag pairs from the command line
//!
//! The editor-less harness for the tagsync library: point it at a file and
//! one or more cursor positions, and it renames the enclosing element's
//! open and close tags the same way the LSP command would.

pub mod app;

// Re-export main entry point and the programmatic surface
pub use app::{rename_text, run_cli};
