//! Configuration for tagsync-lsp
//!
//! Settings are loaded from `tagsync.toml` in the workspace root, or from
//! the client's `initializationOptions` (same shape, as JSON):
//!
//! ```toml
//! [parser]
//! xml_mode = false
//! extra_void_elements = ["icon", "spacer"]
//! ```

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{ParserSettings, Settings};
