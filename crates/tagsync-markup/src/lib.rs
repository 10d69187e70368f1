//! tagsync-markup - tag boundary location for HTML/XML text
//!
//! Builds a transient element tree with byte-offset spans on top of
//! quick-xml's event stream, and answers "which element encloses this
//! offset". The tree records where each element's open tag and close tag
//! live in the source, which is all the tag-rename operation needs.
//!
//! # Example
//!
//! ```
//! use tagsync_markup::{HtmlService, MarkupService};
//!
//! let service = HtmlService::new();
//! let tree = service.parse("<div>text</div>").unwrap();
//! let node = tree.find_node_at(7).unwrap();
//! assert_eq!(node.name, "div");
//!
//! let (open, close) = node.tag_name_spans();
//! assert_eq!(open, Some(1..4));
//! assert_eq!(close, Some(11..14));
//! ```

pub mod error;
pub mod service;
pub mod tree;

// Re-export main types and functions
pub use error::{MarkupError, Result};
pub use service::{HtmlService, MarkupService};
pub use tree::{Element, MarkupTree};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
