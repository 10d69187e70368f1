//! Configuration structures

use serde::{Deserialize, Serialize};

use tagsync_markup::HtmlService;

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Markup parser settings
    pub parser: ParserSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Build the markup service these settings describe
    pub fn markup_service(&self) -> HtmlService {
        if self.parser.xml_mode {
            return HtmlService::xml();
        }
        let mut service = HtmlService::new();
        for name in &self.parser.extra_void_elements {
            service.add_void_element(name);
        }
        service
    }
}

/// Markup parser configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParserSettings {
    /// Strict XML semantics: no void elements, every tag needs a close
    pub xml_mode: bool,
    /// Additional element names treated as void in HTML mode
    pub extra_void_elements: Vec<String>,
}
