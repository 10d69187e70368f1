//! Tests for configuration loading

use super::*;
use tagsync_markup::MarkupService;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert!(!settings.parser.xml_mode);
    assert!(settings.parser.extra_void_elements.is_empty());
}

#[test]
fn test_from_toml_str() {
    let toml = r#"
[parser]
xml_mode = true
"#;
    let settings = Settings::from_toml_str(toml).unwrap();
    assert!(settings.parser.xml_mode);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let settings = Settings::from_toml_str("").unwrap();
    assert!(!settings.parser.xml_mode);
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(Settings::from_toml_str("[parser\nxml_mode = ").is_err());
}

#[test]
fn test_settings_from_json_initialization_options() {
    let json = serde_json::json!({
        "parser": { "extra_void_elements": ["icon"] }
    });
    let settings: Settings = serde_json::from_value(json).unwrap();
    assert_eq!(settings.parser.extra_void_elements, vec!["icon"]);
}

#[test]
fn test_markup_service_respects_extra_void_elements() {
    let settings = Settings::from_toml_str(
        r#"
[parser]
extra_void_elements = ["icon"]
"#,
    )
    .unwrap();

    let service = settings.markup_service();
    let tree = service.parse("<p><icon>x</p>").unwrap();
    assert_eq!(tree.roots[0].children[0].name, "icon");
    assert_eq!(tree.roots[0].children[0].end_tag_start, None);
}

#[test]
fn test_markup_service_xml_mode() {
    let settings = Settings::from_toml_str("[parser]\nxml_mode = true").unwrap();
    let service = settings.markup_service();
    let tree = service.parse("<br>x</br>").unwrap();
    assert_eq!(tree.roots[0].end_tag_start, Some(5));
}
