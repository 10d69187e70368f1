//! Integration tests for the tagsync CLI

use std::fs;

use tagsync_cli::rename_text;
use tower_lsp::lsp_types::Position;

#[test]
fn test_rename_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<div>\n  <p>hello</p>\n</div>\n").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    // 1-based 2:5 in editor terms = inside the <p> element.
    let result = rename_text(&text, &[Position::new(1, 4)], "li", false).unwrap();
    fs::write(&path, &result).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "<div>\n  <li>hello</li>\n</div>\n"
    );
}

#[test]
fn test_multiple_cursors() {
    let text = "<ul><li>a</li><li>b</li></ul>";
    let result = rename_text(
        text,
        &[Position::new(0, 8), Position::new(0, 21)],
        "option",
        false,
    )
    .unwrap();
    assert_eq!(result, "<ul><option>a</option><option>b</option></ul>");
}

#[test]
fn test_void_element_html_vs_xml() {
    let text = "<p>a<br>b</p>";

    // HTML mode: <br> is void, only the one occurrence is renamed.
    let html = rename_text(text, &[Position::new(0, 6)], "hr", false).unwrap();
    assert_eq!(html, "<p>a<hr>b</p>");

    // XML mode: <br> swallows the rest of the paragraph as an unclosed
    // element, so the same cursor still renames just the open tag.
    let xml = rename_text(text, &[Position::new(0, 6)], "hr", true).unwrap();
    assert_eq!(xml, "<p>a<hr>b</p>");
}

#[test]
fn test_parse_failure_is_an_error() {
    assert!(rename_text("<div", &[Position::new(0, 2)], "span", false).is_err());
}
