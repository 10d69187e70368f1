//! Markup parsing services
//!
//! The actual tokenizing is delegated to quick-xml; this module only turns
//! its event stream into a span tree. `HtmlService` is lenient the way
//! editors need: void elements close themselves, end tags may be
//! mismatched, and stray end tags are ignored rather than rejected.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::tree::{Element, MarkupTree};

/// HTML void elements: never take a close tag, the open tag is the element.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A parsing service that turns markup text into a span tree.
///
/// Passed explicitly to the callers that need it, so tests can substitute
/// their own implementation. Services are shared across server request
/// tasks, hence the `Send + Sync` bound.
pub trait MarkupService: Send + Sync {
    /// Parse `text` into a fresh element tree
    fn parse(&self, text: &str) -> Result<MarkupTree>;
}

/// quick-xml backed service for HTML and XML documents
#[derive(Debug, Clone)]
pub struct HtmlService {
    xml_mode: bool,
    void_elements: Vec<String>,
}

impl Default for HtmlService {
    fn default() -> Self {
        Self {
            xml_mode: false,
            void_elements: VOID_ELEMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl HtmlService {
    /// Create a service with HTML semantics (void elements auto-close)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with XML semantics: no element is void, every
    /// element needs `/>` or a close tag
    pub fn xml() -> Self {
        Self {
            xml_mode: true,
            void_elements: Vec::new(),
        }
    }

    /// Treat an additional element name as void (HTML mode only)
    pub fn add_void_element(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        if !self.void_elements.contains(&name) {
            self.void_elements.push(name);
        }
    }

    fn is_void(&self, name: &str) -> bool {
        !self.xml_mode
            && self
                .void_elements
                .iter()
                .any(|v| v.eq_ignore_ascii_case(name))
    }
}

impl MarkupService for HtmlService {
    fn parse(&self, text: &str) -> Result<MarkupTree> {
        let mut reader = Reader::from_str(text);
        // Lenient: editors hand us HTML in arbitrary states of repair.
        reader.config_mut().check_end_names = false;
        reader.config_mut().allow_unmatched_ends = true;

        let mut roots: Vec<Element> = Vec::new();
        // Elements still waiting for their close tag
        let mut stack: Vec<Element> = Vec::new();

        loop {
            let event_start = reader.buffer_position() as usize;
            let event = reader.read_event()?;
            let event_end = reader.buffer_position() as usize;

            match event {
                Event::Start(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let void = self.is_void(&name);
                    let element = Element {
                        name,
                        start: event_start,
                        start_tag_end: Some(event_end),
                        end_tag_start: None,
                        end: event_end,
                        self_closing: false,
                        children: Vec::new(),
                    };
                    if void {
                        attach(&mut roots, &mut stack, element);
                    } else {
                        stack.push(element);
                    }
                }
                Event::Empty(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let element = Element {
                        name,
                        start: event_start,
                        start_tag_end: Some(event_end),
                        end_tag_start: None,
                        end: event_end,
                        self_closing: true,
                        children: Vec::new(),
                    };
                    attach(&mut roots, &mut stack, element);
                }
                Event::End(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    // Close the nearest open element with this name; a stray
                    // end tag with no matching open is ignored.
                    if let Some(idx) = stack
                        .iter()
                        .rposition(|open| open.name.eq_ignore_ascii_case(&name))
                    {
                        // Anything opened above the match never got its own
                        // close tag; it ends where this tag begins.
                        while stack.len() > idx + 1 {
                            if let Some(mut open) = stack.pop() {
                                open.end = event_start;
                                attach(&mut roots, &mut stack, open);
                            }
                        }
                        if let Some(mut open) = stack.pop() {
                            open.end_tag_start = Some(event_start);
                            open.end = event_end;
                            attach(&mut roots, &mut stack, open);
                        }
                    }
                }
                Event::Eof => break,
                // Text, comments, CDATA, doctype and processing
                // instructions only advance the position.
                _ => {}
            }
        }

        // Whatever is still open runs to the end of the document.
        while let Some(mut open) = stack.pop() {
            open.end = text.len();
            attach(&mut roots, &mut stack, open);
        }

        Ok(MarkupTree {
            roots,
            len: text.len(),
        })
    }
}

/// Hand a finished element to its parent, or to the root list
fn attach(roots: &mut Vec<Element>, stack: &mut [Element], element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}
