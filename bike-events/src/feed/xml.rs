//! Minimal XML element tree.
//!
//! The agenda and station feeds are small, loosely structured documents
//! whose interesting elements can sit at any depth, so they are read into
//! a tree and navigated by element name.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event as XmlEvent};

use super::error::FeedError;

/// An XML element with its attributes, direct text and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> Result<Element, FeedError> {
        let mut reader = Reader::from_str(xml);

        // The bottom of the stack collects the root element
        let mut stack: Vec<Element> = vec![Element::default()];

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(FeedError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    });
                }
            };
            let position = reader.buffer_position();
            let xml_error = |message: String| FeedError::Xml { position, message };

            match event {
                XmlEvent::Start(start) => stack.push(element_from_start(&start).map_err(xml_error)?),
                XmlEvent::Empty(start) => {
                    let element = element_from_start(&start).map_err(xml_error)?;
                    push_child(&mut stack, element);
                }
                XmlEvent::End(_) => {
                    if stack.len() < 2 {
                        return Err(xml_error("closing tag without opening tag".to_string()));
                    }
                    if let Some(element) = stack.pop() {
                        push_child(&mut stack, element);
                    }
                }
                XmlEvent::Text(text) => {
                    // Text carrying HTML entities is kept raw; callers decode it
                    let text = text
                        .unescape()
                        .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned().into());
                    append_text(&mut stack, &text);
                }
                XmlEvent::CData(data) => append_text(&mut stack, &String::from_utf8_lossy(&data)),
                XmlEvent::Eof => break,
                _ => {}
            }
        }

        if stack.len() != 1 {
            return Err(FeedError::Xml {
                position: reader.buffer_position(),
                message: "unexpected end of document".to_string(),
            });
        }

        stack
            .pop()
            .and_then(|document| document.children.into_iter().next())
            .ok_or_else(|| FeedError::Xml {
                position: 0,
                message: "document has no root element".to_string(),
            })
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follows a chain of direct children, e.g. `["lloc_simple", "nom"]`.
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names.iter().try_fold(self, |element, name| element.child(name))
    }

    /// Direct children, in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The element's own text, trimmed. Empty if it has none.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text of a direct child, if the child exists.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }

    /// All elements named `name` in this subtree, in document order.
    /// Includes `self` if it matches.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map(Cow::into_owned)
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn push_child(stack: &mut [Element], element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    }
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.push_str(text);
    }
}
