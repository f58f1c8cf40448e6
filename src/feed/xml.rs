//! A small namespace-resolved element tree over `quick-xml`.
//!
//! Feeds mix several vocabularies (Atom, `yt:`, `media:`), so elements are
//! addressed by resolved namespace URI plus local name rather than by the
//! prefix a given document happens to use. The empty string stands for
//! "no namespace" everywhere in this module.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use super::error::FeedError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    namespace: String,
    local_name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Concatenated text of this element's direct text and CDATA nodes.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First direct child with the given namespace URI and local name.
    pub fn lookup_child(&self, namespace_uri: &str, local_name: &str) -> Option<&XmlElement> {
        self.children
            .iter()
            .find(|child| child.is(namespace_uri, local_name))
    }

    /// All direct children with the given namespace URI and local name, in document order.
    pub fn children<'a, 'q>(
        &'a self,
        namespace_uri: &'q str,
        local_name: &'q str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'q
    where
        'a: 'q,
    {
        self.children
            .iter()
            .filter(move |child| child.is(namespace_uri, local_name))
    }

    fn is(&self, namespace_uri: &str, local_name: &str) -> bool {
        self.namespace == namespace_uri && self.local_name == local_name
    }

    fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

#[derive(Debug)]
pub struct XmlDocument {
    root: XmlElement,
    prefixes: HashMap<String, String>,
    warnings: Vec<String>,
}

impl XmlDocument {
    /// Parses a complete document. Well-formedness errors fail the parse;
    /// recoverable problems are recorded in [`XmlDocument::warnings`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FeedError> {
        let mut reader = NsReader::from_reader(bytes);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut prefixes = HashMap::new();
        let mut warnings = Vec::new();

        loop {
            let position = reader.buffer_position();
            let (resolved, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| FeedError::Parse(format!("XML error at byte {}: {}", position, e)))?;

            match event {
                Event::Start(e) => {
                    ensure_single_root(&stack, &root, position)?;
                    let element = open_element(&resolved, &e, &mut prefixes, &mut warnings);
                    stack.push(element);
                }
                Event::Empty(e) => {
                    ensure_single_root(&stack, &root, position)?;
                    let element = open_element(&resolved, &e, &mut prefixes, &mut warnings);
                    close_element(element, &mut stack, &mut root);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        FeedError::Parse(format!("Unexpected end tag at byte {}", position))
                    })?;
                    close_element(element, &mut stack, &mut root);
                }
                Event::Text(e) => match stack.last_mut() {
                    Some(current) => match e.unescape() {
                        Ok(text) => current.append_text(&text),
                        Err(err) => {
                            warnings.push(format!(
                                "Kept raw text in <{}>: {}",
                                current.local_name, err
                            ));
                            current.append_text(&String::from_utf8_lossy(&e));
                        }
                    },
                    None => {
                        let text = String::from_utf8_lossy(&e);
                        if !text.trim_start_matches('\u{feff}').trim().is_empty() {
                            return Err(FeedError::Parse(format!(
                                "Text outside the root element at byte {}",
                                position
                            )));
                        }
                    }
                },
                Event::CData(e) => match stack.last_mut() {
                    Some(current) => {
                        current.append_text(&String::from_utf8_lossy(&e.into_inner()))
                    }
                    None => {
                        return Err(FeedError::Parse(format!(
                            "CDATA outside the root element at byte {}",
                            position
                        )))
                    }
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(FeedError::Parse(format!(
                "Unexpected end of document inside <{}>",
                open.local_name
            )));
        }

        let root = root.ok_or_else(|| FeedError::Parse("Document has no root element".into()))?;

        Ok(Self {
            root,
            prefixes,
            warnings,
        })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Namespace URI bound to `prefix` anywhere in the document, or `""` when
    /// the document never declares it.
    pub fn namespace_for_prefix(&self, prefix: &str) -> &str {
        self.prefixes.get(prefix).map(String::as_str).unwrap_or("")
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

fn open_element(
    resolved: &ResolveResult<'_>,
    start: &BytesStart<'_>,
    prefixes: &mut HashMap<String, String>,
    warnings: &mut Vec<String>,
) -> XmlElement {
    let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let namespace = match resolved {
        ResolveResult::Bound(Namespace(uri)) => String::from_utf8_lossy(uri).into_owned(),
        ResolveResult::Unbound => String::new(),
        ResolveResult::Unknown(prefix) => {
            warnings.push(format!(
                "Undeclared prefix {:?} on <{}>",
                String::from_utf8_lossy(prefix),
                local_name
            ));
            String::new()
        }
    };

    for attr in start.attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                warnings.push(format!("Skipped attribute on <{}>: {}", local_name, err));
                continue;
            }
        };
        if let Some(prefix) = attr.key.as_ref().strip_prefix(b"xmlns:") {
            let prefix = String::from_utf8_lossy(prefix).into_owned();
            let uri = String::from_utf8_lossy(&attr.value).into_owned();
            prefixes.entry(prefix).or_insert(uri);
        }
    }

    XmlElement {
        namespace,
        local_name,
        ..Default::default()
    }
}

fn ensure_single_root(
    stack: &[XmlElement],
    root: &Option<XmlElement>,
    position: impl std::fmt::Display,
) -> Result<(), FeedError> {
    if stack.is_empty() && root.is_some() {
        return Err(FeedError::Parse(format!(
            "Extra content after the root element at byte {}",
            position
        )));
    }
    Ok(())
}

fn close_element(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
