//! Well-formedness check and a small namespace-aware element tree over `quick-xml`.
//!
//! The tree keeps only what GraphML extraction needs: resolved namespace,
//! local name, attributes, direct text and child elements.
//!
//! Input is decoded with the encoding named in the XML declaration (UTF-8 when
//! there is none). Entities declared in the internal DTD subset are expanded
//! as plain text. Nesting is capped at [MAX_DEPTH] levels.

use crate::error::ConvertError;
use quick_xml::encoding::Decoder;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use std::collections::HashMap;
use std::str;
use tracing::instrument;

/// Deepest element nesting accepted before the document is rejected.
pub const MAX_DEPTH: usize = 1024;

/// An element with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
  /// Namespace URI, `None` when the element is in no namespace.
  pub namespace: Option<String>,
  /// Local name, without prefix.
  pub name: String,
  /// Attributes as written (qualified key, unescaped value), in document order.
  pub attributes: Vec<(String, String)>,
  /// Direct text and CDATA content up to the first child element.
  pub text: String,
  pub children: Vec<XmlElement>,
}

impl XmlElement {
  pub fn attribute(&self, key: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  /// True if this element has local name `name` in namespace `namespace`.
  pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
    self.name == name && self.namespace.as_deref() == namespace
  }

  /// All elements below this one, pre-order (document order), excluding `self`.
  pub fn descendants(&self) -> Descendants<'_> {
    Descendants {
      stack: self.children.iter().rev().collect(),
    }
  }
}

/// Pre-order iterator returned by [XmlElement::descendants].
pub struct Descendants<'a> {
  stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
  type Item = &'a XmlElement;

  fn next(&mut self) -> Option<Self::Item> {
    let el = self.stack.pop()?;
    self.stack.extend(el.children.iter().rev());
    Some(el)
  }
}

/// Confirms `bytes` is a well-formed XML document. The tree is discarded.
#[instrument(level = "trace", skip(bytes), fields(len = bytes.len()))]
pub fn validate_xml(bytes: &[u8]) -> Result<(), ConvertError> {
  parse_document(bytes).map(|_| ())
}

/// Parses `bytes` into an element tree and returns the document element.
#[instrument(level = "trace", skip(bytes), fields(len = bytes.len()))]
pub fn parse_document(bytes: &[u8]) -> Result<XmlElement, ConvertError> {
  build_tree(bytes).map_err(ConvertError::MalformedXml)
}

fn build_tree(bytes: &[u8]) -> Result<XmlElement, String> {
  let mut reader = NsReader::from_reader(bytes);
  let mut open: Vec<XmlElement> = Vec::new();
  let mut root: Option<XmlElement> = None;
  let mut entities: HashMap<String, String> = HashMap::new();

  loop {
    let (resolved, event) = match reader.read_resolved_event() {
      Ok(next) => next,
      Err(e) => return Err(format!("{} (at byte {})", e, reader.error_position())),
    };
    let namespace = resolve_namespace(resolved)?;
    let decoder = reader.decoder();

    match event {
      Event::Start(e) => {
        if root.is_some() && open.is_empty() {
          return Err(junk_after_root(&reader));
        }
        check_depth(open.len() + 1)?;
        open.push(element_from_start(&e, namespace, decoder, &entities)?);
      }
      Event::Empty(e) => {
        if root.is_some() && open.is_empty() {
          return Err(junk_after_root(&reader));
        }
        check_depth(open.len() + 1)?;
        let el = element_from_start(&e, namespace, decoder, &entities)?;
        close_element(el, &mut open, &mut root);
      }
      Event::End(_) => {
        // End-name mismatches are reported by the reader itself.
        let el = open
          .pop()
          .ok_or_else(|| format!("unexpected end tag (at byte {})", reader.buffer_position()))?;
        close_element(el, &mut open, &mut root);
      }
      Event::Text(t) => {
        let text = t.decode().map_err(|e| e.to_string())?;
        push_text(&mut open, &text, &reader)?;
      }
      Event::CData(c) => {
        let text = c.decode().map_err(|e| e.to_string())?;
        push_text(&mut open, &text, &reader)?;
      }
      Event::GeneralRef(r) => {
        let text = resolve_reference(&r, &entities)?;
        push_text(&mut open, &text, &reader)?;
      }
      Event::DocType(d) => {
        let doctype = d.decode().map_err(|e| e.to_string())?;
        entities = internal_entities(&doctype);
      }
      Event::Eof => break,
      Event::Decl(_) | Event::PI(_) | Event::Comment(_) => {}
    }
  }

  if let Some(unclosed) = open.last() {
    return Err(format!(
      "unclosed element <{}> at end of document",
      unclosed.name
    ));
  }
  root.ok_or_else(|| "no element found".to_string())
}

fn check_depth(depth: usize) -> Result<(), String> {
  if depth > MAX_DEPTH {
    return Err(format!(
      "document nested too deeply (more than {} levels)",
      MAX_DEPTH
    ));
  }
  Ok(())
}

fn resolve_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>, String> {
  match resolved {
    ResolveResult::Bound(ns) => str::from_utf8(ns.as_ref())
      .map(|s| Some(s.to_string()))
      .map_err(|e| e.to_string()),
    ResolveResult::Unbound => Ok(None),
    ResolveResult::Unknown(prefix) => Err(format!(
      "unbound namespace prefix '{}'",
      String::from_utf8_lossy(&prefix)
    )),
  }
}

fn element_from_start(
  e: &BytesStart<'_>,
  namespace: Option<String>,
  decoder: Decoder,
  entities: &HashMap<String, String>,
) -> Result<XmlElement, String> {
  let name = decoder
    .decode(e.local_name().as_ref())
    .map_err(|err| err.to_string())?
    .into_owned();
  let mut attributes = Vec::new();
  for attr in e.attributes() {
    let attr = attr.map_err(|err| format!("malformed attribute in <{}>: {}", name, err))?;
    let key = decoder
      .decode(attr.key.as_ref())
      .map_err(|err| err.to_string())?
      .into_owned();
    let value = attr
      .decode_and_unescape_value_with(decoder, |entity| lookup_entity(entity, entities))
      .map_err(|err| format!("bad value for attribute '{}' in <{}>: {}", key, name, err))?
      .into_owned();
    attributes.push((key, value));
  }
  Ok(XmlElement {
    namespace,
    name,
    attributes,
    text: String::new(),
    children: Vec::new(),
  })
}

/// Attaches a finished element to its parent, or makes it the document root.
fn close_element(el: XmlElement, open: &mut [XmlElement], root: &mut Option<XmlElement>) {
  match open.last_mut() {
    Some(parent) => parent.children.push(el),
    None => *root = Some(el),
  }
}

/// Text after an element's first child is checked but not kept.
fn push_text(open: &mut [XmlElement], text: &str, reader: &NsReader<&[u8]>) -> Result<(), String> {
  match open.last_mut() {
    Some(el) => {
      if el.children.is_empty() {
        el.text.push_str(text);
      }
      Ok(())
    }
    None if text.trim().is_empty() => Ok(()),
    None => Err(format!(
      "text outside the document element (at byte {})",
      reader.buffer_position()
    )),
  }
}

fn lookup_entity<'a>(name: &str, entities: &'a HashMap<String, String>) -> Option<&'a str> {
  resolve_predefined_entity(name).or_else(|| entities.get(name).map(String::as_str))
}

/// Resolves `&name;` and `&#N;` references against the predefined and declared entities.
fn resolve_reference(r: &BytesRef<'_>, entities: &HashMap<String, String>) -> Result<String, String> {
  if let Some(ch) = r.resolve_char_ref().map_err(|e| e.to_string())? {
    return Ok(ch.to_string());
  }
  let name = r.decode().map_err(|e| e.to_string())?;
  lookup_entity(&name, entities)
    .map(str::to_string)
    .ok_or_else(|| format!("undefined entity &{};", name))
}

/// Collects `<!ENTITY name "value">` declarations from a DOCTYPE body.
///
/// Parameter entities and external (`SYSTEM`/`PUBLIC`) entities are ignored,
/// so references to them stay undefined. Predefined and character references
/// inside a value are expanded once; anything else in it is kept as text.
pub(crate) fn internal_entities(doctype: &str) -> HashMap<String, String> {
  const DECL: &str = "<!ENTITY";
  let mut entities = HashMap::new();
  let mut rest = doctype;
  while let Some(at) = rest.find(DECL) {
    rest = rest[at + DECL.len()..].trim_start();
    if rest.starts_with('%') {
      continue;
    }
    let name_end = rest
      .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
      .unwrap_or(rest.len());
    let (name, after) = rest.split_at(name_end);
    let after = after.trim_start();
    let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
      continue;
    };
    let body = &after[1..];
    let Some(end) = body.find(quote) else {
      break;
    };
    let value = &body[..end];
    // First declaration wins.
    entities.entry(name.to_string()).or_insert_with(|| {
      unescape(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
    });
    rest = &body[end + 1..];
  }
  entities
}

fn junk_after_root(reader: &NsReader<&[u8]>) -> String {
  format!(
    "junk after document element (at byte {})",
    reader.buffer_position()
  )
}
