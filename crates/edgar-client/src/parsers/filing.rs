//! Relaxed XML/SGML parsing of filing bodies into a generic value tree.
//!
//! Filing documents have no fixed schema, so the parser produces an
//! open-ended [`serde_json::Value`] tree: tag declarations, comments and
//! doctypes are ignored, attributes become plain keys on the enclosing
//! object with their values kept as strings, and tag text is coerced to a
//! number or boolean only when the coerced value round-trips to the exact
//! source text.
//!
//! Repeated sibling tags of the same name collapse into an array while a
//! single occurrence stays a scalar/object, mirroring the loose shape EDGAR
//! consumers expect. Callers that do not want to branch on that shape can go
//! through [`values`].

use crate::error::{EdgarError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

/// Parsed filing content: an open-ended nested mapping whose shape mirrors
/// whatever tags appear in the source document.
pub type FilingObject = Value;

/// Intermediate element state while its subtree is still open.
#[derive(Debug, Default)]
struct Node {
    map: Map<String, Value>,
    text: String,
}

impl Node {
    fn from_attributes(start: &BytesStart<'_>) -> Result<Self> {
        let mut node = Self::default();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| EdgarError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| EdgarError::Xml(e.to_string()))?;
            // Coercion applies to tag text only; attribute values always
            // stay strings.
            insert(&mut node.map, key, Value::String(value.trim().to_string()));
        }
        Ok(node)
    }

    fn into_value(self) -> Value {
        let text = self.text.trim().to_string();
        if self.map.is_empty() {
            return coerce_scalar(&text);
        }
        let mut map = self.map;
        if !text.is_empty() {
            insert(&mut map, "#text".to_string(), coerce_scalar(&text));
        }
        Value::Object(map)
    }
}

/// Parse filing markup into a [`FilingObject`].
///
/// Parsing never fails on unknown structure; only structurally malformed
/// input (mismatched or unclosed tags) is an error.
///
/// # Example
/// ```
/// use edgar_client::parsers::filing::parse_filing_content;
///
/// let object = parse_filing_content("<SEC-DOCUMENT><TYPE>10-K</TYPE></SEC-DOCUMENT>")?;
/// assert_eq!(object["SEC-DOCUMENT"]["TYPE"], "10-K");
/// # Ok::<(), edgar_client::EdgarError>(())
/// ```
///
/// # Errors
/// Returns [`EdgarError::Xml`] when the document is unbalanced.
pub fn parse_filing_content(content: &str) -> Result<FilingObject> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut root = Node::default();
    let mut stack: Vec<(String, Node)> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| EdgarError::Xml(e.to_string()))?;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let node = Node::from_attributes(&start)?;
                stack.push((name, node));
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let value = Node::from_attributes(&start)?.into_value();
                let target = stack.last_mut().map_or(&mut root, |(_, node)| node);
                insert(&mut target.map, name, value);
            }
            Event::End(_) => {
                // Mismatched names are already rejected by the reader.
                let (name, node) = stack
                    .pop()
                    .ok_or_else(|| EdgarError::Xml("closing tag without an opener".to_string()))?;
                let value = node.into_value();
                let target = stack.last_mut().map_or(&mut root, |(_, n)| n);
                insert(&mut target.map, name, value);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| EdgarError::Xml(e.to_string()))?;
                if let Some((_, node)) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Event::CData(cdata) => {
                if let Some((_, node)) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, doctypes, comments and processing instructions
            // carry no content for the object tree.
            _ => {}
        }
    }

    if let Some((name, _)) = stack.last() {
        return Err(EdgarError::Xml(format!("unclosed tag <{name}>")));
    }

    Ok(Value::Object(root.map))
}

/// Normalized access to a key that may hold a scalar or an array.
///
/// The single/array collapse means a tag's value changes shape with its
/// occurrence count; this accessor always yields a sequence so callers need
/// not branch on the runtime shape. A missing key yields an empty sequence.
pub fn values<'a>(object: &'a FilingObject, key: &str) -> Vec<&'a FilingObject> {
    match object.get(key) {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Insert under `key`, collapsing repeated siblings into an array.
fn insert(map: &mut Map<String, Value>, key: String, value: Value) {
    if let Some(slot) = map.get_mut(&key) {
        if let Value::Array(items) = slot {
            items.push(value);
        } else {
            let first = slot.take();
            *slot = Value::Array(vec![first, value]);
        }
    } else {
        map.insert(key, value);
    }
}

/// Coerce tag text to its natural type when the coercion is unambiguous,
/// i.e. the coerced value's canonical form equals the source text. Anything
/// else (leading zeros, padded decimals) stays a trimmed string.
fn coerce_scalar(text: &str) -> Value {
    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(integer) = text.parse::<i64>()
        && integer.to_string() == text
    {
        return Value::Number(integer.into());
    }

    if let Ok(float) = text.parse::<f64>()
        && float.is_finite()
        && float.to_string() == text
        && let Some(number) = serde_json::Number::from_f64(float)
    {
        return Value::Number(number);
    }

    Value::String(text.to_string())
}
