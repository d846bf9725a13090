//! ILS response mapping
//!
//! Turns ILS response bodies into the typed models. XML documents are
//! first checked for structure and root element, then deserialized into
//! the wire structs of [`schema`] and converted by [`decoder`].

pub mod decoder;
pub mod schema;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use crate::models::CatalogItem;

pub use decoder::{
    decode_catalog_item, decode_catalog_item_json, decode_libraries, decode_locations, decode_user,
    decode_violation,
};

/// Why a response body could not be mapped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("response body is empty")]
    Empty,

    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("expected <{expected}> but the document root is <{found}>")]
    UnexpectedRoot { expected: &'static str, found: String },

    #[error("missing required {0}")]
    Missing(&'static str),

    #[error("invalid {field}: '{value}'")]
    Invalid { field: &'static str, value: String },

    #[error("malformed JSON: {0}")]
    Json(String),
}

/// Raw availability payload, kept alongside the mapped item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Xml(String),
    Json(String),
}

impl Payload {
    pub fn body(&self) -> &str {
        match self {
            Payload::Xml(body) | Payload::Json(body) => body,
        }
    }

    pub fn decode(&self) -> Result<CatalogItem, MappingError> {
        match self {
            Payload::Xml(body) => decode_catalog_item(body),
            Payload::Json(body) => decode_catalog_item_json(body),
        }
    }
}

/// Short description of a fetched body for diagnostics: `size N` or `nil`
pub fn describe_body(body: Option<&str>) -> String {
    match body {
        Some(body) if !body.trim().is_empty() => format!("size {}", body.len()),
        _ => "nil".to_string(),
    }
}

/// Walk the whole document and return its root element name.
///
/// Fails on empty input, mismatched or unclosed tags and trailing garbage
/// after the root element.
pub fn root_element(xml: &str) -> Result<String, MappingError> {
    if xml.trim().is_empty() {
        return Err(MappingError::Empty);
    }

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut root: Option<String> = None;
    let mut depth: usize = 0;
    loop {
        let event = reader
            .read_event()
            .map_err(|e| MappingError::Malformed(format!("at byte {}: {}", reader.buffer_position(), e)))?;
        match event {
            Event::Start(start) => {
                if depth == 0 {
                    if root.is_some() {
                        return Err(MappingError::Malformed("multiple root elements".to_string()));
                    }
                    root = Some(String::from_utf8_lossy(start.local_name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Event::Empty(empty) => {
                if depth == 0 {
                    if root.is_some() {
                        return Err(MappingError::Malformed("multiple root elements".to_string()));
                    }
                    root = Some(String::from_utf8_lossy(empty.local_name().as_ref()).into_owned());
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| MappingError::Malformed("unexpected closing tag".to_string()))?;
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(MappingError::Malformed("text outside the root element".to_string()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(MappingError::Malformed(format!("{} unclosed element(s)", depth)));
    }
    root.ok_or_else(|| MappingError::Malformed("no root element".to_string()))
}

/// Validate structure and root, then deserialize into a wire struct
pub(crate) fn parse_root<T>(xml: &str, expected: &'static str) -> Result<T, MappingError>
where
    T: serde::de::DeserializeOwned,
{
    let found = root_element(xml)?;
    if found != expected {
        return Err(MappingError::UnexpectedRoot { expected, found });
    }
    quick_xml::de::from_str(xml).map_err(|e| MappingError::Malformed(e.to_string()))
}
