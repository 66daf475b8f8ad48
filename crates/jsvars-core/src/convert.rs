//! Conversion of server-side values into JavaScript literals.
//!
//! Any [`Serialize`] value is first lifted into a [`serde_json::Value`] and then
//! dispatched on its kind:
//!
//! | kind                      | result                                   |
//! |---------------------------|------------------------------------------|
//! | null                      | [`Serialized::Null`] (passed through)    |
//! | number                    | [`Serialized::Number`] (passed through)  |
//! | boolean                   | literal text `true` / `false`            |
//! | string, array, object     | JSON text under [`EncodeOptions`]        |
//!
//! Values serde cannot represent as JSON fail with [`Error::InvalidValue`].

use std::fmt::{self, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Number, Serializer, Value};

use crate::config::EncodeOptions;
use crate::error::{Error, Result};

/// A value already converted for the client, kept in the store until render time.
#[derive(Debug, Clone, PartialEq)]
pub enum Serialized {
    Null,
    Number(Number),
    /// JavaScript source text: `true`/`false` or a JSON encoding.
    Text(String),
}

impl fmt::Display for Serialized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for Serialized {
    fn from(value: bool) -> Self {
        Self::Text(if value { "true" } else { "false" }.into())
    }
}

/// Convert any serializable value.
pub fn convert<T: Serialize + ?Sized>(value: &T, options: &EncodeOptions) -> Result<Serialized> {
    let value = serde_json::to_value(value).map_err(|e| Error::InvalidValue(e.to_string()))?;
    convert_value(&value, options)
}

/// Convert an already-built JSON value.
pub fn convert_value(value: &Value, options: &EncodeOptions) -> Result<Serialized> {
    match value {
        Value::Null => Ok(Serialized::Null),
        Value::Number(n) => Ok(Serialized::Number(n.clone())),
        Value::Bool(b) => Ok(Serialized::from(*b)),
        Value::String(_) | Value::Array(_) | Value::Object(_) => {
            encode(value, options).map(Serialized::Text)
        }
    }
}

/// JSON-encode `value`, honoring the depth limit and escaping switches.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String> {
    let depth = nesting_depth(value);
    if depth > options.depth {
        return Err(Error::DepthExceeded {
            depth,
            max: options.depth,
        });
    }

    let json = if options.pretty_print {
        to_string_pretty(value)?
    } else {
        serde_json::to_string(value).map_err(|e| Error::InvalidValue(e.to_string()))?
    };

    Ok(escape(&json, options))
}

/// Pretty JSON with a four-space indent.
fn to_string_pretty(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::InvalidValue(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| Error::InvalidValue(e.to_string()))
}

/// Number of nested array/object levels. Scalars are 0.
fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

// Every character rewritten here can only occur inside JSON string literals,
// so the rewrite never touches the document structure.
fn escape(json: &str, options: &EncodeOptions) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '/' if !options.unescaped_slashes => out.push_str("\\/"),
            '<' if options.hex_tag => out.push_str("\\u003C"),
            '>' if options.hex_tag => out.push_str("\\u003E"),
            '&' if options.hex_amp => out.push_str("\\u0026"),
            '\'' if options.hex_apos => out.push_str("\\u0027"),
            c if !c.is_ascii() && !options.unescaped_unicode => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // Writing to a String cannot fail.
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out
}
