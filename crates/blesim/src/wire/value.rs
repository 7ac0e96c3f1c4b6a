//! Typed values carried in message bodies.
//!
//! This is the "append/read typed value" primitive of the underlying
//! wire protocol. Values are kept in structured form; byte-level
//! marshaling belongs to the transport and is not reimplemented here.

use super::path::ObjectPath;

/// A tagged wire value.
///
/// Covers the basic types the attribute tree uses plus the three
/// container shapes (array, dict, variant). Each value knows its own
/// type signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(u8),
    Bool(bool),
    Uint16(u16),
    Int16(i16),
    Uint32(u32),
    Str(String),
    Path(ObjectPath),
    Array(Array),
    Dict(Dict),
    Variant(Box<Value>),
}

/// A homogeneous array with an explicit element signature, so empty
/// arrays still carry their type.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub element_signature: String,
    pub items: Vec<Value>,
}

/// An ordered key/value mapping. Entry order is preserved; it is the
/// serialization order of the attribute table that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dict {
    pub key_signature: String,
    pub value_signature: String,
    pub entries: Vec<(Value, Value)>,
}

impl Value {
    /// The type signature of this value, e.g. `"ay"` or `"a{sv}"`.
    pub fn signature(&self) -> String {
        match self {
            Value::Byte(_) => "y".to_string(),
            Value::Bool(_) => "b".to_string(),
            Value::Uint16(_) => "q".to_string(),
            Value::Int16(_) => "n".to_string(),
            Value::Uint32(_) => "u".to_string(),
            Value::Str(_) => "s".to_string(),
            Value::Path(_) => "o".to_string(),
            Value::Array(array) => format!("a{}", array.element_signature),
            Value::Dict(dict) => {
                format!("a{{{}{}}}", dict.key_signature, dict.value_signature)
            }
            Value::Variant(_) => "v".to_string(),
        }
    }

    /// Build a byte-buffer value (`ay`).
    pub fn byte_array(bytes: &[u8]) -> Self {
        Value::Array(Array {
            element_signature: "y".to_string(),
            items: bytes.iter().map(|b| Value::Byte(*b)).collect(),
        })
    }

    /// Build a string-list value (`as`).
    pub fn string_array<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Array(Array {
            element_signature: "s".to_string(),
            items: strings.into_iter().map(|s| Value::Str(s.into())).collect(),
        })
    }

    /// Wrap a value in a variant.
    pub fn variant(value: Value) -> Self {
        Value::Variant(Box::new(value))
    }

    /// Extract a byte buffer from an `ay` value, looking through one
    /// level of variant wrapping.
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Value::Array(array) if array.element_signature == "y" => {
                let mut bytes = Vec::with_capacity(array.items.len());
                for item in &array.items {
                    match item {
                        Value::Byte(b) => bytes.push(*b),
                        _ => return None,
                    }
                }
                Some(bytes)
            }
            Value::Variant(inner) => inner.as_bytes(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Variant(inner) => inner.as_str(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Variant(inner) => inner.as_bool(),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&ObjectPath> {
        match self {
            Value::Path(path) => Some(path),
            Value::Variant(inner) => inner.as_path(),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            Value::Variant(inner) => inner.as_dict(),
            _ => None,
        }
    }
}

impl Dict {
    pub fn new(key_signature: impl Into<String>, value_signature: impl Into<String>) -> Self {
        Self {
            key_signature: key_signature.into(),
            value_signature: value_signature.into(),
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
