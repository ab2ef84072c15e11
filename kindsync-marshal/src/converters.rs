//! Converters shipped with the crate.

use kindsync_model::FieldValue;
use kindsync_types::{raw_to_text, RawValue};

use crate::{encode_default, ConvertError, Converter};

/// Stores reference values as JSON and reads them back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl Converter for JsonConverter {
    fn to_store(&self, value: &FieldValue) -> Result<RawValue, ConvertError> {
        encode_default(value)
    }

    fn from_store(&self, raw: &RawValue) -> Result<FieldValue, ConvertError> {
        Ok(FieldValue::Reference(raw.clone()))
    }
}

/// Keeps a list of strings in a single delimited text slot
/// (`"red, green"` reads as `["red", "green"]`).
#[derive(Debug, Clone, Copy)]
pub struct DelimitedListConverter {
    separator: char,
}

impl DelimitedListConverter {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for DelimitedListConverter {
    fn default() -> Self {
        Self::new(',')
    }
}

impl Converter for DelimitedListConverter {
    fn to_store(&self, value: &FieldValue) -> Result<RawValue, ConvertError> {
        match value {
            FieldValue::Null => Ok(RawValue::String(String::new())),
            FieldValue::Text(s) => Ok(RawValue::String(s.clone())),
            FieldValue::Reference(RawValue::Array(items)) => {
                let parts: Vec<String> = items.iter().map(raw_to_text).collect();
                Ok(RawValue::String(parts.join(&self.separator.to_string())))
            }
            other => Err(ConvertError::new(format!("{other} is not a list"))),
        }
    }

    fn from_store(&self, raw: &RawValue) -> Result<FieldValue, ConvertError> {
        let items = match raw {
            RawValue::Array(items) => items.clone(),
            RawValue::Null => Vec::new(),
            other => raw_to_text(other)
                .split(self.separator)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| RawValue::String(s.to_string()))
                .collect(),
        };
        Ok(FieldValue::Reference(RawValue::Array(items)))
    }
}
