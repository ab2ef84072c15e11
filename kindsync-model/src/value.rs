use chrono::NaiveDateTime;
use kindsync_types::RawValue;
use std::fmt;

use crate::DeclaredType;

/// A typed value held by an in-memory instance field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `none` of a nullable field, or an unset reference.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    /// Value of a reference type, kept in its raw form.
    Reference(RawValue),
}

impl FieldValue {
    /// Canonical text form of date-time values in the store.
    pub const DATETIME_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.f";

    /// The value a field of `declared` type holds before anything is loaded.
    pub fn default_for(declared: &DeclaredType) -> Self {
        match declared {
            DeclaredType::Bool => Self::Bool(false),
            DeclaredType::Int => Self::Int(0),
            DeclaredType::Float => Self::Float(0.0),
            DeclaredType::Text => Self::Text(String::new()),
            DeclaredType::DateTime => Self::DateTime(NaiveDateTime::default()),
            DeclaredType::Nullable(_) | DeclaredType::Reference(_) => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&RawValue> {
        match self {
            Self::Reference(raw) => Some(raw),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format(Self::DATETIME_FORMAT)),
            Self::Reference(raw) => write!(f, "{raw}"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
