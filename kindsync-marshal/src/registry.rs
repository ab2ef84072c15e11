//! Pluggable bidirectional value converters, keyed by declared type.

use kindsync_model::{DeclaredType, FieldValue};
use kindsync_types::RawValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ConvertError;

/// Converts one declared type between its typed and raw forms.
///
/// A converter registered for a type takes over both directions: its
/// `from_store` output is assigned to the field as-is.
pub trait Converter: Send + Sync {
    fn to_store(&self, value: &FieldValue) -> Result<RawValue, ConvertError>;

    fn from_store(&self, raw: &RawValue) -> Result<FieldValue, ConvertError>;
}

/// Converters by declared type. The last registration for a type wins.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<DeclaredType, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `converter` for `declared`, returning the one it replaced.
    pub fn register<C>(&mut self, declared: DeclaredType, converter: C) -> Option<Arc<dyn Converter>>
    where
        C: Converter + 'static,
    {
        self.register_shared(declared, Arc::new(converter))
    }

    /// Registers an already shared converter.
    pub fn register_shared(
        &mut self,
        declared: DeclaredType,
        converter: Arc<dyn Converter>,
    ) -> Option<Arc<dyn Converter>> {
        self.converters.insert(declared, converter)
    }

    pub fn unregister(&mut self, declared: &DeclaredType) -> Option<Arc<dyn Converter>> {
        self.converters.remove(declared)
    }

    pub fn lookup(&self, declared: &DeclaredType) -> Option<&dyn Converter> {
        self.converters.get(declared).map(|c| c.as_ref())
    }

    pub fn contains(&self, declared: &DeclaredType) -> bool {
        self.converters.contains_key(declared)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<String> = self.converters.keys().map(ToString::to_string).collect();
        types.sort();
        f.debug_struct("ConverterRegistry").field("types", &types).finish()
    }
}
