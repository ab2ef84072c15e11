//! Loads and saves typed instances against entity property bags.

use kindsync_model::{DeclaredType, Entity, FieldValue, PropertyDescriptor, TypedInstance};
use kindsync_types::{is_empty_raw, is_falsy_raw, RawValue};
use tracing::debug;

use crate::{convert_raw, encode_default, ConverterRegistry, MappingError, MarshalResult};

/// Moves field values between typed instances and entity property bags,
/// consulting a [`ConverterRegistry`] before the built-in coercions.
#[derive(Debug, Clone, Default)]
pub struct Marshaler {
    registry: ConverterRegistry,
}

impl Marshaler {
    pub fn new(registry: ConverterRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.registry
    }

    /// Writes every non-computed field of `instance` into `entity`'s bag.
    ///
    /// Returns the number of slots written. Fails with
    /// [`MappingError::MissingSlot`] on the first property whose slot is
    /// absent; slots written before it stay written.
    pub fn save<I>(&self, instance: &I, entity: &mut Entity) -> MarshalResult<usize>
    where
        I: TypedInstance + ?Sized,
    {
        let kind = instance.descriptor();
        let mut written = 0;

        for property in kind.stored_properties() {
            if !entity.has_slot(&property.store_alias) {
                return Err(MappingError::MissingSlot {
                    kind: kind.alias.clone(),
                    property: property.field_name.clone(),
                    store_alias: property.store_alias.clone(),
                    entity: entity.identity,
                });
            }

            let value = instance
                .field(&property.field_name)
                .unwrap_or_else(|| FieldValue::default_for(&property.declared_type));
            let raw = self.encode(&kind.alias, property, &value)?;
            entity.set_property(property.store_alias.clone(), raw);
            written += 1;
        }

        debug!(kind = %kind.alias, identity = %entity.identity, written, "Saved instance properties");
        Ok(written)
    }

    /// Reads every non-computed field of `instance` from `entity`'s bag, then
    /// lets the instance fill in its computed fields.
    pub fn load<I>(&self, instance: &mut I, entity: &Entity) -> MarshalResult<()>
    where
        I: TypedInstance + ?Sized,
    {
        let kind_alias = instance.descriptor().alias.clone();
        let properties: Vec<PropertyDescriptor> = instance.descriptor().properties.clone();

        for property in properties.iter().filter(|p| !p.is_computed) {
            let value = self.read_value(&kind_alias, property, entity)?;
            assign(instance, &kind_alias, property, value)?;
        }

        for property in properties.iter().filter(|p| p.is_computed) {
            if let Some(value) = instance.compute(property, entity) {
                assign(instance, &kind_alias, property, value)?;
            }
        }

        debug!(kind = %kind_alias, identity = %entity.identity, "Loaded instance properties");
        Ok(())
    }

    /// Binds `instance` to `entity` and loads it.
    ///
    /// The entity must carry a kind alias matching the instance's kind.
    pub fn populate<I>(&self, instance: &mut I, entity: &Entity) -> MarshalResult<()>
    where
        I: TypedInstance + ?Sized,
    {
        let Some(found) = entity.kind.as_deref() else {
            return Err(MappingError::MissingKind {
                entity: entity.identity,
                alias: entity.alias.clone(),
            });
        };
        let expected = &instance.descriptor().alias;
        if found != expected {
            return Err(MappingError::KindMismatch {
                entity: entity.identity,
                expected: expected.clone(),
                found: found.to_string(),
            });
        }

        instance.bind(entity);
        self.load(instance, entity)
    }

    /// Typed value of one property as stored in `entity`.
    ///
    /// An absent slot yields the declared type's default.
    pub fn read_value(
        &self,
        kind_alias: &str,
        property: &PropertyDescriptor,
        entity: &Entity,
    ) -> MarshalResult<FieldValue> {
        let declared = &property.declared_type;
        let Some(raw) = entity.get_property(&property.store_alias) else {
            return Ok(FieldValue::default_for(declared));
        };

        if *declared == DeclaredType::Bool {
            return Ok(FieldValue::Bool(!is_falsy_raw(raw)));
        }

        if let Some(converter) = self.registry.lookup(declared) {
            return converter
                .from_store(raw)
                .map_err(|e| conversion_error(kind_alias, property, raw, e.to_string()));
        }

        if let DeclaredType::Nullable(inner) = declared {
            if is_empty_raw(raw) {
                return Ok(FieldValue::Null);
            }
            return convert_raw(raw, inner)
                .map_err(|e| conversion_error(kind_alias, property, raw, e.to_string()));
        }

        convert_raw(raw, declared).map_err(|e| conversion_error(kind_alias, property, raw, e.to_string()))
    }

    fn encode(
        &self,
        kind_alias: &str,
        property: &PropertyDescriptor,
        value: &FieldValue,
    ) -> MarshalResult<RawValue> {
        let encoded = match self.registry.lookup(&property.declared_type) {
            Some(converter) => converter.to_store(value),
            None => encode_default(value),
        };
        encoded.map_err(|e| MappingError::Conversion {
            kind: kind_alias.to_string(),
            property: property.field_name.clone(),
            target: "store".to_string(),
            raw: value.to_string(),
            reason: e.to_string(),
        })
    }
}

fn assign<I>(instance: &mut I, kind_alias: &str, property: &PropertyDescriptor, value: FieldValue) -> MarshalResult<()>
where
    I: TypedInstance + ?Sized,
{
    let shown = value.to_string();
    instance
        .set_field(&property.field_name, value)
        .map_err(|reason| MappingError::Assign {
            kind: kind_alias.to_string(),
            property: property.field_name.clone(),
            value: shown,
            reason,
        })
}

fn conversion_error(kind_alias: &str, property: &PropertyDescriptor, raw: &RawValue, reason: String) -> MappingError {
    MappingError::Conversion {
        kind: kind_alias.to_string(),
        property: property.field_name.clone(),
        target: property.declared_type.to_string(),
        raw: raw.to_string(),
        reason,
    }
}
