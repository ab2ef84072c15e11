//! Property marshaling for kindsync.
//!
//! Converts values between the typed fields of a [`TypedInstance`] and the
//! untyped property bag of an [`Entity`].
//!
//! # Load coercion order
//!
//! For each non-computed property:
//! 1. slot absent: field gets its type's default
//! 2. `bool`: null, `""` and `"0"` read as `false`, anything else as `true`
//! 3. a registered [`Converter`] for the declared type: its output is final
//! 4. `nullable<T>`: empty reads as `null`, otherwise converted as `T`
//! 5. generic conversion, failing with [`MappingError::Conversion`]
//!
//! Saving is not transactional: a failure on one property leaves the
//! properties before it already written to the bag.
//!
//! [`TypedInstance`]: kindsync_model::TypedInstance
//! [`Entity`]: kindsync_model::Entity

mod convert;
mod converters;
mod error;
mod marshaler;
mod registry;

pub use convert::{convert_raw, encode_default};
pub use converters::{DelimitedListConverter, JsonConverter};
pub use error::{ConvertError, MappingError, MarshalResult};
pub use marshaler::Marshaler;
pub use registry::{Converter, ConverterRegistry};
