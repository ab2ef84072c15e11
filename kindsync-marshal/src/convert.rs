//! Generic, type-directed conversion between raw slot values and typed fields.

use chrono::{NaiveDate, NaiveDateTime};
use kindsync_model::{DeclaredType, FieldValue};
use kindsync_types::{is_empty_raw, is_falsy_raw, raw_to_text, RawValue};

use crate::ConvertError;

const DATETIME_INPUT_FORMATS: [&str; 3] = [
    FieldValue::DATETIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

// 2^63, the first whole float above i64::MAX.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Encodes a typed value for the store when no converter is registered.
///
/// Fails for NaN and infinite floats, which have no JSON form.
pub fn encode_default(value: &FieldValue) -> Result<RawValue, ConvertError> {
    Ok(match value {
        FieldValue::Null => RawValue::Null,
        FieldValue::Bool(b) => RawValue::Bool(*b),
        FieldValue::Int(i) => RawValue::from(*i),
        FieldValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(RawValue::Number)
            .ok_or_else(|| ConvertError::new(format!("{f} is not a finite number")))?,
        FieldValue::Text(s) => RawValue::String(s.clone()),
        FieldValue::DateTime(dt) => {
            RawValue::String(dt.format(FieldValue::DATETIME_FORMAT).to_string())
        }
        FieldValue::Reference(raw) => raw.clone(),
    })
}

/// Converts a raw slot value to `target` without consulting converters.
pub fn convert_raw(raw: &RawValue, target: &DeclaredType) -> Result<FieldValue, ConvertError> {
    match target {
        DeclaredType::Bool => Ok(FieldValue::Bool(!is_falsy_raw(raw))),
        DeclaredType::Int => to_int(raw).map(FieldValue::Int),
        DeclaredType::Float => to_float(raw).map(FieldValue::Float),
        DeclaredType::Text => Ok(FieldValue::Text(raw_to_text(raw))),
        DeclaredType::DateTime => to_datetime(raw).map(FieldValue::DateTime),
        DeclaredType::Nullable(inner) => {
            if is_empty_raw(raw) {
                Ok(FieldValue::Null)
            } else {
                convert_raw(raw, inner)
            }
        }
        DeclaredType::Reference(_) => Ok(FieldValue::Reference(raw.clone())),
    }
}

fn to_int(raw: &RawValue) -> Result<i64, ConvertError> {
    match raw {
        RawValue::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= -I64_UPPER_BOUND && *f < I64_UPPER_BOUND)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| ConvertError::new(format!("{n} is not an integer in range"))),
        RawValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| ConvertError::new(e.to_string())),
        RawValue::Bool(b) => Ok(i64::from(*b)),
        RawValue::Null => Err(ConvertError::new("null cannot be converted to int")),
        other => Err(ConvertError::new(format!("unsupported value {other}"))),
    }
}

fn to_float(raw: &RawValue) -> Result<f64, ConvertError> {
    match raw {
        RawValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| ConvertError::new(format!("{n} is not representable as float"))),
        RawValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| ConvertError::new(e.to_string())),
        RawValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        RawValue::Null => Err(ConvertError::new("null cannot be converted to float")),
        other => Err(ConvertError::new(format!("unsupported value {other}"))),
    }
}

fn to_datetime(raw: &RawValue) -> Result<NaiveDateTime, ConvertError> {
    let RawValue::String(s) = raw else {
        return Err(ConvertError::new(format!("{raw} is not a date-time string")));
    };
    let s = s.trim();
    for format in DATETIME_INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ConvertError::new(format!("unrecognised date-time '{s}'")))
}
