//! Raw (untyped) property-bag values.
//!
//! The store keeps slot values as JSON. These helpers define how a raw value
//! reads as text, when it counts as empty, and when it counts as false.

/// Untyped value held in an entity's property bag.
pub type RawValue = serde_json::Value;

/// Renders a raw value the way the store would print it.
///
/// Null renders as the empty string; strings are returned verbatim (no
/// surrounding quotes); everything else uses its JSON form.
pub fn raw_to_text(raw: &RawValue) -> String {
    match raw {
        RawValue::Null => String::new(),
        RawValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// True for null and the empty string.
pub fn is_empty_raw(raw: &RawValue) -> bool {
    match raw {
        RawValue::Null => true,
        RawValue::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Boolean truthiness of a raw slot value.
///
/// Null, `""` and `"0"` are false, as are JSON `false` and numeric zero.
/// Every other value is true.
pub fn is_falsy_raw(raw: &RawValue) -> bool {
    match raw {
        RawValue::Null => true,
        RawValue::Bool(b) => !b,
        RawValue::String(s) => s.is_empty() || s == "0",
        RawValue::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
