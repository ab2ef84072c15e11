use kindsync_types::{is_empty_raw, is_falsy_raw, raw_to_text, RawValue};
use proptest::prelude::*;
use serde_json::json;

// ── raw_to_text ───────────────────────────────────────────────────

#[test]
fn null_renders_empty() {
    assert_eq!(raw_to_text(&RawValue::Null), "");
}

#[test]
fn string_renders_without_quotes() {
    assert_eq!(raw_to_text(&json!("hello")), "hello");
}

#[test]
fn number_and_bool_render_as_json() {
    assert_eq!(raw_to_text(&json!(42)), "42");
    assert_eq!(raw_to_text(&json!(true)), "true");
}

// ── Emptiness ─────────────────────────────────────────────────────

#[test]
fn empty_values() {
    assert!(is_empty_raw(&RawValue::Null));
    assert!(is_empty_raw(&json!("")));
    assert!(!is_empty_raw(&json!(" ")));
    assert!(!is_empty_raw(&json!(0)));
}

// ── Truthiness ────────────────────────────────────────────────────

#[test]
fn falsy_table() {
    assert!(is_falsy_raw(&RawValue::Null));
    assert!(is_falsy_raw(&json!("")));
    assert!(is_falsy_raw(&json!("0")));
    assert!(is_falsy_raw(&json!(false)));
    assert!(is_falsy_raw(&json!(0)));
}

#[test]
fn truthy_table() {
    assert!(!is_falsy_raw(&json!("1")));
    assert!(!is_falsy_raw(&json!("false")));
    assert!(!is_falsy_raw(&json!("00")));
    assert!(!is_falsy_raw(&json!(true)));
    assert!(!is_falsy_raw(&json!(2)));
}

proptest! {
    /// Any non-empty string other than "0" is truthy.
    #[test]
    fn nonempty_strings_are_truthy(s in ".+") {
        prop_assume!(s != "0");
        prop_assert!(!is_falsy_raw(&json!(s)));
    }
}
