use kindsync_hierarchy::{normalize_reference, DirectiveMode, DirectiveParser, HierarchyConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn attribute_parser() -> DirectiveParser {
    DirectiveParser::new(&HierarchyConfig::default()).unwrap()
}

fn views_parser() -> DirectiveParser {
    DirectiveParser::new(&HierarchyConfig::views()).unwrap()
}

// ── Attribute mode ───────────────────────────────────────────────

#[test]
fn attribute_reference_is_normalized() {
    let text = r#"<%@ Master Language="C#" masterPageFile="Sub/Page.master" %>
<html></html>"#;
    assert_eq!(attribute_parser().parent_alias(text).as_deref(), Some("Page"));
}

#[test]
fn attribute_key_is_case_insensitive() {
    let text = r#"<%@ Master MASTERPAGEFILE="~/masterpages/Site.master" %>"#;
    assert_eq!(attribute_parser().parent_alias(text).as_deref(), Some("Site"));
}

#[test]
fn last_matching_attribute_wins() {
    let text = r#"<%@ Master MasterPageFile="First.master" masterpagefile="Second.master" %>"#;
    assert_eq!(attribute_parser().parent_alias(text).as_deref(), Some("Second"));
}

#[test]
fn attributes_after_header_are_ignored() {
    let text = r#"<%@ Master Language="C#" %>
<asp:Content MasterPageFile="Body.master" runat="server" />"#;
    assert_eq!(attribute_parser().parent_alias(text), None);
}

#[test]
fn text_without_header_has_no_directive() {
    assert_eq!(attribute_parser().parent_alias(r#"MasterPageFile="X.master""#), None);
}

#[test]
fn empty_attribute_value_yields_empty_alias() {
    let text = r#"<%@ Master MasterPageFile="" %>"#;
    assert_eq!(attribute_parser().parent_alias(text).as_deref(), Some(""));
}

#[test]
fn custom_attribute_key() {
    let config = HierarchyConfig {
        attribute_key: "Parent".into(),
        ..HierarchyConfig::default()
    };
    let parser = DirectiveParser::new(&config).unwrap();
    let text = r#"<%@ Page MasterPageFile="Ignored.master" parent="Real.master" %>"#;
    assert_eq!(parser.parent_alias(text).as_deref(), Some("Real"));
}

// ── Assignment mode ──────────────────────────────────────────────

#[test]
fn assignment_reference_is_normalized() {
    let text = r#"@{
    Layout = "~/Views/Shared/Master.cshtml";
    ViewBag.Title = "Home";
}"#;
    assert_eq!(views_parser().parent_alias(text).as_deref(), Some("Master"));
}

#[test]
fn first_assignment_wins() {
    let text = "Layout=\"One.vbhtml\"\nLayout = \"Two.cshtml\"";
    assert_eq!(views_parser().parent_alias(text).as_deref(), Some("One"));
}

#[test]
fn assignment_name_is_escaped() {
    let config = HierarchyConfig {
        mode: DirectiveMode::Assignment,
        assignment_name: "Page.Layout".into(),
        ..HierarchyConfig::default()
    };
    let parser = DirectiveParser::new(&config).unwrap();
    assert_eq!(parser.parent_alias(r#"PageXLayout = "Wrong""#), None);
    assert_eq!(parser.parent_alias(r#"Page.Layout = "Right""#).as_deref(), Some("Right"));
}

#[test]
fn view_without_layout_has_no_directive() {
    assert_eq!(views_parser().parent_alias("<h1>Hello</h1>"), None);
}

// ── Config ───────────────────────────────────────────────────────

#[test]
fn config_reads_from_toml_with_defaults() {
    let config: HierarchyConfig = toml::from_str(
        r#"
mode = "assignment"
detect_cycles = true
"#,
    )
    .unwrap();
    assert_eq!(config.mode, DirectiveMode::Assignment);
    assert!(config.detect_cycles);
    assert_eq!(config.sentinel_alias, "default");
    assert_eq!(config.attribute_key, "masterPageFile");
}

// ── Normalization properties ─────────────────────────────────────

proptest! {
    #[test]
    fn normalized_alias_has_no_slash_or_suffix(
        dirs in proptest::collection::vec("[A-Za-z0-9_]{1,8}", 0..4),
        name in "[A-Za-z][A-Za-z0-9_]{0,10}",
        suffix in prop::sample::select(vec!["", ".master", ".cshtml", ".vbhtml"]),
    ) {
        let mut raw = dirs.join("/");
        if !raw.is_empty() {
            raw.push('/');
        }
        raw.push_str(&name);
        raw.push_str(suffix);

        let alias = normalize_reference(&raw, &HierarchyConfig::default().suffixes);
        prop_assert_eq!(alias, name);
    }
}
