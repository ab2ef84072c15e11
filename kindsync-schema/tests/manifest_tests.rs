use kindsync_model::DeclaredType;
use kindsync_schema::{KindManifest, SchemaDiscoverer, SchemaError};
use std::io::Write;

const MANIFEST: &str = r#"
[base]
name = "TemplateBase"
properties = [
    { field_name = "Hide In Menu", store_alias = "umbracoNaviHide", declared_type = "bool" },
]

[[base.children]]
name = "Home"
description = "Site root"
properties = [
    { field_name = "Title", declared_type = "text" },
    { field_name = "Visits", declared_type = "nullable<int>" },
    { field_name = "Summary", declared_type = "text", is_computed = true },
]

[[base.children]]
name = "Listing`1"
generic = true

[[base.children.children]]
name = "NewsList"
alias = "News"
"#;

#[test]
fn parses_and_discovers() {
    let manifest = KindManifest::from_toml_str(MANIFEST).unwrap();
    let kinds = SchemaDiscoverer::default().discover(&manifest.base).unwrap();
    assert_eq!(kinds.len(), 2);

    let home = &kinds[0];
    assert_eq!(home.alias, "Home");
    assert_eq!(home.description.as_deref(), Some("Site root"));
    assert_eq!(home.properties.len(), 4);
    assert_eq!(home.properties[0].store_alias, "umbracoNaviHide");
    assert_eq!(home.properties[1].store_alias, "title");
    assert_eq!(home.properties[2].declared_type, DeclaredType::nullable(DeclaredType::Int));
    assert!(home.properties[3].is_computed);

    assert_eq!(kinds[1].alias, "News");
    assert_eq!(kinds[1].name, "NewsList");
}

#[test]
fn rejects_unknown_type() {
    let text = r#"
[base]
name = "Base"
properties = [{ field_name = "X", declared_type = "blob" }]
"#;
    assert!(matches!(
        KindManifest::from_toml_str(text),
        Err(SchemaError::TomlDeserialize(_))
    ));
}

#[test]
fn rejects_empty_names() {
    let text = r#"
[base]
name = "Base"

[[base.children]]
name = "  "
"#;
    let err = KindManifest::from_toml_str(text).unwrap_err();
    assert!(matches!(err, SchemaError::ManifestInvalid(_)));
}

#[test]
fn rejects_property_without_field_name() {
    let text = r#"
[base]
name = "Base"
properties = [{ field_name = "", declared_type = "int" }]
"#;
    assert!(matches!(
        KindManifest::from_toml_str(text),
        Err(SchemaError::ManifestInvalid(_))
    ));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();
    let manifest = KindManifest::load(file.path()).unwrap();
    assert_eq!(manifest.base.children.len(), 2);
}

#[test]
fn load_missing_file_reports_path() {
    let err = KindManifest::load(std::path::Path::new("/nonexistent/kinds.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/kinds.toml"));
}

#[test]
fn manifest_leaf_with_children_fails_discovery() {
    let manifest = KindManifest::from_toml_str(
        r#"
[base]
name = "TemplateBase"

[[base.children]]
name = "Home"

[[base.children.children]]
name = "Orphaned"
"#,
    )
    .unwrap();
    assert!(matches!(
        SchemaDiscoverer::default().discover(&manifest.base),
        Err(SchemaError::LeafWithChildren { .. })
    ));
}
