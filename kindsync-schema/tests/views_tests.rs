use kindsync_schema::{SchemaConfig, SchemaDiscoverer, SchemaError};
use std::fs;
use tempfile::TempDir;

fn views_dir(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        fs::write(dir.path().join(name), "@{ Layout = null; }").unwrap();
    }
    dir
}

#[test]
fn one_kind_per_view_file() {
    let dir = views_dir(&["Home.cshtml", "News Page.cshtml", "style.css"]);
    let kinds = SchemaDiscoverer::default().discover_views(dir.path()).unwrap();
    let aliases: Vec<&str> = kinds.iter().map(|k| k.alias.as_str()).collect();
    assert_eq!(aliases, vec!["Home", "NewsPage"]);
    assert_eq!(kinds[1].name, "News Page");
}

#[test]
fn view_start_is_skipped_case_insensitively() {
    let dir = views_dir(&["_viewstart.cshtml", "Master.cshtml"]);
    let kinds = SchemaDiscoverer::default().discover_views(dir.path()).unwrap();
    assert_eq!(kinds.len(), 1);
    assert_eq!(kinds[0].alias, "Master");
}

#[test]
fn subdirectories_are_ignored() {
    let dir = views_dir(&["Home.cshtml"]);
    fs::create_dir(dir.path().join("Partials.cshtml")).unwrap();
    fs::create_dir(dir.path().join("Shared")).unwrap();
    fs::write(dir.path().join("Shared").join("Nested.cshtml"), "").unwrap();
    let kinds = SchemaDiscoverer::default().discover_views(dir.path()).unwrap();
    assert_eq!(kinds.len(), 1);
}

#[test]
fn configured_extension() {
    let dir = views_dir(&["Home.vbhtml", "Other.cshtml"]);
    let discoverer = SchemaDiscoverer::new(SchemaConfig {
        view_extension: "vbhtml".into(),
        ..SchemaConfig::default()
    });
    let kinds = discoverer.discover_views(dir.path()).unwrap();
    assert_eq!(kinds.len(), 1);
    assert_eq!(kinds[0].alias, "Home");
}

#[test]
fn colliding_stems_are_duplicates() {
    let dir = views_dir(&["My Page.cshtml", "MyPage.cshtml"]);
    assert!(matches!(
        SchemaDiscoverer::default().discover_views(dir.path()),
        Err(SchemaError::DuplicateAlias { .. })
    ));
}

#[test]
fn missing_directory_is_io_error() {
    let err = SchemaDiscoverer::default()
        .discover_views(std::path::Path::new("/nonexistent/views"))
        .unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
}
