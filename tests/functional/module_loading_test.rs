//! Functional tests loading built-in providers from descriptor trees

use axum::http::Method;
use hookrest_gateway::{
    api::routes::reserve_gateway_routes,
    config::Settings,
    loader::{RouteLoader, RouteTable},
    provider::ProviderRegistry,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn loader(dir: &Path) -> RouteLoader {
    let mut settings = Settings::default();
    settings.routes.directory = dir.to_path_buf();
    RouteLoader::new(settings, Arc::new(ProviderRegistry::with_builtins()))
}

fn gateway_table() -> RouteTable {
    let mut table = RouteTable::new();
    reserve_gateway_routes(&mut table).unwrap();
    table
}

#[test]
fn test_builtin_modules_mount_expected_routes() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "test.toml", "provider = \"self_test\"");
    write(
        tmp.path(),
        "tools/text.yaml",
        "provider: text_tools\nprefix: /v2\n",
    );
    write(
        tmp.path(),
        "status.toml",
        r#"
provider = "static_json"

[[options.endpoints]]
path = "/api/status"
body = { ok = true }

[[options.endpoints]]
method = "PUT"
path = "/api/status"
status = 202
"#,
    );

    let mut table = gateway_table();
    let report = loader(tmp.path()).load(&mut table);

    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert_eq!(report.loaded_count(), 3);
    assert!(table.contains(&Method::GET, "/api/test"));
    assert!(table.contains(&Method::GET, "/api/test/hello"));
    assert!(table.contains(&Method::POST, "/v2/api/tools/text"));
    assert!(table.contains(&Method::GET, "/api/status"));
    assert!(table.contains(&Method::PUT, "/api/status"));
    assert_eq!(table.len(), 5);
}

#[test]
fn test_module_cannot_shadow_gateway_routes() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "health.toml",
        "provider = \"static_json\"\n\n[options]\npath = \"/health\"\n",
    );

    let mut table = gateway_table();
    let report = loader(tmp.path()).load(&mut table);

    assert_eq!(report.loaded_count(), 0);
    assert!(report.failures[0].error.contains("<gateway>"));
    assert_eq!(table.len(), 0);
}

#[test]
fn test_same_provider_twice_collides() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.toml", "provider = \"self_test\"");
    write(tmp.path(), "b/again.toml", "provider = \"self_test\"");

    let mut table = gateway_table();
    let report = loader(tmp.path()).load(&mut table);

    assert_eq!(report.loaded_count(), 1);
    assert_eq!(report.failures[0].module, "b/again.toml");
    assert_eq!(table.len(), 2);
}

#[test]
fn test_invalid_provider_options_rejected() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "links.toml",
        "provider = \"redirect\"\n\n[options.links]\nhome = \"/relative\"\n",
    );
    write(
        tmp.path(),
        "typo.toml",
        "provider = \"self_test\"\nenabeld = true\n",
    );

    let report = loader(tmp.path()).load(&mut gateway_table());

    assert_eq!(report.loaded_count(), 0);
    assert_eq!(report.failed_count(), 2);
    assert!(report.failures[0].error.contains("absolute"));
}

#[test]
fn test_fresh_directory_then_populated() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("routes");

    let first = loader(&dir).load(&mut gateway_table());
    assert!(first.created_directory);
    assert_eq!(first.loaded_count(), 0);

    write(&dir, "test.toml", "provider = \"self_test\"");
    let second = loader(&dir).load(&mut gateway_table());
    assert!(!second.created_directory);
    assert_eq!(second.loaded_count(), 1);
}
