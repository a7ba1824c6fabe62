//! Startup and hot reload through `Runtime`.

use std::io::Write;
use std::sync::Arc;

use revio::config::{load_config, parse_config, ConfigError};
use revio::routing::{ResolverCatalog, ResolverHandle, RouteInput, RouteRecord};
use revio::Runtime;

mod common;

fn tenants(target: &'static str) -> ResolverHandle {
    let route = Arc::new(RouteRecord::new(target));
    ResolverHandle::from_fn("tenants", move |host, _| {
        host.ends_with(".tenants.example.com")
            .then(|| RouteInput::from(route.clone()))
    })
}

const BASE: &str = r#"
[[routes]]
host = "mysite.example.com"
target = "127.0.0.1:9999"

[[resolvers]]
kind = "named"
name = "tenants"
priority = 1
"#;

#[test]
fn test_named_resolver_comes_from_catalog() {
    let catalog = ResolverCatalog::new().with("tenants", tenants("http://10.0.0.1"));
    let runtime = common::runtime_from(BASE, catalog);

    let route = runtime.engine().resolve("a.tenants.example.com", "/").unwrap();
    assert_eq!(route.urls()[0].hostname(), "10.0.0.1");
    assert_eq!(runtime.engine().resolvers()[0].handle.name(), "tenants");
}

#[test]
fn test_reload_swaps_resolvers_and_keeps_routes() {
    let catalog = ResolverCatalog::new().with("tenants", tenants("http://10.0.0.1"));
    let runtime = common::runtime_from(BASE, catalog);

    let reloaded = parse_config(
        r#"
        [[routes]]
        host = "other.example.com"
        target = "http://10.0.0.7"

        [[resolvers]]
        kind = "wildcard"
        pattern = "*.tenants.example.com"
        target = "http://10.0.0.2"
        priority = 1
        "#,
    )
    .unwrap();
    runtime.reload(&reloaded).unwrap();

    let engine = runtime.engine();
    let names: Vec<_> = engine
        .resolvers()
        .iter()
        .map(|e| e.handle.name().to_string())
        .collect();
    assert_eq!(names, vec!["pattern:*.tenants.example.com", "routing"]);

    let route = engine.resolve("a.tenants.example.com", "/").unwrap();
    assert_eq!(route.urls()[0].hostname(), "10.0.0.2");

    // Hosts dropped from the file keep their last target.
    assert!(engine.resolve("mysite.example.com", "/").is_some());
    assert!(engine.resolve("other.example.com", "/").is_some());
}

#[test]
fn test_reload_keeps_unchanged_named_resolver() {
    let handle = tenants("http://10.0.0.1");
    let catalog = ResolverCatalog::new().with("tenants", handle.clone());
    let runtime = common::runtime_from(BASE, catalog);

    runtime.reload(&parse_config(BASE).unwrap()).unwrap();

    let resolvers = runtime.engine().resolvers();
    assert_eq!(resolvers.len(), 2);
    assert_eq!(resolvers[0].handle, handle);
}

#[test]
fn test_failed_reload_changes_nothing() {
    let catalog = ResolverCatalog::new().with("tenants", tenants("http://10.0.0.1"));
    let runtime = common::runtime_from(BASE, catalog);
    let before = runtime.engine().resolvers();

    let bad = parse_config(
        r#"
        [[resolvers]]
        kind = "named"
        name = "missing"
        "#,
    )
    .unwrap();
    let err = runtime.reload(&bad).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownResolver(name) if name == "missing"));

    assert!(Arc::ptr_eq(&before, &runtime.engine().resolvers()));
}

#[test]
fn test_invalid_config_is_rejected_before_startup() {
    let err = parse_config(
        r#"
        [[routes]]
        host = ""
        target = "http://10.0.0.1"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));

    let err = parse_config(
        r#"
        [[resolvers]]
        kind = "wildcard"
        pattern = "*"
        target = "http://10.0.0.1"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("revio-reload-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(BASE.as_bytes()).unwrap();
    drop(file);

    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.routes.len(), 1);
    let err = Runtime::start(&config, ResolverCatalog::new()).err().unwrap();
    assert!(matches!(err, ConfigError::UnknownResolver(_)));

    assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
}
