//! Integration tests for registering YAML fixtures into a registry.
//!
//! Covers replacements, in-file placeholder declarations, prefixes and
//! merging several files into one registry.

use serde_json::{Map, Value, json};
use std::path::PathBuf;
use yaml_config_registry::config::{ConfigResolver, read_document};
use yaml_config_registry::error::{ConfigError, ErrorCode};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Register each resolver, in order, into a fresh registry.
fn register_all(resolvers: Vec<ConfigResolver>) -> Map<String, Value> {
    let mut registry = Map::new();
    for mut resolver in resolvers {
        resolver
            .register(&mut registry)
            .expect("Failed to register config");
    }
    registry
}

mod replacement_tests {
    use super::*;

    #[test]
    fn registers_without_replacement() {
        let registry = register_all(vec![ConfigResolver::new(fixture("config.yml"))]);

        assert_eq!(registry["debug"], json!(true));
        assert_eq!(registry["data"], json!("%data%"));
    }

    #[test]
    fn registers_with_replacement() {
        let resolver = ConfigResolver::new(fixture("config.yml"))
            .with_replacements([("data", "test-replacement")]);
        let registry = register_all(vec![resolver]);

        assert_eq!(registry["debug"], json!(true));
        assert_eq!(registry["data"], json!("test-replacement"));
    }

    #[test]
    fn in_file_declarations_are_applied() {
        let registry = register_all(vec![ConfigResolver::new(fixture(
            "config_replacement.yml",
        ))]);

        assert_eq!(registry["%path%"], json!("/var/www"));
        assert_eq!(registry["path.images"], json!("/var/www/web/images"));
        assert_eq!(registry["path.upload"], json!("/var/www/upload"));
        assert_eq!(registry["%url%"], json!("http://example.com"));
        assert_eq!(registry["url.images"], json!("http://example.com/images"));
    }

    #[test]
    fn in_file_declarations_are_remembered_by_the_resolver() {
        let mut resolver = ConfigResolver::new(fixture("config_replacement.yml"));
        let mut registry = Map::new();
        resolver.register(&mut registry).unwrap();

        assert_eq!(resolver.replacements().get("%path%"), Some("/var/www"));
        assert_eq!(resolver.replacements().len(), 2);
    }
}

mod empty_document_tests {
    use super::*;

    #[test]
    fn empty_document_reads_as_empty_mapping() {
        assert_eq!(read_document(&fixture("config_empty.yml")).unwrap(), Map::new());
    }

    #[test]
    fn empty_document_leaves_registry_unchanged() {
        let mut registry = json!({"existing": {"kept": true}})
            .as_object()
            .cloned()
            .unwrap();
        let before = registry.clone();

        ConfigResolver::new(fixture("config_empty.yml"))
            .register(&mut registry)
            .unwrap();
        ConfigResolver::new(fixture("config_empty.yml"))
            .with_prefix("existing")
            .register(&mut registry)
            .unwrap();

        assert_eq!(registry, before);
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn prefix_nests_the_document() {
        let resolver = ConfigResolver::new(fixture("config.yml")).with_prefix("prefix");
        let registry = register_all(vec![resolver]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry["prefix"]["debug"], json!(true));
        assert_eq!(registry["prefix"]["data"], json!("%data%"));
    }

    #[test]
    fn same_prefix_merges() {
        let registry = register_all(vec![
            ConfigResolver::new(fixture("config_base.yml")).with_prefix("prefix"),
            ConfigResolver::new(fixture("config_extend.yml")).with_prefix("prefix"),
        ]);
        let config = &registry["prefix"];

        assert_eq!(config["db.options"]["driver"], json!("pdo_mysql"));
        assert_eq!(config["db.options"]["password"], Value::Null);
        assert_eq!(config["myproject.test"]["param1"], json!("123"));
        assert_eq!(config["myproject.test"]["param3"]["param2A"], json!("123"));
        assert_eq!(config["myproject.test"]["param4"], json!([4, 5, 6]));
        assert_eq!(config["test.noparent.key"]["test"], json!([1, 2, 3, 4]));
    }

    #[test]
    fn different_prefixes_stay_isolated() {
        let registry = register_all(vec![
            ConfigResolver::new(fixture("config_base.yml")).with_prefix("base"),
            ConfigResolver::new(fixture("config_extend.yml")).with_prefix("extended"),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry["extended"]["db.options"]["password"], Value::Null);
        assert!(registry["extended"]["db.options"].get("driver").is_none());
        assert_eq!(registry["base"]["myproject.test"]["param1"], json!("123"));
        assert_eq!(
            registry["base"]["myproject.test"]["param3"]["param2A"],
            json!("123")
        );
        assert_eq!(
            registry["base"]["myproject.test"]["param4"],
            json!([1, 2, 3, 7])
        );
        assert_eq!(
            registry["extended"]["myproject.test"]["param4"],
            json!([4, 5, 6])
        );
        assert_eq!(
            registry["extended"]["test.noparent.key"]["test"],
            json!([1, 2, 3, 4])
        );
        assert!(registry["base"].get("test.noparent.key").is_none());
    }
}

mod merge_tests {
    use super::*;

    #[test]
    fn later_file_deep_merges_over_earlier() {
        let registry = register_all(vec![
            ConfigResolver::new(fixture("config_base.yml")),
            ConfigResolver::new(fixture("config_extend.yml")),
        ]);

        let db = &registry["db.options"];
        assert_eq!(db["driver"], json!("pdo_mysql"));
        assert_eq!(db["charset"], json!("utf8"));
        assert_eq!(db["host"], json!("127.0.0.1"));
        assert_eq!(db["dbname"], json!("mydatabase"));
        assert_eq!(db["user"], json!("root"));
        assert_eq!(db["password"], Value::Null);

        let test = &registry["myproject.test"];
        assert_eq!(test["param1"], json!("123"));
        assert_eq!(test["param2"], json!("456"));
        assert_eq!(test["param3"]["param2A"], json!("123"));
        assert_eq!(test["param3"]["param2B"], json!("456"));
        assert_eq!(test["param3"]["param2C"], json!("456"));
        assert_eq!(test["param4"], json!([4, 5, 6]));
        assert_eq!(test["param5"], json!("456"));

        assert_eq!(registry["test.noparent.key"]["test"], json!([1, 2, 3, 4]));
    }

    #[test]
    fn existing_registry_entries_are_merged() {
        let mut registry = json!({
            "db.options": {"driver": "sqlite", "timeout": 30},
            "service": "kept"
        })
        .as_object()
        .cloned()
        .unwrap();

        ConfigResolver::new(fixture("config_extend.yml"))
            .register(&mut registry)
            .unwrap();

        assert_eq!(registry["service"], json!("kept"));
        assert_eq!(
            registry["db.options"],
            json!({"driver": "sqlite", "timeout": 30, "password": null, "host": "127.0.0.1"})
        );
    }

    #[test]
    fn scalar_overwrites_existing_mapping() {
        let mut registry = json!({"debug": {"level": 3}}).as_object().cloned().unwrap();

        ConfigResolver::new(fixture("config.yml"))
            .register(&mut registry)
            .unwrap();

        assert_eq!(registry["debug"], json!(true));
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn broken_yaml_is_a_parse_error() {
        let err = ConfigResolver::new(fixture("broken.yml"))
            .register(&mut Map::new())
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ParseFailed);
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = ConfigResolver::new(fixture("does_not_exist.yml"))
            .register(&mut Map::new())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SourceUnavailable);
    }

    #[test]
    fn empty_path_is_a_source_error() {
        let err = ConfigResolver::new("")
            .register(&mut Map::new())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SourceUnavailable);
    }

    #[test]
    fn failed_register_leaves_registry_untouched() {
        let mut registry = Map::new();
        let _ = ConfigResolver::new(fixture("broken.yml")).register(&mut registry);
        assert!(registry.is_empty());
    }
}
