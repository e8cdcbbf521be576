use nswrap_fs::{ConfigStore, Error, NormalizedPath};
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestConfig {
    namespace: String,
    symbols: Vec<String>,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("nswrap.toml");
    fs::write(&file_path, "namespace = \"espresso\"\nsymbols = [\"JNIEnv\"]\n").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config.namespace, "espresso");
    assert_eq!(config.symbols, vec!["JNIEnv".to_string()]);
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("nswrap.json");
    fs::write(&file_path, r#"{"namespace": "espresso", "symbols": []}"#).unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();
    assert_eq!(config.namespace, "espresso");
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("nswrap.yml");
    fs::write(&file_path, "namespace: espresso\nsymbols: [a, b]\n").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();
    assert_eq!(config.symbols.len(), 2);
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("nswrap.ini");
    fs::write(&file_path, "namespace=x").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("nswrap.toml");
    fs::write(&file_path, "namespace = ").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_extension_is_case_insensitive() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("NSWRAP.TOML");
    fs::write(&file_path, "namespace = \"espresso\"\nsymbols = []\n").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();
    assert_eq!(config.namespace, "espresso");
}
