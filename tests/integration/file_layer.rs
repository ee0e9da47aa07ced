//! Integration tests for the file layer

use super::test_utils::{fixture, ArrObj, TestConfig};
use layerconf::{load, FileFormat, FileSource, LoadError, LoadOptions};
use tempfile::TempDir;

fn load_file(source: FileSource) -> Result<TestConfig, LoadError> {
    let mut config = TestConfig::default();
    load(&mut config, &LoadOptions::new().with_file(source))?;
    Ok(config)
}

fn assert_fixture_values(config: &TestConfig) {
    assert_eq!(config.str_key, "string value");
    assert_eq!(config.int_key, 1000);
    assert!(config.bool_key);
    assert_eq!(config.float_key, 1.2345);
    assert_eq!(config.str_arr, vec!["arr1"]);
    assert_eq!(config.obj_key.name, "name");
    // Absent from the file, keeps its default.
    assert_eq!(config.obj_key.retries, 3);
    // Arrays are replaced wholesale.
    assert_eq!(
        config.arr_obj,
        vec![ArrObj {
            key: "val".to_string()
        }]
    );
}

#[test]
fn test_json_fixture() {
    let config = load_file(FileSource::new(FileFormat::Json, fixture("config.json"))).unwrap();
    assert_fixture_values(&config);
}

#[test]
fn test_yaml_fixture() {
    let config = load_file(FileSource::new(FileFormat::Yaml, fixture("config.yaml"))).unwrap();
    assert_fixture_values(&config);
}

#[test]
fn test_toml_fixture() {
    let config = load_file(FileSource::new(FileFormat::Toml, fixture("config.toml"))).unwrap();
    assert_fixture_values(&config);
}

#[test]
fn test_inferred_format() {
    for name in ["config.json", "config.yaml", "config.toml"] {
        let source = FileSource::infer(fixture(name)).unwrap();
        let config = load_file(source).unwrap();
        assert_fixture_values(&config);
    }
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("partial.json");
    std::fs::write(&config_file, r#"{"intKey": 1000, "boolKey": true}"#).unwrap();

    let config = load_file(FileSource::new(FileFormat::Json, &config_file)).unwrap();
    assert_eq!(config.str_key, "def value");
    assert_eq!(config.int_key, 1000);
    assert!(config.bool_key);
    assert_eq!(config.str_arr, vec!["arr1"]);
    assert_eq!(config.arr_obj.len(), 2);
}

#[test]
fn test_null_yaml_document() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("null.yaml");
    std::fs::write(&config_file, "~\n").unwrap();

    let config = load_file(FileSource::new(FileFormat::Yaml, &config_file)).unwrap();
    assert_eq!(config.str_key, "def value");
    assert_eq!(config.int_key, 10);
}

#[test]
fn test_unknown_keys_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("extra.toml");
    std::fs::write(&config_file, "intKey = 5\nunrelated = \"x\"\n").unwrap();

    let config = load_file(FileSource::new(FileFormat::Toml, &config_file)).unwrap();
    assert_eq!(config.int_key, 5);
}

#[test]
fn test_format_mismatch_is_decode_error() {
    let err = load_file(FileSource::new(FileFormat::Json, fixture("config.toml"))).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Decode {
            format: FileFormat::Json,
            ..
        }
    ));
}

#[test]
fn test_type_mismatch_leaves_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.yaml");
    std::fs::write(&config_file, "intKey: twelve\n").unwrap();

    let mut config = TestConfig::default();
    let options = LoadOptions::new().with_file(FileSource::new(FileFormat::Yaml, &config_file));
    let err = load(&mut config, &options).unwrap_err();

    assert!(matches!(err, LoadError::Decode { .. }));
    assert_eq!(config.int_key, 10);
    assert_eq!(config.str_key, "def value");
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_file(FileSource::new(
        FileFormat::Json,
        temp_dir.path().join("missing.json"),
    ))
    .unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound(_)));
    assert!(err.to_string().starts_with("Config file not found: "));
}

#[test]
fn test_empty_path() {
    let err = load_file(FileSource::new(FileFormat::Yaml, "")).unwrap_err();
    assert!(matches!(err, LoadError::EmptyPath));
    assert_eq!(err.to_string(), "Config file path empty");
}

#[test]
fn test_unsupported_format() {
    let err = FileSource::infer("settings.ini").unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(_)));

    let err = "xml".parse::<FileFormat>().unwrap_err();
    assert_eq!(err.to_string(), "Unsupported config format: xml");
}
