use errform_core::config::{ConfigError, ConfigValue, ErrformConfig};
use errform_core::FormatterConfig;
use serial_test::serial;

#[test]
fn test_empty_config() {
    let config = ErrformConfig::empty();
    assert!(config.get::<String>("nonexistent").is_err());
}

#[test]
fn test_set_and_get() {
    let mut config = ErrformConfig::empty();
    config.set("errors.sentinel", ConfigValue::String("non_field_errors".into()));
    assert_eq!(
        config.get::<String>("errors.sentinel").unwrap(),
        "non_field_errors"
    );
}

#[test]
fn test_get_or_default() {
    let config = ErrformConfig::empty();
    assert_eq!(config.get_or("missing", 42i64), 42);
}

#[test]
fn test_type_conversions() {
    let mut config = ErrformConfig::empty();
    config.set("int_val", ConfigValue::Integer(42));
    config.set("bool_val", ConfigValue::Bool(true));
    config.set("null_val", ConfigValue::Null);

    assert_eq!(config.get::<i64>("int_val").unwrap(), 42);
    assert!(config.get::<bool>("bool_val").unwrap());
    assert_eq!(config.get::<String>("int_val").unwrap(), "42");
    assert!(config.get::<Option<String>>("null_val").unwrap().is_none());
}

#[test]
fn test_flatten_yaml() {
    let yaml = r#"
errors:
  sentinel: "non_field_errors"
  default:
    code: "server_error"
"#;
    let config = ErrformConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(config.get::<String>("errors.sentinel").unwrap(), "non_field_errors");
    assert_eq!(config.get::<String>("errors.default.code").unwrap(), "server_error");
    assert!(config.contains_key("errors.default.code"));
    assert!(!config.contains_key("errors.default"));
}

#[test]
fn test_list_config() {
    let yaml = r#"
app:
  origins:
    - "http://localhost"
    - "https://prod.com"
"#;
    let config = ErrformConfig::from_yaml_str(yaml, "test").unwrap();
    let origins: Vec<String> = config.get("app.origins").unwrap();
    assert_eq!(origins, vec!["http://localhost", "https://prod.com"]);
}

#[test]
fn test_invalid_yaml_is_load_error() {
    let err = ErrformConfig::from_yaml_str("errors: [unclosed", "test").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn test_type_mismatch_display() {
    let mut config = ErrformConfig::empty();
    config.set("flag", ConfigValue::String("maybe".into()));
    let err = config.get::<bool>("flag").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Config type mismatch for 'flag': expected bool"
    );
}

#[test]
fn test_formatter_config_defaults() {
    let config = FormatterConfig::from_config(&ErrformConfig::empty()).unwrap();
    assert_eq!(config, FormatterConfig::default());
    assert_eq!(config.non_field_key, "__all__");
    assert_eq!(config.default_code, "error");
    assert_eq!(config.leaf_code, "invalid");
}

#[test]
fn test_formatter_config_from_yaml() {
    let yaml = r#"
errors:
  sentinel: "non_field_errors"
  leaf:
    code: "bad"
"#;
    let config = ErrformConfig::from_yaml_str(yaml, "test").unwrap();
    let formatter = FormatterConfig::from_config(&config).unwrap();
    assert_eq!(formatter.non_field_key, "non_field_errors");
    assert_eq!(formatter.default_code, "error");
    assert_eq!(formatter.leaf_code, "bad");
}

#[test]
fn test_formatter_config_wrong_type() {
    let mut config = ErrformConfig::empty();
    config.set(
        "errors.sentinel",
        ConfigValue::List(vec![ConfigValue::String("a".into())]),
    );
    let err = FormatterConfig::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
}

#[test]
#[serial]
fn test_load_from_dir_with_profile_and_env() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "errors:\n  sentinel: \"__all__\"\n  default:\n    code: \"base\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-prod.yaml"),
        "errors:\n  default:\n    code: \"prod\"\n",
    )
    .unwrap();

    std::env::remove_var("ERRFORM_PROFILE");
    std::env::set_var("ERRORS_LEAF_CODE", "from_env");

    let config = ErrformConfig::load_from(dir.path(), "prod").unwrap();
    std::env::remove_var("ERRORS_LEAF_CODE");

    assert_eq!(config.profile(), "prod");
    let formatter = FormatterConfig::from_config(&config).unwrap();
    assert_eq!(formatter.non_field_key, "__all__");
    assert_eq!(formatter.default_code, "prod");
    assert_eq!(formatter.leaf_code, "from_env");
}

#[test]
#[serial]
fn test_load_from_missing_files_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    std::env::remove_var("ERRFORM_PROFILE");
    let config = ErrformConfig::load_from(dir.path(), "dev").unwrap();
    assert_eq!(config.profile(), "dev");
}
