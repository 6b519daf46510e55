use sql_literal_inliner::{
    config::{Config, InlineConfig, OutputConfig},
    inliner::InlineOptions
};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.inline.limit);
    assert!(config.inline.strings);
    assert!(config.output.format.is_none());
    assert!(config.output.colored);
}

#[test]
fn test_empty_file_is_default() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_full_config() {
    let config = Config::parse(
        r#"
        [inline]
        limit = false
        strings = true

        [output]
        format = "json"
        colored = false
        "#
    )
    .unwrap();

    assert!(!config.inline.limit);
    assert_eq!(config.output.format.as_deref(), Some("json"));
    assert!(!config.output.colored);
}

#[test]
fn test_invalid_config() {
    assert!(Config::parse("[inline]\nlimit = \"yes\"\n").is_err());
    assert!(Config::parse("not toml at all [").is_err());
}

#[test]
fn test_environment_overrides_file() {
    let mut config = Config::parse("[output]\nformat = \"text\"\n").unwrap();
    config.apply_env(|key| (key == "SQL_INLINER_FORMAT").then(|| "yaml".to_string()));
    assert_eq!(config.output.format.as_deref(), Some("yaml"));
    assert!(config.output.colored);
}

#[test]
fn test_inline_config_into_options() {
    let options = InlineOptions::from(&InlineConfig::default());
    assert_eq!(options, InlineOptions::default());
}

#[test]
fn test_output_config_clone() {
    let config = OutputConfig {
        format:  Some("yaml".to_string()),
        colored: false
    };
    let cloned = config.clone();
    assert_eq!(cloned, config);
}
