use fluentmap_core::{default_log_level, BuildOptions, LoggingConfig};

#[test]
fn partial_build_options_keep_remaining_defaults() {
    let options: BuildOptions =
        serde_json::from_str(r#"{ "default_conventions": true }"#).expect("partial options");

    assert!(options.default_conventions);
    assert!(options.validate_identity);

    let empty: BuildOptions = serde_json::from_str("{}").expect("empty options");
    assert_eq!(empty, BuildOptions::default());
}

#[test]
fn partial_logging_config_keeps_default_level() {
    let config: LoggingConfig =
        serde_json::from_str(r#"{ "log_dir": "/var/log/fluentmap" }"#).expect("partial config");

    assert_eq!(config.level, default_log_level());
    assert_eq!(config.log_dir, "/var/log/fluentmap");
    assert!(config.is_enabled());
}

#[test]
fn options_serialize_with_field_names() {
    let value = serde_json::to_value(BuildOptions {
        validate_identity: false,
        default_conventions: true,
    })
    .expect("options should serialize");

    assert_eq!(
        value,
        serde_json::json!({ "validate_identity": false, "default_conventions": true })
    );
}
