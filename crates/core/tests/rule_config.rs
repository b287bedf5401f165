use std::fs;

use tempfile::tempdir;
use unannotated_core::config::{
    load_rule_config, load_rule_config_or_default, RuleConfig, DEFAULT_COMPANION_NAMESPACE,
    DEFAULT_FRAMEWORK_ANNOTATION_NAMESPACE,
};

#[test]
fn defaults_are_used_without_a_file() {
    let config = load_rule_config_or_default(None).unwrap();
    assert_eq!(config, RuleConfig::default());
    assert_eq!(config.framework_annotation_namespace, DEFAULT_FRAMEWORK_ANNOTATION_NAMESPACE);
    assert_eq!(config.companion_namespace, DEFAULT_COMPANION_NAMESPACE);
}

#[test]
fn partial_json_config_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(&path, r#"{"companion_namespace": "com.acme.harness"}"#).unwrap();

    let config = load_rule_config(&path).unwrap();
    assert_eq!(config.companion_namespace, "com.acme.harness");
    assert_eq!(config.framework_annotation_namespace, DEFAULT_FRAMEWORK_ANNOTATION_NAMESPACE);
    assert_eq!(config.benchmark_annotations, RuleConfig::default().benchmark_annotations);
}

#[test]
fn yaml_config_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.yml");
    fs::write(&path, "proxy_superclass_markers:\n  - com.acme.GeneratedBase\n").unwrap();

    let config = load_rule_config(&path).unwrap();
    assert_eq!(config.proxy_superclass_markers, vec!["com.acme.GeneratedBase".to_string()]);
}

#[test]
fn missing_and_corrupt_configs_fail_with_context() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = load_rule_config(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read rule config"));

    let corrupt = dir.path().join("rules.json");
    fs::write(&corrupt, "not-json").unwrap();
    let err = load_rule_config(&corrupt).unwrap_err();
    assert!(err.to_string().contains("Failed to parse rule config JSON"));

    let unknown = dir.path().join("rules.ini");
    fs::write(&unknown, "").unwrap();
    let err = load_rule_config(&unknown).unwrap_err();
    assert!(err.to_string().contains("Unsupported rule config format 'ini'"));
}
