use std::fs;

use tempfile::tempdir;
use unannotated::commands::{
    check_command, collect_type_summaries, explain_class, load_rules, open_snapshot, run_check,
    show_rules_command,
};
use unannotated_core::analysis::{Recognition, Verdict};
use unannotated_core::services::ClassOutcome;

const SNAPSHOT_YAML: &str = "\
types:
  - name: io.prestosql.tempto.RequirementsProvider
    kind: interface
    methods:
      - name: getRequirements
        parameters: [io.prestosql.tempto.configuration.Configuration]
  - name: com.acme.SuiteTest
    interfaces: [io.prestosql.tempto.RequirementsProvider]
    methods:
      - name: getRequirements
        parameters: [io.prestosql.tempto.configuration.Configuration]
        return_type: io.prestosql.tempto.Requirement
      - name: testSelect
        return_type: void
        annotations: [org.testng.annotations.Test]
";

fn write_yaml(dir: &std::path::Path) -> String {
    let path = dir.join("snapshot.yml");
    fs::write(&path, SNAPSHOT_YAML).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn run_check_uses_concrete_classes_by_default() {
    let temp = tempdir().unwrap();
    let snapshot = write_yaml(temp.path());

    let report = run_check(&snapshot, &[], None).unwrap();
    assert_eq!(report.classes_checked, 1);
    assert_eq!(report.classes[0].class, "com.acme.SuiteTest");
    assert_eq!(report.classes[0].outcome, ClassOutcome::Clean);
    assert!(report.failures.is_empty());

    check_command(&snapshot, &[], None, false).unwrap();
}

#[test]
fn check_command_errors_when_failures_reported() {
    let temp = tempdir().unwrap();
    let snapshot = write_yaml(temp.path());
    let classes = vec!["com.acme.Nope".to_string()];

    let err = check_command(&snapshot, &classes, None, true).unwrap_err();
    assert!(err.to_string().contains("1 listener failure(s) reported"), "unexpected error: {err}");
}

#[test]
fn explain_class_reports_service_interface_match() {
    let temp = tempdir().unwrap();
    let snapshot = write_yaml(temp.path());

    let explanation = explain_class(&snapshot, "com.acme.SuiteTest", None).unwrap();
    assert!(!explanation.excluded);
    assert_eq!(
        explanation.methods[0].verdict,
        Verdict::Recognized {
            recognition: Recognition::ServiceInterface {
                interface: "io.prestosql.tempto.RequirementsProvider".into()
            }
        }
    );
}

#[test]
fn explain_class_errors_for_unknown_class() {
    let temp = tempdir().unwrap();
    let snapshot = write_yaml(temp.path());

    let err = explain_class(&snapshot, "com.acme.Nope", None).unwrap_err();
    assert!(err.to_string().contains("Failed to resolve class com.acme.Nope"));
}

#[test]
fn type_summaries_follow_snapshot_order() {
    let temp = tempdir().unwrap();
    let snapshot = write_yaml(temp.path());

    let (root, types) = collect_type_summaries(&snapshot).unwrap();
    assert_eq!(root, "java.lang.Object");
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["io.prestosql.tempto.RequirementsProvider", "com.acme.SuiteTest", "java.lang.Object"]
    );
    assert!(types[1].test_class);
    assert_eq!(types[1].interfaces, 1);
}

#[test]
fn open_snapshot_rejects_missing_file() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("absent.json").to_string_lossy().to_string();
    let err = open_snapshot(&missing).unwrap_err();
    assert!(err.to_string().contains("Snapshot file does not exist"));
}

#[test]
fn load_rules_reports_corrupt_config() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("rules.json");
    fs::write(&config, "not-json").unwrap();
    let config = config.to_string_lossy().to_string();

    let err = load_rules(Some(&config)).unwrap_err();
    assert!(err.to_string().contains("Failed to parse rule config JSON"));
    assert!(show_rules_command(Some(&config), false).is_err());
    show_rules_command(None, true).unwrap();
}
