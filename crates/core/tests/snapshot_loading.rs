use std::fs;

use tempfile::tempdir;
use unannotated_core::model::{TypeDescriptor, TypeKind};
use unannotated_core::services::{
    load_snapshot, read_snapshot, MetadataError, MetadataProvider, Snapshot, SnapshotProvider,
};

const SNAPSHOT_JSON: &str = r#"{
  "test_classes": ["com.acme.ChildTest"],
  "types": [
    {
      "name": "com.acme.BaseTest",
      "methods": [
        {"name": "setUp", "return_type": "void", "annotations": ["org.testng.annotations.BeforeMethod"]}
      ]
    },
    {
      "name": "com.acme.ChildTest",
      "superclass": "com.acme.BaseTest",
      "methods": [
        {"name": "setUp", "return_type": "void"},
        {"name": "wait", "parameters": ["long"], "declaring_type": "java.lang.Object"}
      ]
    }
  ]
}"#;

#[test]
fn json_snapshot_is_normalized_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");
    fs::write(&path, SNAPSHOT_JSON).unwrap();

    let provider = load_snapshot(&path).expect("load snapshot");
    assert_eq!(provider.root_type(), "java.lang.Object");

    let base = provider.resolve("com.acme.BaseTest").unwrap();
    assert_eq!(base.superclass.as_deref(), Some("java.lang.Object"));
    assert_eq!(base.public_methods[0].declaring_type, "com.acme.BaseTest");

    let child = provider.resolve("com.acme.ChildTest").unwrap();
    assert_eq!(child.public_methods[1].declaring_type, "java.lang.Object");

    // Root type is synthesized when the snapshot omits it.
    let root = provider.resolve("java.lang.Object").unwrap();
    assert!(root.superclass.is_none());
    assert_eq!(provider.test_classes(), vec!["com.acme.ChildTest".to_string()]);
}

#[test]
fn yaml_snapshot_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.yaml");
    fs::write(
        &path,
        "types:\n  - name: io.prestosql.tempto.Contract\n    kind: interface\n    methods:\n      - name: onContext\n        parameters: [io.prestosql.tempto.context.TestContext]\n",
    )
    .unwrap();

    let provider = load_snapshot(&path).expect("load yaml snapshot");
    let contract = provider.resolve("io.prestosql.tempto.Contract").unwrap();
    assert_eq!(contract.kind, TypeKind::Interface);
    assert!(contract.superclass.is_none());
    assert_eq!(contract.public_methods[0].signature.parameters.len(), 1);
    // Interfaces are not run as test classes.
    assert!(provider.test_classes().is_empty());
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.toml");
    fs::write(&path, "").unwrap();

    let err = read_snapshot(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported snapshot format 'toml'"), "unexpected error: {err}");
}

#[test]
fn malformed_json_reports_parse_failure() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");
    fs::write(&path, "not-json").unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse snapshot JSON"));
}

#[test]
fn unknown_superclass_is_rejected() {
    let err = SnapshotProvider::from_types(vec![
        TypeDescriptor::class("com.acme.Child").extends("com.acme.Missing")
    ])
    .unwrap_err();
    assert!(matches!(err, MetadataError::UnknownSuperclass { .. }));
}

#[test]
fn cyclic_superclass_chain_is_rejected() {
    let err = SnapshotProvider::from_types(vec![
        TypeDescriptor::class("com.acme.A").extends("com.acme.B"),
        TypeDescriptor::class("com.acme.B").extends("com.acme.A"),
    ])
    .unwrap_err();
    assert!(matches!(err, MetadataError::CyclicHierarchy(_)));
}

#[test]
fn duplicate_types_are_rejected() {
    let err = SnapshotProvider::from_types(vec![
        TypeDescriptor::class("com.acme.A"),
        TypeDescriptor::class("com.acme.A"),
    ])
    .unwrap_err();
    assert!(matches!(err, MetadataError::DuplicateType(name) if name == "com.acme.A"));
}

#[test]
fn default_test_classes_skip_root_and_interfaces() {
    let provider = SnapshotProvider::new(Snapshot::new(vec![
        TypeDescriptor::class("com.acme.One"),
        TypeDescriptor::interface("com.acme.Api"),
        TypeDescriptor::class("com.acme.Two"),
    ]))
    .unwrap();
    assert_eq!(provider.test_classes(), vec!["com.acme.One".to_string(), "com.acme.Two".to_string()]);
}
