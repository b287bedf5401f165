use std::fs;

use tempfile::tempdir;
use unannotated::sha256_file;

#[test]
fn sha256_file_hashes_contents() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");
    fs::write(&path, "abc").expect("write");

    let digest = sha256_file(&path).expect("hash");
    assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn sha256_file_errors_for_missing_file() {
    let dir = tempdir().expect("tempdir");
    let err = sha256_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to open snapshot for hashing"));
}
